//! Poker Settle CLI: track a cash-game session and settle it.
//!
//! Commands:
//! - `new`: start a session file (optionally keeping the previous names)
//! - `add-player` / `remove-player` / `start`: seat the table
//! - `buy-in` / `undo-buy-in` / `buy-in-amount`: track buy-ins during play
//! - `final-standing` / `final`: record what everyone holds at the end
//! - `status`: pot, chip value, positions and chip reconciliation
//! - `settle`: compute the payments
//! - `share`: print a shareable summary
//! - `net`: one-shot settlement of raw net amounts
//! - `clear`: delete the session file

mod logging;
mod output;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use poker_settle_core::session::{clear_session, load_session, save_session, session_timestamp};
use poker_settle_core::settlement::calculate_settlement;
use poker_settle_core::{FinalHolding, NetPosition, Session, SessionConfig, Stage, Valuation};
use tracing::debug;

use crate::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "poker-settle",
    about = "Poker night tracker: buy-ins, final counts and minimal settlement"
)]
struct Cli {
    /// Session file.
    #[arg(long, global = true, default_value = "poker-session.json")]
    session: PathBuf,

    /// TOML config with table defaults (buy-in amount, chips per buy-in, ...).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level filter (overridden by RUST_LOG). Defaults to info.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: pretty or json.
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Table terms given on the command line, applied over the config.
#[derive(Args, Debug, Default)]
struct TableArgs {
    /// Money per buy-in.
    #[arg(long)]
    buy_in: Option<f64>,

    /// Chips per buy-in.
    #[arg(long)]
    chips_per_buy_in: Option<u64>,

    /// Record final holdings as cash instead of chips.
    #[arg(long, default_value_t = false)]
    cash: bool,
}

impl TableArgs {
    fn apply(&self, session: &mut Session) -> Result<()> {
        if let Some(amount) = self.buy_in {
            session.set_buy_in_amount(amount)?;
        }
        if let Some(chips) = self.chips_per_buy_in {
            session.set_starting_stack(chips)?;
        }
        if self.cash {
            session.set_valuation(Valuation::Cash)?;
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new session, replacing any saved one.
    New {
        /// Player names to seat.
        names: Vec<String>,

        #[command(flatten)]
        table: TableArgs,

        /// Reset the saved session, keeping its player names and currency.
        #[arg(long, default_value_t = false)]
        keep_names: bool,
    },
    /// Seat a player (setup or buy-ins).
    AddPlayer { name: String },
    /// Remove a player (setup only).
    RemovePlayer { name: String },
    /// Finish setup and begin tracking buy-ins.
    Start,
    /// Record one more buy-in for a player.
    BuyIn { name: String },
    /// Undo one buy-in for a player.
    UndoBuyIn { name: String },
    /// Change the money paid per buy-in (setup or buy-ins).
    BuyInAmount { amount: f64 },
    /// Stop play and begin recording final holdings.
    FinalStanding,
    /// Record a player's final holding.
    #[command(group(ArgGroup::new("holding").required(true).args(["chips", "cash"])))]
    Final {
        name: String,

        /// Final chip count.
        #[arg(long)]
        chips: Option<u64>,

        /// Final cash amount.
        #[arg(long)]
        cash: Option<f64>,
    },
    /// Show the session state.
    Status,
    /// Compute the payments that settle the session.
    Settle {
        /// Settle even when final holdings do not add up.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print a shareable summary of a settled session.
    Share {
        /// Date for the header (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Settle raw net amounts given as NAME=AMOUNT (e.g. Ann=30 Bob=-30).
    Net {
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Delete the saved session.
    Clear,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(level) = cli.log_level.take() {
        logging.level = level;
    }
    if let Some(format) = cli.log_format.take() {
        logging.format = format;
    }
    logging.init();

    let path = cli.session.as_path();
    debug!(path = %path.display(), "using session file");

    match cli.command {
        Commands::New {
            names,
            table,
            keep_names,
        } => run_new(path, cli.config.as_deref(), &table, &names, keep_names),
        Commands::AddPlayer { name } => update(path, |s| Ok(s.add_player(&name)?)),
        Commands::RemovePlayer { name } => update(path, |s| Ok(s.remove_player(&name)?)),
        Commands::Start => update(path, |s| Ok(s.start()?)),
        Commands::BuyIn { name } => update(path, |s| {
            let count = s.add_buy_in(&name)?;
            println!("{} now has {} buy-in(s)", name.trim(), count);
            Ok(())
        }),
        Commands::UndoBuyIn { name } => update(path, |s| {
            let count = s.remove_buy_in(&name)?;
            println!("{} now has {} buy-in(s)", name.trim(), count);
            Ok(())
        }),
        Commands::BuyInAmount { amount } => update(path, |s| Ok(s.set_buy_in_amount(amount)?)),
        Commands::FinalStanding => update(path, |s| Ok(s.begin_final_standing()?)),
        Commands::Final { name, chips, cash } => {
            let holding = match (chips, cash) {
                (Some(chips), None) => FinalHolding::Chips(chips),
                (None, Some(cash)) => FinalHolding::Cash(cash),
                _ => bail!("exactly one of --chips or --cash is required"),
            };
            update(path, |s| Ok(s.record_final(&name, holding)?))
        }
        Commands::Status => run_status(path),
        Commands::Settle { force } => run_settle(path, force),
        Commands::Share { date } => run_share(path, date.as_deref()),
        Commands::Net { entries } => run_net(&entries),
        Commands::Clear => {
            clear_session(path)?;
            println!("Session cleared");
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

fn open_session(path: &Path) -> Result<Session> {
    load_session(path)?.ok_or_else(|| {
        anyhow!(
            "no session at {}; run `poker-settle new` first",
            path.display()
        )
    })
}

/// Load, apply one change, save
fn update<F>(path: &Path, change: F) -> Result<()>
where
    F: FnOnce(&mut Session) -> Result<()>,
{
    let mut session = open_session(path)?;
    change(&mut session)?;
    save_session(&session, path)?;
    Ok(())
}

fn run_new(
    path: &Path,
    config: Option<&Path>,
    table: &TableArgs,
    names: &[String],
    keep_names: bool,
) -> Result<()> {
    let mut session = if keep_names {
        if config.is_some() {
            bail!("--config cannot be combined with --keep-names");
        }
        let mut previous = load_session(path)?.ok_or_else(|| {
            anyhow!("--keep-names given but no saved session at {}", path.display())
        })?;
        previous.reset(true);
        previous
    } else {
        Session::new(load_config(config)?)
    };
    table.apply(&mut session)?;

    for name in names {
        session.add_player(name)?;
    }

    save_session(&session, path)?;
    println!(
        "New session {} with {} player(s)",
        session.id(),
        session.players().len()
    );
    Ok(())
}

fn run_status(path: &Path) -> Result<()> {
    let session = open_session(path)?;
    let sym = session.config().currency_symbol.clone();

    if let Some(saved_at) = session_timestamp(path)? {
        println!("Saved {}", saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    output::print_header(&session);

    match session.stage() {
        Stage::Setup | Stage::BuyIns => output::print_buy_ins(&session),
        Stage::FinalStanding | Stage::Settlement => {
            output::print_positions(&session.positions()?, &sym);
            if session.config().valuation == Valuation::Chips {
                let check = session.reconcile();
                println!();
                println!(
                    "Chips counted {} / in play {}: {}",
                    check.total_final_chips,
                    check.total_chips_in_play,
                    check.describe()
                );
            }
        }
    }
    Ok(())
}

fn run_settle(path: &Path, force: bool) -> Result<()> {
    let mut session = open_session(path)?;

    let settlement = if session.stage() == Stage::Settlement {
        session.settlement()?
    } else if force {
        session.force_settle()?
    } else {
        session.settle()?
    };

    save_session(&session, path)?;
    output::print_settlement(&settlement, &session.config().currency_symbol);
    Ok(())
}

fn run_share(path: &Path, date: Option<&str>) -> Result<()> {
    let session = open_session(path)?;
    let date = match date {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}'", text))?,
        None => chrono::Local::now().date_naive(),
    };

    print!("{}", session.share_text(date)?);
    Ok(())
}

fn run_net(entries: &[String]) -> Result<()> {
    let positions = entries
        .iter()
        .map(|entry| parse_net_entry(entry))
        .collect::<Result<Vec<_>>>()?;

    let settlement = calculate_settlement(&positions);
    output::print_settlement(&settlement, "");
    Ok(())
}

/// Parse `NAME=AMOUNT` into a net position
fn parse_net_entry(entry: &str) -> Result<NetPosition> {
    let (name, amount) = entry
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=AMOUNT, got '{}'", entry))?;

    let name = name.trim();
    if name.is_empty() {
        bail!("missing name in '{}'", entry);
    }

    let amount: f64 = amount
        .trim()
        .parse()
        .with_context(|| format!("invalid amount in '{}'", entry))?;
    if !amount.is_finite() {
        bail!("invalid amount in '{}'", entry);
    }

    Ok(NetPosition::new(name, amount))
}

//! Terminal rendering of session state and settlements

use poker_settle_core::core::money::{format_cents, format_money};
use poker_settle_core::{PlayerPosition, Session, Settlement};

pub fn print_header(session: &Session) {
    let config = session.config();
    let sym = &config.currency_symbol;

    println!("Session {} ({})", session.id(), session.stage());
    println!(
        "Buy-in: {}{} = {} chips | counting {}",
        sym,
        format_money(config.buy_in_amount),
        config.starting_stack,
        config.valuation
    );
    print!(
        "Total pot: {}{} ({} chips)",
        sym,
        format_money(session.total_pot()),
        session.total_chips()
    );
    match session.chip_value() {
        Ok(value) => println!(" | chip value {}{:.4}", sym, value),
        Err(_) => println!(" | chip value undefined"),
    }
    println!();
}

pub fn print_buy_ins(session: &Session) {
    let sym = &session.config().currency_symbol;
    let pricing = session.config().pricing();

    for player in session.players() {
        println!(
            "  {:<16} {:>2} buy-in(s)  {}{}",
            player.name(),
            player.buy_ins(),
            sym,
            format_money(pricing.total_buy_in(player.buy_ins()))
        );
    }
}

pub fn print_positions(positions: &[PlayerPosition], sym: &str) {
    println!(
        "  {:<16} {:>12} {:>12} {:>12}",
        "player", "buy-in", "final", "net"
    );
    for p in positions {
        let sign = if p.net_position >= 0.0 { "+" } else { "-" };
        println!(
            "  {:<16} {:>12} {:>12} {:>12}",
            p.name,
            format!("{}{}", sym, format_cents(p.total_buy_in)),
            format!("{}{}", sym, format_cents(p.final_value)),
            format!("{}{}{}", sign, sym, format_cents(p.net_position.abs()))
        );
    }
}

pub fn print_settlement(settlement: &Settlement, sym: &str) {
    if settlement.is_even() {
        println!("Everyone is even! No payments needed.");
    } else {
        println!("Payment instructions:");
        for (index, tx) in settlement.transactions.iter().enumerate() {
            println!(
                "  {}. {} pays {} {}{}",
                index + 1,
                tx.from(),
                tx.to(),
                sym,
                tx.amount_display()
            );
        }
    }

    if !settlement.is_balanced() {
        println!();
        println!(
            "WARNING: positions are off by {}{}; this settlement is incomplete.",
            sym,
            format_cents(settlement.imbalance)
        );
        for residual in &settlement.unsettled {
            println!(
                "  {} still {} {}{}",
                residual.name,
                if residual.net > 0.0 { "owed" } else { "owes" },
                sym,
                format_cents(residual.net.abs())
            );
        }
    }
}

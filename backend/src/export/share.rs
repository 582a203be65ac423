//! Plain-text settlement summary for sharing in a group chat

use std::fmt;

use chrono::NaiveDate;

use crate::core::money::{format_money, round_cents};
use crate::models::position::PlayerPosition;
use crate::models::pricing::PricingContext;
use crate::models::transaction::Transaction;

/// Everything the share text needs, borrowed from the caller
#[derive(Debug, Clone)]
pub struct ShareContext<'a> {
    pub date: NaiveDate,
    pub currency_symbol: &'a str,
    pub pricing: PricingContext,
    pub positions: &'a [PlayerPosition],
    pub transactions: &'a [Transaction],
}

/// Render the shareable summary
///
/// Layout: header with buy-in terms, numbered payment instructions (or an
/// all-even note), one two-line block per player, then the pot total.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use poker_settle_core::{PlayerPosition, PricingContext, Transaction};
/// use poker_settle_core::export::{render_share_text, ShareContext};
///
/// let positions = vec![PlayerPosition {
///     name: "Alice".to_string(),
///     buy_ins: 1,
///     total_buy_in: 200.0,
///     starting_chips: 400,
///     final_value: 200.0,
///     final_chips: Some(400),
///     net_position: 0.0,
/// }];
///
/// let text = render_share_text(&ShareContext {
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     currency_symbol: "$",
///     pricing: PricingContext::new(200.0, 400),
///     positions: &positions,
///     transactions: &[],
/// });
/// assert!(text.contains("Everyone is even! No payments needed."));
/// ```
pub fn render_share_text(ctx: &ShareContext<'_>) -> String {
    ctx.to_string()
}

impl fmt::Display for ShareContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = self.currency_symbol;
        let total_pot: f64 = self.positions.iter().map(|p| p.total_buy_in).sum();
        let total_chips: u64 = self.positions.iter().map(|p| p.starting_chips).sum();

        writeln!(f, "Poker Night Settlement - {}", self.date.format("%Y-%m-%d"))?;
        write!(
            f,
            "Buy-in: {}{} = {} chips",
            sym,
            format_money(self.pricing.buy_in_amount),
            self.pricing.starting_stack
        )?;
        if total_chips > 0 {
            write!(
                f,
                " | Chip Value: {}{:.4}/chip",
                sym,
                total_pot / total_chips as f64
            )?;
        }
        f.write_str("\n\n")?;

        if self.transactions.is_empty() {
            f.write_str("Everyone is even! No payments needed.\n\n\n")?;
        } else {
            f.write_str("Payment Instructions:\n")?;
            for (index, tx) in self.transactions.iter().enumerate() {
                writeln!(
                    f,
                    "{}. {} pays {} {}{}",
                    index + 1,
                    tx.from(),
                    tx.to(),
                    sym,
                    tx.amount_display()
                )?;
            }
            f.write_str("\n\n")?;
        }

        f.write_str("Player Summary:\n")?;
        for position in self.positions {
            let final_chips = position
                .final_chips
                .map_or_else(|| "-".to_string(), |chips| chips.to_string());

            writeln!(f, "{}: Chips → Final | Buy-in → Final | Net", position.name)?;
            writeln!(
                f,
                "{} → {} | {}{} → {}{} | {}{}{}\n",
                position.starting_chips,
                final_chips,
                sym,
                format_money(position.total_buy_in),
                sym,
                format_money(position.final_value),
                net_sign(position.net_position),
                sym,
                format_money(position.net_position.abs())
            )?;
        }

        writeln!(
            f,
            "Total Pot: {}{} ({} chips)",
            sym,
            format_money(total_pot),
            total_chips
        )
    }
}

fn net_sign(net: f64) -> &'static str {
    let cents = round_cents(net);
    if cents > 0.0 {
        "+"
    } else if cents < 0.0 {
        "-"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_render() {
        let positions = vec![PlayerPosition {
            name: "Ann".to_string(),
            buy_ins: 2,
            total_buy_in: 100.0,
            starting_chips: 200,
            final_value: 75.5,
            final_chips: None,
            net_position: -24.5,
        }];
        let ctx = ShareContext {
            date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
            currency_symbol: "€",
            pricing: PricingContext::new(50.0, 100),
            positions: &positions,
            transactions: &[],
        };

        let text = render_share_text(&ctx);
        assert_eq!(text, format!("{}", ctx));
        assert!(text.contains("200 → - | €100 → €75.50 | -€24.50\n"));
        assert!(text.ends_with("Total Pot: €100 (200 chips)\n"));
    }

    #[test]
    fn test_net_sign_uses_rounded_cents() {
        assert_eq!(net_sign(0.004), "");
        assert_eq!(net_sign(-0.004), "");
        assert_eq!(net_sign(0.006), "+");
        assert_eq!(net_sign(-3.0), "-");
    }
}

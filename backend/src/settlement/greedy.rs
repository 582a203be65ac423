//! Greedy debt-matching settlement
//!
//! Converts net positions into a short list of directed payments.
//!
//! # Algorithm
//!
//! ```text
//! creditors (net > ε)  sorted largest credit first   ─┐
//!                                                     ├─► pair heads, pay min(credit, debt)
//! debtors   (net < -ε) sorted largest debt first     ─┘   advance whichever side reaches ~0
//! ```
//!
//! Players within ε of zero take part in no payment. Sorting is stable, so
//! equal amounts keep their input order.
//!
//! # Critical Invariants
//!
//! 1. **Purity**: the caller's positions are copied, never adjusted
//! 2. **Bounded**: at most `creditors + debtors - 1` payments on zero-sum input
//! 3. **Conservation**: on zero-sum input every creditor collects exactly their due
//! 4. **Soft failure**: non-zero-sum input still terminates; the residue is
//!    reported in [`Settlement::unsettled`] and [`Settlement::imbalance`]

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::money::{is_settled, SETTLEMENT_EPSILON};
use crate::models::position::{NetBalance, NetPosition};
use crate::models::transaction::Transaction;

/// Result of one settlement computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Payments in execution order
    pub transactions: Vec<Transaction>,

    /// Balances left over after matching (empty on zero-sum input)
    pub unsettled: Vec<NetPosition>,

    /// Σ net over the input; ~0 when money was conserved upstream
    pub imbalance: f64,

    /// Players owed money at the start
    pub creditor_count: usize,

    /// Players owing money at the start
    pub debtor_count: usize,
}

impl Settlement {
    /// True when the input was zero-sum and nothing is left unpaid
    pub fn is_balanced(&self) -> bool {
        self.imbalance.abs() < SETTLEMENT_EPSILON && self.unsettled.is_empty()
    }

    /// True when nobody needs to pay anybody
    pub fn is_even(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all payment amounts
    pub fn total_paid(&self) -> f64 {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    /// Upper bound on payment count for this input
    pub fn max_transactions(&self) -> usize {
        (self.creditor_count + self.debtor_count).saturating_sub(1)
    }
}

/// Compute the payments that bring every position to zero
///
/// Deterministic: the same input always yields the same transaction list.
///
/// # Example
///
/// ```rust
/// use poker_settle_core::NetPosition;
/// use poker_settle_core::settlement::calculate_settlement;
///
/// let positions = vec![
///     NetPosition::new("A", 30.0),
///     NetPosition::new("B", -10.0),
///     NetPosition::new("C", -20.0),
/// ];
///
/// let settlement = calculate_settlement(&positions);
/// let paid: Vec<String> = settlement.transactions.iter().map(|t| t.to_string()).collect();
/// assert_eq!(paid, vec!["C pays A 20.00", "B pays A 10.00"]);
/// assert!(settlement.is_balanced());
/// ```
pub fn calculate_settlement<P: NetBalance>(positions: &[P]) -> Settlement {
    let imbalance: f64 = positions.iter().map(NetBalance::net).sum();

    let mut creditors: Vec<NetPosition> = positions
        .iter()
        .filter(|p| p.net() > SETTLEMENT_EPSILON)
        .map(NetPosition::from_balance)
        .collect();
    let mut debtors: Vec<NetPosition> = positions
        .iter()
        .filter(|p| p.net() < -SETTLEMENT_EPSILON)
        .map(NetPosition::from_balance)
        .collect();

    // sort_by is stable: ties keep input order
    creditors.sort_by(|a, b| b.net.total_cmp(&a.net));
    debtors.sort_by(|a, b| a.net.total_cmp(&b.net));

    let creditor_count = creditors.len();
    let debtor_count = debtors.len();

    let mut transactions = Vec::with_capacity((creditor_count + debtor_count).saturating_sub(1));
    let mut i = 0;
    let mut j = 0;

    while i < creditors.len() && j < debtors.len() {
        let creditor = &mut creditors[i];
        let debtor = &mut debtors[j];

        let amount = creditor.net.min(-debtor.net);
        let transaction = Transaction::new(debtor.name.clone(), creditor.name.clone(), amount);
        debug!(
            from = transaction.from(),
            to = transaction.to(),
            amount = transaction.amount(),
            "matched payment"
        );
        transactions.push(transaction);

        // One side hits exactly zero every round, so the loop is bounded
        creditor.net -= amount;
        debtor.net += amount;

        if is_settled(creditor.net) {
            i += 1;
        }
        if is_settled(debtor.net) {
            j += 1;
        }
    }

    let unsettled: Vec<NetPosition> = creditors[i..]
        .iter()
        .chain(debtors[j..].iter())
        .filter(|p| !is_settled(p.net))
        .cloned()
        .collect();

    let settlement = Settlement {
        transactions,
        unsettled,
        imbalance,
        creditor_count,
        debtor_count,
    };

    if !settlement.is_balanced() {
        warn!(
            imbalance = settlement.imbalance,
            unsettled = settlement.unsettled.len(),
            "net positions do not sum to zero; settlement is incomplete"
        );
    }

    settlement
}

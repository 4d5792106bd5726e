//! Per-commitment computation and multi-commitment summarization

use bigdecimal::BigDecimal;

use crate::engine::convert::convert;
use crate::types::{
    Commitment, CommitmentBreakdown, CurrencyGroup, CurrencyIndex, Payment, ReconSummary,
};

/// Paid and remaining percentages for a committed/paid pair.
///
/// A non-positive committed amount yields 0% paid; the pair always sums to
/// exactly 100, before and after currency conversion.
pub(crate) fn percentages(committed: &BigDecimal, paid: &BigDecimal) -> (BigDecimal, BigDecimal) {
    let hundred = BigDecimal::from(100);
    let payment_percentage = if *committed > BigDecimal::from(0) {
        (paid * &hundred) / committed
    } else {
        BigDecimal::from(0)
    };
    let remaining_percentage = &hundred - &payment_percentage;
    (payment_percentage, remaining_percentage)
}

/// Compute the full breakdown for one commitment.
///
/// Payments attach by strict `commitment_id` equality only. A payment whose
/// resolved currency code equals the commitment's adds directly; any other
/// payment converts from its own rate to the commitment's rate first.
/// Remaining goes negative on overpayment, never clamped.
pub fn breakdown_commitment(
    commitment: &Commitment,
    payments: &[Payment],
    currencies: &CurrencyIndex,
) -> CommitmentBreakdown {
    let committed = commitment.committed();
    let rate = commitment.rate();
    let (currency_code, currency_symbol) = currencies.code_symbol_of(&commitment.currency_id);

    let mut paid = BigDecimal::from(0);
    let mut payment_count = 0usize;
    for payment in payments.iter().filter(|p| p.commitment_id == commitment.id) {
        let contribution = payment.contribution();
        let (payment_code, _) = currencies.code_symbol_of(&payment.currency_id);
        if payment_code == currency_code {
            paid += contribution;
        } else {
            paid += convert(&contribution, &payment.rate(), &rate);
        }
        payment_count += 1;
    }

    let remaining = &committed - &paid;
    let (payment_percentage, remaining_percentage) = percentages(&committed, &paid);

    CommitmentBreakdown {
        client_name: commitment.client.display_name(),
        project_name: commitment.project_name.clone(),
        unit: commitment.unit.clone(),
        committed,
        paid,
        remaining,
        payment_percentage,
        remaining_percentage,
        currency_code,
        currency_symbol,
        exchange_rate: rate,
        payment_count,
    }
}

/// Group breakdowns by currency code and compute per-group totals.
///
/// Groups appear in first-encounter order and are never sorted; within the
/// summary the breakdowns keep their original relative order.
pub fn summarize(breakdowns: Vec<CommitmentBreakdown>) -> ReconSummary {
    let mut groups: Vec<CurrencyGroup> = Vec::new();

    for breakdown in &breakdowns {
        let position = groups
            .iter()
            .position(|g| g.currency_code == breakdown.currency_code);
        let group = match position {
            Some(i) => &mut groups[i],
            None => {
                groups.push(CurrencyGroup {
                    currency_code: breakdown.currency_code.clone(),
                    currency_symbol: breakdown.currency_symbol.clone(),
                    total_committed: BigDecimal::from(0),
                    total_paid: BigDecimal::from(0),
                    total_remaining: BigDecimal::from(0),
                    payment_percentage: BigDecimal::from(0),
                    commitment_count: 0,
                });
                let end = groups.len() - 1;
                &mut groups[end]
            }
        };

        group.total_committed += &breakdown.committed;
        group.total_paid += &breakdown.paid;
        group.commitment_count += 1;
    }

    for group in &mut groups {
        group.total_remaining = &group.total_committed - &group.total_paid;
        let (payment_percentage, _) = percentages(&group.total_committed, &group.total_paid);
        group.payment_percentage = payment_percentage;
    }

    ReconSummary {
        commitments: breakdowns,
        currency_groups: groups,
    }
}

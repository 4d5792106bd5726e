//! Currency normalization for amounts carrying historical exchange rates

use bigdecimal::BigDecimal;

use crate::engine::aggregate::percentages;
use crate::types::{effective_rate, Commitment, CommitmentBreakdown, Currency, Payment};

/// Convert an amount recorded at `source_rate` into its value at `target_rate`.
///
/// The amount is first normalized to its rate-1 equivalent via the source
/// rate, then re-expressed at the target rate:
/// `amount * (source_rate / target_rate)`. A zero rate reads as 1 per the
/// data-model coercion rules, so the division is always defined and the
/// result is always finite.
pub fn convert(
    amount: &BigDecimal,
    source_rate: &BigDecimal,
    target_rate: &BigDecimal,
) -> BigDecimal {
    let source = effective_rate(Some(source_rate));
    let target = effective_rate(Some(target_rate));
    (amount * source) / target
}

/// Find the exchange rate used to re-express results in the target currency.
///
/// Searched in order: the first in-scope commitment denominated in the
/// target currency, then the first in-scope payment made in it. The rate is
/// always a record's own coerced rate; when no in-scope record uses the
/// currency there is nothing to anchor a conversion to and the caller
/// reports the no-reference-rate outcome instead of inventing one.
pub fn reference_rate(
    target: &Currency,
    commitments: &[&Commitment],
    payments: &[&Payment],
) -> Option<BigDecimal> {
    if let Some(commitment) = commitments.iter().find(|c| c.currency_id == target.id) {
        return Some(commitment.rate());
    }
    payments
        .iter()
        .find(|p| p.currency_id == target.id)
        .map(|p| p.rate())
}

/// Re-express one breakdown in the target currency at the reference rate.
///
/// Committed and paid convert independently from the breakdown's own rate;
/// remaining and both percentages are rederived from the converted figures,
/// so `payment% + remaining% = 100` still holds afterwards.
pub fn reexpress(
    breakdown: &CommitmentBreakdown,
    target: &Currency,
    target_rate: &BigDecimal,
) -> CommitmentBreakdown {
    let committed = convert(&breakdown.committed, &breakdown.exchange_rate, target_rate);
    let paid = convert(&breakdown.paid, &breakdown.exchange_rate, target_rate);
    let remaining = &committed - &paid;
    let (payment_percentage, remaining_percentage) = percentages(&committed, &paid);

    CommitmentBreakdown {
        client_name: breakdown.client_name.clone(),
        project_name: breakdown.project_name.clone(),
        unit: breakdown.unit.clone(),
        committed,
        paid,
        remaining,
        payment_percentage,
        remaining_percentage,
        currency_code: target.code.clone(),
        currency_symbol: target.symbol.clone(),
        exchange_rate: target_rate.clone(),
        payment_count: breakdown.payment_count,
    }
}

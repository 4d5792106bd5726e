//! Plain-text rendering of reconciliation reports
//!
//! The engine returns structured results; this module is the presentation
//! edge that turns them into human-readable text. Amounts and percentages
//! are rounded to two decimal places here and nowhere else.

use bigdecimal::BigDecimal;

use crate::types::{CommitmentBreakdown, CurrencyGroup, EmptyReason, ReconReport};

/// Render a full report as plain text
pub fn render(report: &ReconReport) -> String {
    match report {
        ReconReport::Empty { reason } => empty_message(*reason).to_string(),
        ReconReport::Single { commitment } => render_breakdown(commitment),
        ReconReport::Summary(summary) => {
            let mut out = String::new();
            for breakdown in &summary.commitments {
                out.push_str(&render_breakdown(breakdown));
            }
            out.push_str("Totals by currency:\n");
            for group in &summary.currency_groups {
                out.push_str("  ");
                out.push_str(&render_group(group));
                out.push('\n');
            }
            out
        }
    }
}

/// Render one commitment breakdown as a short block
pub fn render_breakdown(breakdown: &CommitmentBreakdown) -> String {
    let mut out = String::new();

    out.push_str(&breakdown.client_name);
    out.push_str(" / ");
    out.push_str(&breakdown.project_name);
    if let Some(unit) = &breakdown.unit {
        out.push_str(" / ");
        out.push_str(unit);
    }
    out.push('\n');

    out.push_str(&format!(
        "  committed {} {}\n",
        format_amount(&breakdown.committed, &breakdown.currency_symbol),
        breakdown.currency_code
    ));
    let noun = if breakdown.payment_count == 1 {
        "payment"
    } else {
        "payments"
    };
    out.push_str(&format!(
        "  paid      {} {} across {} {}\n",
        format_amount(&breakdown.paid, &breakdown.currency_symbol),
        breakdown.currency_code,
        breakdown.payment_count,
        noun
    ));
    out.push_str(&format!(
        "  remaining {} {}\n",
        format_amount(&breakdown.remaining, &breakdown.currency_symbol),
        breakdown.currency_code
    ));
    out.push_str(&format!(
        "  progress  {}% paid, {}% remaining\n",
        round2(&breakdown.payment_percentage),
        round2(&breakdown.remaining_percentage)
    ));

    out
}

/// Render one currency group's totals as a single line
pub fn render_group(group: &CurrencyGroup) -> String {
    let label = if group.currency_code.is_empty() {
        "unknown currency"
    } else {
        &group.currency_code
    };
    let noun = if group.commitment_count == 1 {
        "commitment"
    } else {
        "commitments"
    };
    format!(
        "{}: committed {}, paid {}, remaining {}, {}% complete across {} {}",
        label,
        format_amount(&group.total_committed, &group.currency_symbol),
        format_amount(&group.total_paid, &group.currency_symbol),
        format_amount(&group.total_remaining, &group.currency_symbol),
        round2(&group.payment_percentage),
        group.commitment_count,
        noun
    )
}

/// Explanatory sentence for an empty outcome
pub fn empty_message(reason: EmptyReason) -> &'static str {
    match reason {
        EmptyReason::NoCommitments => "No payment commitments are recorded.",
        EmptyReason::NoProjectMatches => "No commitments match the project filter.",
        EmptyReason::NoClientMatches => "No commitments match the client filter.",
        EmptyReason::NoCurrencyMatches => "No commitments match the currency filter.",
        EmptyReason::CurrencyNotFound => "The requested display currency is not registered.",
        EmptyReason::NoReferenceRate => {
            "No exchange rate for the display currency exists among the matching records."
        }
    }
}

fn format_amount(amount: &BigDecimal, symbol: &str) -> String {
    if symbol.is_empty() {
        round2(amount).to_string()
    } else {
        format!("{} {}", symbol, round2(amount))
    }
}

fn round2(value: &BigDecimal) -> BigDecimal {
    value.round(2)
}

//! Commitment filter pipeline
//!
//! Fixed stage order: project, then client, then (after per-commitment
//! computation) currency. Each stage operates on the previous stage's output
//! and short-circuits with its own reason when it empties the set.

use crate::types::{Commitment, CommitmentBreakdown, EmptyReason, ReconOptions};

/// Apply the project and client stages over the full commitment list.
///
/// Returns the surviving commitments in their original order, or the reason
/// the set emptied. An empty input short-circuits before any stage runs.
pub fn narrow<'a>(
    commitments: &'a [Commitment],
    options: &ReconOptions,
) -> Result<Vec<&'a Commitment>, EmptyReason> {
    if commitments.is_empty() {
        return Err(EmptyReason::NoCommitments);
    }

    let mut scoped: Vec<&Commitment> = commitments.iter().collect();

    if let Some(filter) = options.project_filter() {
        let needle = filter.to_lowercase();
        scoped.retain(|c| c.project_name.to_lowercase().contains(&needle));
        if scoped.is_empty() {
            return Err(EmptyReason::NoProjectMatches);
        }
    }

    if let Some(filter) = options.client_filter() {
        let needle = filter.to_lowercase();
        scoped.retain(|c| {
            c.client
                .filterable_fields()
                .any(|field| field.to_lowercase().contains(&needle))
        });
        if scoped.is_empty() {
            return Err(EmptyReason::NoClientMatches);
        }
    }

    Ok(scoped)
}

/// Currency stage, applied to computed breakdowns: case-insensitive exact
/// match on the native currency code.
pub fn narrow_by_currency(
    breakdowns: Vec<CommitmentBreakdown>,
    code: &str,
) -> Result<Vec<CommitmentBreakdown>, EmptyReason> {
    let kept: Vec<CommitmentBreakdown> = breakdowns
        .into_iter()
        .filter(|b| b.currency_code.eq_ignore_ascii_case(code))
        .collect();

    if kept.is_empty() {
        return Err(EmptyReason::NoCurrencyMatches);
    }
    Ok(kept)
}

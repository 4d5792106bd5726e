//! Reconciliation pipeline and the source-backed orchestrator

use crate::engine::{aggregate, convert, filter};
use crate::traits::ReconSource;
use crate::types::*;

/// Run one reconciliation over already-fetched snapshots.
///
/// Pure function of its inputs: no I/O, no side effects, deterministic.
/// Every business "nothing to report" condition comes back as
/// [`ReconReport::Empty`]; this function has no error path.
pub fn reconcile(
    currencies: &[Currency],
    commitments: &[Commitment],
    payments: &[Payment],
    options: &ReconOptions,
) -> ReconReport {
    let index = CurrencyIndex::new(currencies);

    let mut scoped = match filter::narrow(commitments, options) {
        Ok(scoped) => scoped,
        Err(reason) => return ReconReport::Empty { reason },
    };

    let mut breakdowns: Vec<CommitmentBreakdown> = scoped
        .iter()
        .map(|commitment| aggregate::breakdown_commitment(commitment, payments, &index))
        .collect();

    if let Some(code) = options.currency_filter() {
        breakdowns = match filter::narrow_by_currency(breakdowns, code) {
            Ok(kept) => kept,
            Err(reason) => return ReconReport::Empty { reason },
        };
        // keep the commitment view aligned with the surviving breakdowns;
        // the reference-rate search below runs over this narrowed scope
        scoped.retain(|c| {
            index
                .code_symbol_of(&c.currency_id)
                .0
                .eq_ignore_ascii_case(code)
        });
    }

    if let Some(code) = options.display_filter() {
        let target = match index.by_code(code) {
            Some(currency) => currency.clone(),
            None => {
                return ReconReport::Empty {
                    reason: EmptyReason::CurrencyNotFound,
                }
            }
        };

        let scoped_payments: Vec<&Payment> = payments
            .iter()
            .filter(|p| scoped.iter().any(|c| c.id == p.commitment_id))
            .collect();

        let reference = match convert::reference_rate(&target, &scoped, &scoped_payments) {
            Some(rate) => rate,
            None => {
                return ReconReport::Empty {
                    reason: EmptyReason::NoReferenceRate,
                }
            }
        };

        breakdowns = breakdowns
            .iter()
            .map(|b| convert::reexpress(b, &target, &reference))
            .collect();
    }

    if breakdowns.len() == 1 {
        if let Some(commitment) = breakdowns.pop() {
            return ReconReport::Single { commitment };
        }
    }

    ReconReport::Summary(aggregate::summarize(breakdowns))
}

/// Source-backed orchestrator that fetches a snapshot and reconciles it
///
/// Generic over [`ReconSource`] so the same engine runs against any backend.
/// Async only at the fetch boundary; the computation itself never awaits.
pub struct Reconciler<S: ReconSource> {
    source: S,
}

impl<S: ReconSource> Reconciler<S> {
    /// Create a reconciler over the given source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch one snapshot and reconcile it under the given options.
    ///
    /// Business "nothing to report" conditions come back inside the report;
    /// only upstream fetch failures surface as [`ReconError::Source`].
    pub async fn reconcile(&self, options: &ReconOptions) -> ReconResult<ReconReport> {
        let currencies = self.source.list_currencies().await?;
        let commitments = self.source.list_commitments().await?;
        let payments = self.source.list_payments().await?;

        Ok(reconcile(&currencies, &commitments, &payments, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_source::MemorySource;
    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    fn currencies() -> (Currency, Currency) {
        let usd = Currency::new(
            Uuid::new_v4(),
            "USD".to_string(),
            "US Dollar".to_string(),
            "$".to_string(),
        );
        let ars = Currency::new(
            Uuid::new_v4(),
            "ARS".to_string(),
            "Argentine Peso".to_string(),
            "AR$".to_string(),
        );
        (usd, ars)
    }

    fn commitment_in(
        currency: &Currency,
        project: &str,
        client: ClientName,
        amount: i64,
        rate: i64,
    ) -> Commitment {
        Commitment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            currency.id,
            BigDecimal::from(amount),
        )
        .with_project_name(project.to_string())
        .with_client(client)
        .with_rate(BigDecimal::from(rate))
    }

    fn payment_against(commitment: &Commitment, currency: &Currency, amount: i64, rate: i64) -> Payment {
        Payment::new(
            Uuid::new_v4(),
            commitment.id,
            BigDecimal::from(amount),
            currency.id,
            BigDecimal::from(rate),
        )
    }

    #[test]
    fn test_no_commitments_reported_before_any_filter() {
        let (usd, ars) = currencies();
        let options = ReconOptions::new().project("torre".to_string());

        let report = reconcile(&[usd, ars], &[], &[], &options);

        assert_eq!(report.empty_reason(), Some(EmptyReason::NoCommitments));
    }

    #[test]
    fn test_single_commitment_full_computation() {
        let (usd, ars) = currencies();
        let commitment = commitment_in(
            &usd,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            1000,
            1,
        );
        let payments = vec![
            payment_against(&commitment, &usd, 300, 1),
            payment_against(&commitment, &ars, 200, 350),
        ];

        let report = reconcile(
            &[usd, ars],
            &[commitment],
            &payments,
            &ReconOptions::new(),
        );

        match report {
            ReconReport::Single { commitment } => {
                assert_eq!(commitment.paid, BigDecimal::from(70300));
                assert_eq!(commitment.remaining, BigDecimal::from(-69300));
                assert_eq!(commitment.client_name, "Carla Mendoza");
            }
            other => panic!("expected single breakdown, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_commitments_keep_per_currency_groups() {
        let (usd, ars) = currencies();
        let usd_commitment = commitment_in(
            &usd,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            100,
            1,
        );
        let ars_commitment = commitment_in(
            &ars,
            "Altos del Parque",
            ClientName::company("Hormigón SRL".to_string()),
            50000,
            350,
        );
        let payments = vec![
            payment_against(&usd_commitment, &usd, 100, 1),
            payment_against(&ars_commitment, &ars, 25000, 350),
        ];

        let report = reconcile(
            &[usd, ars],
            &[usd_commitment, ars_commitment],
            &payments,
            &ReconOptions::new(),
        );

        match report {
            ReconReport::Summary(summary) => {
                assert_eq!(summary.currency_groups.len(), 2);
                assert_eq!(summary.currency_groups[0].currency_code, "USD");
                assert_eq!(summary.currency_groups[0].payment_percentage, BigDecimal::from(100));
                assert_eq!(summary.currency_groups[1].currency_code, "ARS");
                assert_eq!(summary.currency_groups[1].total_remaining, BigDecimal::from(25000));
                assert!(summary.grand_totals().is_none());
            }
            other => panic!("expected summary, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_stages_report_in_fixed_order() {
        let (usd, ars) = currencies();
        let commitment = commitment_in(
            &usd,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            1000,
            1,
        );
        let reference = vec![usd, ars];
        let commitments = vec![commitment];

        let project_miss = ReconOptions::new()
            .project("missing".to_string())
            .client("missing".to_string())
            .currency("ARS".to_string());
        assert_eq!(
            reconcile(&reference, &commitments, &[], &project_miss).empty_reason(),
            Some(EmptyReason::NoProjectMatches)
        );

        let client_miss = ReconOptions::new()
            .project("torre".to_string())
            .client("missing".to_string());
        assert_eq!(
            reconcile(&reference, &commitments, &[], &client_miss).empty_reason(),
            Some(EmptyReason::NoClientMatches)
        );

        let currency_miss = ReconOptions::new().currency("ARS".to_string());
        assert_eq!(
            reconcile(&reference, &commitments, &[], &currency_miss).empty_reason(),
            Some(EmptyReason::NoCurrencyMatches)
        );
    }

    #[test]
    fn test_currency_filter_matches_case_insensitively() {
        let (usd, ars) = currencies();
        let usd_commitment = commitment_in(
            &usd,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            1000,
            1,
        );
        let ars_commitment = commitment_in(
            &ars,
            "Torre Norte",
            ClientName::full("Diego Paz".to_string()),
            5000,
            350,
        );

        let report = reconcile(
            &[usd, ars],
            &[usd_commitment, ars_commitment],
            &[],
            &ReconOptions::new().currency("usd".to_string()),
        );

        match report {
            ReconReport::Single { commitment } => {
                assert_eq!(commitment.currency_code, "USD");
            }
            other => panic!("expected single breakdown, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_display_currency() {
        let (usd, ars) = currencies();
        let commitment = commitment_in(
            &usd,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            1000,
            1,
        );

        let report = reconcile(
            &[usd, ars],
            &[commitment],
            &[],
            &ReconOptions::new().display_in("EUR".to_string()),
        );

        assert_eq!(report.empty_reason(), Some(EmptyReason::CurrencyNotFound));
    }

    #[test]
    fn test_display_currency_with_no_reference_rate() {
        let (usd, ars) = currencies();
        let commitment = commitment_in(
            &ars,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            5000,
            350,
        );
        let payments = vec![payment_against(&commitment, &ars, 1000, 350)];

        // USD exists in the reference data but no in-scope record uses it
        let report = reconcile(
            &[usd, ars],
            &[commitment],
            &payments,
            &ReconOptions::new().display_in("USD".to_string()),
        );

        assert_eq!(report.empty_reason(), Some(EmptyReason::NoReferenceRate));
    }

    #[test]
    fn test_display_conversion_collapses_to_one_group() {
        let (usd, ars) = currencies();
        let usd_commitment = commitment_in(
            &usd,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            1000,
            1,
        );
        let ars_commitment = commitment_in(
            &ars,
            "Torre Norte",
            ClientName::full("Diego Paz".to_string()),
            700,
            350,
        );
        let payments = vec![payment_against(&usd_commitment, &usd, 300, 1)];

        let report = reconcile(
            &[usd, ars],
            &[usd_commitment, ars_commitment],
            &payments,
            &ReconOptions::new().display_in("usd".to_string()),
        );

        match report {
            ReconReport::Summary(summary) => {
                assert_eq!(summary.currency_groups.len(), 1);
                let totals = summary.grand_totals().unwrap();
                assert_eq!(totals.currency_code, "USD");
                // 1000 + 700 * (350 / 1)
                assert_eq!(totals.total_committed, BigDecimal::from(246000));
                assert_eq!(totals.total_paid, BigDecimal::from(300));
                assert!(summary
                    .commitments
                    .iter()
                    .all(|b| b.currency_code == "USD" && b.exchange_rate == BigDecimal::from(1)));
            }
            other => panic!("expected summary, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_rate_found_among_payments() {
        let (usd, ars) = currencies();
        let commitment = commitment_in(
            &ars,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            700,
            350,
        );
        // A dollar payment against the peso commitment anchors the rate
        let payments = vec![payment_against(&commitment, &usd, 100, 700)];

        let report = reconcile(
            &[usd, ars],
            &[commitment],
            &payments,
            &ReconOptions::new().display_in("USD".to_string()),
        );

        match report {
            ReconReport::Single { commitment } => {
                assert_eq!(commitment.currency_code, "USD");
                assert_eq!(commitment.exchange_rate, BigDecimal::from(700));
                // committed 700 at rate 350 becomes 350 at rate 700
                assert_eq!(commitment.committed, BigDecimal::from(350));
                // the payment converted into ARS as 100 * (700 / 350) = 200,
                // then back out at the reference rate as 200 * (350 / 700)
                assert_eq!(commitment.paid, BigDecimal::from(100));
            }
            other => panic!("expected single breakdown, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reconciler_runs_against_a_source() {
        let (usd, ars) = currencies();
        let commitment = commitment_in(
            &usd,
            "Torre Norte",
            ClientName::full("Carla Mendoza".to_string()),
            1000,
            1,
        );
        let payment = payment_against(&commitment, &usd, 300, 1);

        let source = MemorySource::new();
        source.add_currency(usd).unwrap();
        source.add_currency(ars).unwrap();
        source.add_commitment(commitment).unwrap();
        source.add_payment(payment).unwrap();

        let reconciler = Reconciler::new(source);
        let report = reconciler.reconcile(&ReconOptions::new()).await.unwrap();

        match report {
            ReconReport::Single { commitment } => {
                assert_eq!(commitment.paid, BigDecimal::from(300));
                assert_eq!(commitment.remaining, BigDecimal::from(700));
            }
            other => panic!("expected single breakdown, got {:?}", other),
        }
    }
}

//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Display name used when a client record carries no usable name field.
pub const UNKNOWN_CLIENT: &str = "unknown client";

/// Coerce a stored exchange rate: absent or zero rates read as `1`.
///
/// A zero rate is invalid data and must never reach a division; coercing it
/// to `1` reduces conversion to the equal-currency pass-through case.
pub fn effective_rate(rate: Option<&BigDecimal>) -> BigDecimal {
    match rate {
        Some(r) if *r != BigDecimal::from(0) => r.clone(),
        _ => BigDecimal::from(1),
    }
}

/// Currency reference data, immutable for the duration of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// Unique identifier for the currency
    pub id: Uuid,
    /// ISO-like code (e.g. "USD", "ARS")
    pub code: String,
    /// Human-readable name
    pub name: String,
    /// Display symbol (e.g. "$")
    pub symbol: String,
}

impl Currency {
    /// Create a new currency record
    pub fn new(id: Uuid, code: String, name: String, symbol: String) -> Self {
        Self {
            id,
            code,
            name,
            symbol,
        }
    }
}

/// Indexed lookup over the currency reference list.
///
/// Cardinality is expected to stay small (a handful of currencies per
/// tenant); the index exists to make the by-id and by-code lookups explicit
/// and testable independent of list size.
#[derive(Debug, Clone, Default)]
pub struct CurrencyIndex {
    currencies: Vec<Currency>,
    by_id: HashMap<Uuid, usize>,
    by_code: HashMap<String, usize>,
}

impl CurrencyIndex {
    /// Build an index over the supplied reference data. A duplicate id or
    /// code keeps the later record, like a keyed upsert.
    pub fn new(currencies: &[Currency]) -> Self {
        let currencies = currencies.to_vec();
        let mut by_id = HashMap::new();
        let mut by_code = HashMap::new();
        for (i, currency) in currencies.iter().enumerate() {
            by_id.insert(currency.id, i);
            by_code.insert(currency.code.to_uppercase(), i);
        }
        Self {
            currencies,
            by_id,
            by_code,
        }
    }

    /// Look up a currency by identifier
    pub fn by_id(&self, id: &Uuid) -> Option<&Currency> {
        self.by_id.get(id).map(|&i| &self.currencies[i])
    }

    /// Look up a currency by code, case-insensitively
    pub fn by_code(&self, code: &str) -> Option<&Currency> {
        self.by_code
            .get(&code.to_uppercase())
            .map(|&i| &self.currencies[i])
    }

    /// Code and symbol for an id, falling back to empty strings when the id
    /// cannot be resolved. Unresolvable currencies therefore compare equal
    /// to each other and never to a known code.
    pub fn code_symbol_of(&self, id: &Uuid) -> (String, String) {
        self.by_id(id)
            .map(|c| (c.code.clone(), c.symbol.clone()))
            .unwrap_or_default()
    }
}

/// Client display fields as stored on the backend contact record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientName {
    /// Single full-name field, preferred when present
    pub full_name: Option<String>,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Company name, used when no personal name is present
    pub company_name: Option<String>,
}

impl ClientName {
    /// Client known by first/last name
    pub fn person(first: String, last: String) -> Self {
        Self {
            first_name: Some(first),
            last_name: Some(last),
            ..Self::default()
        }
    }

    /// Client known by a company name
    pub fn company(name: String) -> Self {
        Self {
            company_name: Some(name),
            ..Self::default()
        }
    }

    /// Client known by a single full-name field
    pub fn full(name: String) -> Self {
        Self {
            full_name: Some(name),
            ..Self::default()
        }
    }

    /// Resolve the display name via the fallback chain: full name, then
    /// "first last" joining only the non-empty parts, then company name,
    /// then the [`UNKNOWN_CLIENT`] sentinel.
    pub fn display_name(&self) -> String {
        if let Some(full) = present(&self.full_name) {
            return full.to_string();
        }
        let joined = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| present(part))
            .collect::<Vec<_>>()
            .join(" ");
        if !joined.is_empty() {
            return joined;
        }
        if let Some(company) = present(&self.company_name) {
            return company.to_string();
        }
        UNKNOWN_CLIENT.to_string()
    }

    /// Every present display field, for substring filtering
    pub(crate) fn filterable_fields(&self) -> impl Iterator<Item = &str> {
        [
            &self.full_name,
            &self.first_name,
            &self.last_name,
            &self.company_name,
        ]
        .into_iter()
        .filter_map(present)
    }
}

/// None and blank strings alike count as absent display fields.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A client's agreed payment obligation for a unit within a project.
///
/// Exactly one currency and one exchange rate per commitment; the rate is
/// commitment-local, recorded at creation time, not a global quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    /// Unique identifier for the commitment
    pub id: Uuid,
    /// Project the commitment belongs to
    pub project_id: Uuid,
    /// Denormalized project name, matched by the project filter
    pub project_name: String,
    /// Client that owes the commitment
    pub client_id: Uuid,
    /// Client display fields for name resolution and filtering
    pub client: ClientName,
    /// Optional unit label (e.g. an apartment or lot number)
    pub unit: Option<String>,
    /// Agreed amount; absent reads as 0
    pub committed_amount: Option<BigDecimal>,
    /// Currency the amount is denominated in
    pub currency_id: Uuid,
    /// Exchange rate at the time the commitment was created; absent or zero
    /// reads as 1
    pub exchange_rate: Option<BigDecimal>,
    /// When the commitment was created
    pub created_at: NaiveDateTime,
}

impl Commitment {
    /// Create a commitment; display fields and the rate start unset
    pub fn new(
        id: Uuid,
        project_id: Uuid,
        client_id: Uuid,
        currency_id: Uuid,
        committed_amount: BigDecimal,
    ) -> Self {
        Self {
            id,
            project_id,
            project_name: String::new(),
            client_id,
            client: ClientName::default(),
            unit: None,
            committed_amount: Some(committed_amount),
            currency_id,
            exchange_rate: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Set the denormalized project name
    pub fn with_project_name(mut self, name: String) -> Self {
        self.project_name = name;
        self
    }

    /// Set the client display fields
    pub fn with_client(mut self, client: ClientName) -> Self {
        self.client = client;
        self
    }

    /// Set the unit label
    pub fn with_unit(mut self, unit: String) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Set the creation-time exchange rate
    pub fn with_rate(mut self, rate: BigDecimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// Committed amount with the missing-amount coercion applied (absent → 0)
    pub fn committed(&self) -> BigDecimal {
        self.committed_amount
            .clone()
            .unwrap_or_else(|| BigDecimal::from(0))
    }

    /// Creation-time exchange rate with the coercion rules applied (absent or
    /// zero → 1)
    pub fn rate(&self) -> BigDecimal {
        effective_rate(self.exchange_rate.as_ref())
    }
}

/// An actual transfer applied against exactly one commitment.
///
/// The `commitment_id` association is what prevents double counting when a
/// client holds several commitments in the same project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment row
    pub id: Uuid,
    /// Commitment this payment satisfies
    pub commitment_id: Uuid,
    /// Recorded amount; the sign is ignored, absent reads as 0
    pub amount: Option<BigDecimal>,
    /// Currency the payment was made in
    pub currency_id: Uuid,
    /// Exchange rate at the time the payment was made; absent or zero reads
    /// as 1
    pub exchange_rate: Option<BigDecimal>,
}

impl Payment {
    /// Create a payment row
    pub fn new(
        id: Uuid,
        commitment_id: Uuid,
        amount: BigDecimal,
        currency_id: Uuid,
        exchange_rate: BigDecimal,
    ) -> Self {
        Self {
            id,
            commitment_id,
            amount: Some(amount),
            currency_id,
            exchange_rate: Some(exchange_rate),
        }
    }

    /// Contribution of this payment: the absolute value of the recorded
    /// amount, absent reads as 0. A payment is always a positive
    /// contribution regardless of how the row was signed upstream.
    pub fn contribution(&self) -> BigDecimal {
        self.amount
            .as_ref()
            .map(|a| a.abs())
            .unwrap_or_else(|| BigDecimal::from(0))
    }

    /// Payment-time exchange rate with the coercion rules applied (absent or
    /// zero → 1)
    pub fn rate(&self) -> BigDecimal {
        effective_rate(self.exchange_rate.as_ref())
    }
}

/// Filter and conversion options for one reconciliation run.
///
/// All fields are optional and independently combinable. Blank strings are
/// treated as absent options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconOptions {
    /// Case-insensitive substring filter on the project name
    pub project_name: Option<String>,
    /// Case-insensitive substring filter on the client display fields
    pub client_name: Option<String>,
    /// Case-insensitive exact filter on the commitment's native currency code
    pub currency_code: Option<String>,
    /// Code of the currency every result should be re-expressed in
    pub display_currency: Option<String>,
}

impl ReconOptions {
    /// Options with no filters and no conversion
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter commitments by project name
    pub fn project(mut self, name: String) -> Self {
        self.project_name = Some(name);
        self
    }

    /// Filter commitments by client name
    pub fn client(mut self, name: String) -> Self {
        self.client_name = Some(name);
        self
    }

    /// Filter commitments by native currency code
    pub fn currency(mut self, code: String) -> Self {
        self.currency_code = Some(code);
        self
    }

    /// Re-express every result in the given currency
    pub fn display_in(mut self, code: String) -> Self {
        self.display_currency = Some(code);
        self
    }

    pub(crate) fn project_filter(&self) -> Option<&str> {
        normalized(&self.project_name)
    }

    pub(crate) fn client_filter(&self) -> Option<&str> {
        normalized(&self.client_name)
    }

    pub(crate) fn currency_filter(&self) -> Option<&str> {
        normalized(&self.currency_code)
    }

    pub(crate) fn display_filter(&self) -> Option<&str> {
        normalized(&self.display_currency)
    }
}

fn normalized(option: &Option<String>) -> Option<&str> {
    option.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Paid/remaining/percentage figures computed for one commitment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentBreakdown {
    /// Client display name resolved via the fallback chain
    pub client_name: String,
    /// Project the commitment belongs to
    pub project_name: String,
    /// Optional unit label
    pub unit: Option<String>,
    /// Committed amount in the breakdown's currency
    pub committed: BigDecimal,
    /// Total paid, with cross-currency payments normalized in
    pub paid: BigDecimal,
    /// committed − paid; negative when overpaid
    pub remaining: BigDecimal,
    /// paid / committed × 100; 0 when nothing was committed
    pub payment_percentage: BigDecimal,
    /// 100 − payment_percentage
    pub remaining_percentage: BigDecimal,
    /// Code of the currency the figures are expressed in
    pub currency_code: String,
    /// Symbol of that currency
    pub currency_symbol: String,
    /// Exchange rate the figures are expressed under
    pub exchange_rate: BigDecimal,
    /// Number of payments that contributed to `paid`
    pub payment_count: usize,
}

/// Totals for every in-scope commitment sharing one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyGroup {
    /// Code of the group's currency
    pub currency_code: String,
    /// Symbol of the group's currency
    pub currency_symbol: String,
    /// Sum of committed amounts
    pub total_committed: BigDecimal,
    /// Sum of paid amounts
    pub total_paid: BigDecimal,
    /// total_committed − total_paid
    pub total_remaining: BigDecimal,
    /// total_paid / total_committed × 100; 0 when nothing was committed
    pub payment_percentage: BigDecimal,
    /// Number of commitments in the group
    pub commitment_count: usize,
}

/// Aggregate view over multiple commitments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconSummary {
    /// Per-commitment breakdowns in their original relative order
    pub commitments: Vec<CommitmentBreakdown>,
    /// Per-currency totals, ordered by first encounter (never sorted)
    pub currency_groups: Vec<CurrencyGroup>,
}

impl ReconSummary {
    /// Combined totals across every in-scope commitment.
    ///
    /// Available only when a single currency group remains (always the case
    /// after display-currency conversion); amounts in different currencies
    /// are never summed.
    pub fn grand_totals(&self) -> Option<&CurrencyGroup> {
        match self.currency_groups.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }
}

/// Why a reconciliation run produced no figures.
///
/// These are reported outcomes, not errors; each filter stage and conversion
/// step empties the set under its own variant so callers can explain exactly
/// which stage stopped the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// The source supplied no commitments at all
    NoCommitments,
    /// The project-name filter emptied the set
    NoProjectMatches,
    /// The client-name filter emptied the set
    NoClientMatches,
    /// The currency-code filter emptied the set
    NoCurrencyMatches,
    /// The requested display currency is not in the reference data
    CurrencyNotFound,
    /// No in-scope commitment or payment is denominated in the display
    /// currency, so no reference rate exists for conversion
    NoReferenceRate,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCommitments => write!(f, "no_commitments"),
            Self::NoProjectMatches => write!(f, "no_project_matches"),
            Self::NoClientMatches => write!(f, "no_client_matches"),
            Self::NoCurrencyMatches => write!(f, "no_currency_matches"),
            Self::CurrencyNotFound => write!(f, "currency_not_found"),
            Self::NoReferenceRate => write!(f, "no_reference_rate"),
        }
    }
}

/// Result of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReconReport {
    /// Nothing to report; the reason identifies the stage that emptied the set
    Empty {
        /// Stage-specific reason code
        reason: EmptyReason,
    },
    /// Exactly one commitment survived filtering
    Single {
        /// The full per-commitment computation
        commitment: CommitmentBreakdown,
    },
    /// Multiple commitments survived filtering
    Summary(ReconSummary),
}

impl ReconReport {
    /// True when the run produced no figures
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// Reason code when the run produced no figures
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            Self::Empty { reason } => Some(*reason),
            _ => None,
        }
    }

    /// Every breakdown in the report, in original order
    pub fn breakdowns(&self) -> &[CommitmentBreakdown] {
        match self {
            Self::Empty { .. } => &[],
            Self::Single { commitment } => std::slice::from_ref(commitment),
            Self::Summary(summary) => &summary.commitments,
        }
    }
}

/// Errors that can occur at the reconciliation boundary.
///
/// The engine itself never fails for business conditions; those are reported
/// through [`ReconReport::Empty`].
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Data source error: {0}")]
    Source(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for reconciliation boundary operations.
pub type ReconResult<T> = Result<T, ReconError>;

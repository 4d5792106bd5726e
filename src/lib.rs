//! # Recon Core
//!
//! A client-payment reconciliation library for construction project
//! management: payment commitments and the payments applied against them
//! live in arbitrary currencies, each carrying its own historical exchange
//! rate, and reconcile into per-commitment and aggregate figures.
//!
//! ## Features
//!
//! - **Cross-currency normalization**: payments convert into their
//!   commitment's currency through the stored historical rates
//! - **Filter pipeline**: project, client, and currency filters, with a
//!   distinct reason code for every empty outcome
//! - **Display-currency re-expression**: results optionally re-expressed in
//!   a third currency, anchored to a rate found among the matching records
//! - **Aggregate reporting**: per-currency groups in first-encounter order,
//!   single-commitment detail, explanatory empty outcomes
//! - **Source abstraction**: backend-agnostic design with a trait-based
//!   data source
//!
//! ## Quick Start
//!
//! ```rust
//! use recon_core::{reconcile, Commitment, Currency, Payment, ReconOptions, ReconReport};
//! use bigdecimal::BigDecimal;
//! use uuid::Uuid;
//!
//! let usd = Currency::new(
//!     Uuid::new_v4(),
//!     "USD".to_string(),
//!     "US Dollar".to_string(),
//!     "$".to_string(),
//! );
//! let commitment = Commitment::new(
//!     Uuid::new_v4(),
//!     Uuid::new_v4(),
//!     Uuid::new_v4(),
//!     usd.id,
//!     BigDecimal::from(1000),
//! );
//! let payment = Payment::new(
//!     Uuid::new_v4(),
//!     commitment.id,
//!     BigDecimal::from(300),
//!     usd.id,
//!     BigDecimal::from(1),
//! );
//!
//! let report = reconcile(&[usd], &[commitment], &[payment], &ReconOptions::new());
//! assert!(matches!(report, ReconReport::Single { .. }));
//! ```

pub mod engine;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use engine::*;
pub use traits::*;
pub use types::*;

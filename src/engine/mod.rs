//! Reconciliation engine containing conversion, filtering and aggregation

pub mod aggregate;
pub mod convert;
pub mod core;
pub mod filter;

pub use self::aggregate::*;
pub use self::convert::*;
pub use self::core::*;
pub use self::filter::*;

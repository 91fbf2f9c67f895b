//! af-core: stable foundation for atomflow.
//!
//! Contains:
//! - units (uom SI types + constructors in catalog units)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{AfError, AfResult};
pub use numeric::*;
pub use units::*;

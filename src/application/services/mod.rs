//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (TreeSource, ErrorReporter)
//! but are themselves concrete structs, not traits.

mod filter;

pub use filter::{FilterQuery, FilterService};

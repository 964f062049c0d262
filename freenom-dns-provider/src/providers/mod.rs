//! DNS Provider implementations

mod freenom;

pub use freenom::FreenomProvider;

/// Provider identifier carried in every error and log line.
pub(crate) const PROVIDER_NAME: &str = "freenom";

//! # freenom-dns-provider
//!
//! DNS record management for domains registered at the
//! [Freenom](https://my.freenom.com/) client area.
//!
//! The client area offers no API. The provider logs in with a cookie session,
//! scrapes the account's domain listing and the zone's DNS management page, and
//! submits the same forms a browser would. Every mutation is followed by a fresh
//! fetch, and the operation returns the requested records that fetch confirms.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use freenom_dns_provider::{
//!     create_provider, ProviderConfig, Record, RecordProvider, RecordType,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // FREENOM_USERNAME / FREENOM_PASSWORD
//!     let provider = create_provider(ProviderConfig::from_env()?)?;
//!
//!     for record in provider.list_records("example.tk").await? {
//!         println!("{record}");
//!     }
//!
//!     let desired = vec![Record::new(RecordType::A, "www", "192.0.2.10", 3600)];
//!     let confirmed = provider.set_records("example.tk", &desired).await?;
//!     if confirmed.len() < desired.len() {
//!         eprintln!("panel accepted only {} records", confirmed.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Operations
//!
//! | Operation | Effect | Returns |
//! |-----------|--------|---------|
//! | [`RecordProvider::list_records`] | none | records in page order |
//! | [`RecordProvider::append_records`] | adds every record as a new row | requested records present afterwards |
//! | [`RecordProvider::set_records`] | converges rows by type+name, keeps the rest | requested records present afterwards |
//! | [`RecordProvider::delete_records`] | removes rows equal to a requested record | requested records absent afterwards |
//!
//! A confirmed subset shorter than the request is a partial application, not an
//! error.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`] — the panel rejected the login
//! - [`ProviderError::DomainNotFound`] — the zone is not in the account's domain list
//! - [`ProviderError::PageShape`] — a page no longer looks the way this client expects
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`] — transport failure
//!
//! Nothing is retried. Credential and page-shape errors reset the session, so
//! the next call logs in again.

mod config;
mod error;
mod factory;
mod http_client;
mod providers;
mod reconcile;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export configuration
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_BASE_URL,
    ENV_PASSWORD, ENV_USERNAME, ProviderConfig,
};

// Re-export factory functions
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::RecordProvider;

// Re-export reconciliation
pub use reconcile::{ReconcilePlan, RowEdit, confirmed_absent, confirmed_present};

// Re-export types
pub use types::{CredentialValidationError, Credentials, Record, RecordType, SessionState, Zone};

// Re-export concrete provider
pub use providers::FreenomProvider;

//! Provider factory functions.

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::providers::{FreenomProvider, PROVIDER_NAME};
use crate::traits::RecordProvider;

/// Creates a [`RecordProvider`] from the given configuration.
///
/// Credentials are validated for presence before any network activity. The
/// returned provider is wrapped in `Arc<dyn RecordProvider>` so one session can
/// be shared across async tasks; its operations serialize on that session.
///
/// # Examples
///
/// ```rust,no_run
/// use freenom_dns_provider::{create_provider, Credentials, ProviderConfig};
///
/// let provider = create_provider(ProviderConfig::new(Credentials {
///     username: "me@example.com".to_string(),
///     password: "secret".to_string(),
/// }))
/// .unwrap();
/// ```
pub fn create_provider(config: ProviderConfig) -> Result<Arc<dyn RecordProvider>> {
    config
        .credentials
        .validate()
        .map_err(|e| ProviderError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: "credentials".to_string(),
            detail: e.to_string(),
        })?;
    Ok(Arc::new(FreenomProvider::new(config)?))
}

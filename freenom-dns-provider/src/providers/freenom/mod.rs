//! Freenom client-area DNS Provider
//!
//! The client area has no API. Every operation logs in with a cookie session,
//! scrapes the domain listing and the zone's DNS management page, and submits
//! the same forms a browser would.

mod error;
mod extract;
mod fetch;
mod form;
mod provider;
mod session;
mod types;

use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::PROVIDER_NAME;
use crate::types::{Credentials, SessionState};

pub(crate) use types::{DomainRow, FormFields, PageRow, ZonePage};

/// Public login page, also the `Referer` of the login POST.
pub(crate) const LOGIN_PAGE_PATH: &str = "clientarea.php";
/// Login form target.
pub(crate) const LOGIN_ACTION_PATH: &str = "dologin.php";
/// Account domain listing.
pub(crate) const DOMAINS_PAGE_PATH: &str = "clientarea.php?action=domains";
/// Text the panel renders when the login is rejected.
pub(crate) const INVALID_LOGIN_MARKER: &str = "Login Details Incorrect";

/// Freenom DNS provider.
///
/// One instance owns one cookie session. Operations are serialized on the
/// session lock, so a page and the form built from it are never interleaved
/// with another operation's requests.
///
/// # Construction
///
/// ```rust,no_run
/// use freenom_dns_provider::{Credentials, FreenomProvider, ProviderConfig};
///
/// let provider = FreenomProvider::new(ProviderConfig::new(Credentials {
///     username: "me@example.com".to_string(),
///     password: "secret".to_string(),
/// }))
/// .unwrap();
/// ```
pub struct FreenomProvider {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) credentials: Credentials,
    pub(crate) session: Mutex<SessionState>,
}

impl FreenomProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let base = format!("{}/", config.normalized_base_url());
        let base_url = Url::parse(&base).map_err(|e| ProviderError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: "baseUrl".to_string(),
            detail: format!("{base}: {e}"),
        })?;

        Ok(Self {
            client: HttpUtils::create_client(config.connect_timeout(), config.request_timeout())?,
            base_url,
            credentials: config.credentials,
            session: Mutex::new(SessionState::Unauthenticated),
        })
    }

    /// Current session state, for diagnostics.
    pub async fn session_state(&self) -> SessionState {
        *self.session.lock().await
    }

    /// Resolve a panel-relative path or a `/...` href against the base URL.
    ///
    /// The panel's own hrefs are root-absolute; they stay under the base path
    /// so a panel mounted below a prefix keeps working.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        self.base_url
            .join(relative)
            .map_err(|e| ProviderError::InvalidParameter {
                provider: PROVIDER_NAME.to_string(),
                param: "url".to_string(),
                detail: format!("{path}: {e}"),
            })
    }

    /// Zone management page, keyed by zone name and numeric domain id.
    pub(crate) fn zone_url(&self, zone: &str, domain_id: &str) -> Result<Url> {
        self.url(&format!(
            "clientarea.php?managedns={}&domainid={}",
            urlencoding::encode(zone),
            urlencoding::encode(domain_id)
        ))
    }
}

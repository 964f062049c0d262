use serde::{Deserialize, Serialize};

/// Unified error type for all panel operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Terminal Errors
///
/// Nothing is retried. Every variant aborts the operation that produced it and no
/// partial result is returned. Partial *application* of a mutation is not an error;
/// it shows up as a confirmed subset smaller than the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// A page request came back with a non-success HTTP status.
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The panel rejected the login (invalid-credentials marker on the response page).
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Marker text or message found on the page, if available.
        raw_message: Option<String>,
    },

    /// The requested zone is not in the account's domain list.
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone name that was not found.
        domain: String,
        /// Extra context, if available.
        raw_message: Option<String>,
    },

    /// A fetched page did not contain an element this client relies on.
    ///
    /// Signals that the panel's layout changed or the service is degraded.
    PageShape {
        /// Provider that produced the error.
        provider: String,
        /// Which page was being read (e.g. `"login"`, `"domains"`, `"zone"`).
        page: String,
        /// What was missing or malformed.
        detail: String,
    },

    /// A caller-supplied value cannot be expressed in the panel's forms.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::DomainNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether the authenticated session can no longer be trusted after this error.
    #[must_use]
    pub fn invalidates_session(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::PageShape { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::HttpStatus {
                provider,
                status,
                url,
            } => {
                write!(f, "[{provider}] HTTP {status} from {url}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' not found")
                }
            }
            Self::PageShape {
                provider,
                page,
                detail,
            } => {
                write!(f, "[{provider}] Unexpected {page} page layout: {detail}")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

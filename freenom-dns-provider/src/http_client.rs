//! Generic HTTP client tools
//!
//! Every page request goes through [`HttpUtils::execute_request`], which sends the
//! request, logs it, maps transport failures and returns the page body.
//!
//! # design principles
//! - **No retries** - a failed round trip surfaces immediately to the caller
//! - **Status is checked, content is not** - interpreting the page is the caller's job
//! - **Bodies are truncated in logs** - pages are large and may echo account data

use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::{ProviderError, Result};
use crate::providers::PROVIDER_NAME;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Create the cookie-carrying client shared by one provider instance.
    ///
    /// Redirects are followed, so a login POST lands on whatever page the panel
    /// redirects to and its body is what gets inspected.
    pub fn create_client(connect_timeout: Duration, request_timeout: Duration) -> Result<Client> {
        Client::builder()
            .cookie_store(true)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| Self::network_error(&e))
    }

    /// Performs an HTTP request and returns the response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, form body)
    /// * `method_name` - request method name (such as "GET", "POST", used for logs)
    /// * `url` - request URL (for logging and error context)
    ///
    /// # Returns
    /// * `Ok(response_text)` - body of a 2xx response
    /// * `Err(ProviderError::Timeout | NetworkError)` - transport failure
    /// * `Err(ProviderError::HttpStatus)` - any other status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<String> {
        log::debug!("[{PROVIDER_NAME}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| Self::network_error(&e))?;

        let status = response.status();
        log::debug!("[{PROVIDER_NAME}] Response Status: {status}");

        if !status.is_success() {
            log::warn!("[{PROVIDER_NAME}] {method_name} {url} returned HTTP {status}");
            return Err(ProviderError::HttpStatus {
                provider: PROVIDER_NAME.to_string(),
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: PROVIDER_NAME.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{PROVIDER_NAME}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok(response_text)
    }

    fn network_error(e: &reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout {
                provider: PROVIDER_NAME.to_string(),
                detail: e.to_string(),
            }
        } else {
            ProviderError::NetworkError {
                provider: PROVIDER_NAME.to_string(),
                detail: e.to_string(),
            }
        }
    }
}

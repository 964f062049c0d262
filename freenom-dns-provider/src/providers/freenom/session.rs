//! 登录与会话状态

use std::sync::LazyLock;

use reqwest::header::REFERER;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::PROVIDER_NAME;
use crate::traits::{PageErrorMapper, PageKind};
use crate::types::SessionState;
use crate::utils::log_sanitizer::redact_form;

use super::error::PageErrors;
use super::extract::css;
use super::{FormFields, FreenomProvider, INVALID_LOGIN_MARKER, LOGIN_ACTION_PATH, LOGIN_PAGE_PATH};

/// Login form of the public client-area page.
const LOGIN_FORM: &str = "form.form-stacked";

pub(super) static LOGIN_FORM_SEL: LazyLock<Selector> = LazyLock::new(|| css(LOGIN_FORM));
static TOKEN_INPUT_SEL: LazyLock<Selector> = LazyLock::new(|| css(r#"input[name="token"]"#));

/// Anti-forgery token of the login form.
pub(super) fn parse_login_token(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let form = document
        .select(&LOGIN_FORM_SEL)
        .next()
        .ok_or_else(|| PageErrors.shape_error(PageKind::Login, "login form not found"))?;

    form.select(&TOKEN_INPUT_SEL)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or_else(|| PageErrors.shape_error(PageKind::Login, "token input not found"))
}

impl FreenomProvider {
    /// Log in with the configured credentials.
    ///
    /// The cookie store keeps whatever session cookies the panel sets.
    async fn login(&self) -> Result<()> {
        let login_url = self.url(LOGIN_PAGE_PATH)?;
        let page = HttpUtils::execute_request(
            self.client.get(login_url.clone()),
            "GET",
            login_url.as_str(),
        )
        .await?;
        let token = parse_login_token(&page)?;

        let mut form = FormFields::new();
        form.push("token", token);
        form.push("username", self.credentials.username.as_str());
        form.push("password", self.credentials.password.as_str());
        form.push("rememberme", "on");

        let action_url = self.url(LOGIN_ACTION_PATH)?;
        log::debug!(
            "[{PROVIDER_NAME}] Login Form: {}",
            redact_form(form.as_pairs())
        );
        let request = self
            .client
            .post(action_url.clone())
            .header(REFERER, login_url.as_str())
            .form(form.as_pairs());
        let body = HttpUtils::execute_request(request, "POST", action_url.as_str()).await?;

        if body.contains(INVALID_LOGIN_MARKER) {
            return Err(self.invalid_credentials(Some(INVALID_LOGIN_MARKER.to_string())));
        }

        log::info!("[{PROVIDER_NAME}] Logged in");
        Ok(())
    }

    /// Log in unless the session is already authenticated.
    ///
    /// `state` is the guarded session state; the caller holds the lock for the
    /// whole operation.
    pub(super) async fn ensure_authenticated(&self, state: &mut SessionState) -> Result<()> {
        if *state == SessionState::Authenticated {
            return Ok(());
        }
        self.login().await?;
        *state = SessionState::Authenticated;
        Ok(())
    }
}

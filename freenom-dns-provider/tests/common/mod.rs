//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use freenom_dns_provider::{
    Credentials, ProviderConfig, Record, RecordProvider, create_provider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const TEST_USERNAME: &str = "me@example.com";
pub const TEST_PASSWORD: &str = "hunter2";
pub const LOGIN_TOKEN: &str = "3f2a9c";
pub const ZONE_TOKEN: &str = "77b1e0";

// ============ 页面模板 ============

pub fn login_page() -> String {
    format!(
        r#"<!DOCTYPE html><html><body>
<form class="form-stacked" action="dologin.php" method="post">
  <input type="hidden" name="token" value="{LOGIN_TOKEN}">
  <input type="text" name="username">
  <input type="password" name="password">
  <input type="checkbox" name="rememberme">
</form></body></html>"#
    )
}

pub fn login_rejected_page() -> String {
    format!(
        r#"<!DOCTYPE html><html><body>
<div class="alert alert-error">Login Details Incorrect. Please try again.</div>
<form class="form-stacked" action="dologin.php" method="post">
  <input type="hidden" name="token" value="{LOGIN_TOKEN}">
</form></body></html>"#
    )
}

pub fn client_area_page() -> String {
    r#"<!DOCTYPE html><html><body><h1>Client Area</h1><p>Welcome back</p></body></html>"#
        .to_string()
}

pub fn domains_page(domains: &[(&str, &str)]) -> String {
    let rows: String = domains
        .iter()
        .map(|(name, id)| {
            format!(
                r#"<tr>
  <td class="second"><a href="http://{name}/" target="_blank">{name}</a></td>
  <td class="third">2026-01-01</td>
  <td class="seventh"><div class="manageDomain"><a href="clientarea.php?action=domaindetails&amp;id={id}">Manage Domain</a></div></td>
</tr>"#
            )
        })
        .collect();
    format!(
        r#"<!DOCTYPE html><html><body><table class="table"><tbody>{rows}</tbody></table></body></html>"#
    )
}

pub fn zone_page(zone: &str, domain_id: &str, records: &[Record]) -> String {
    let rows: String = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let priority = r.priority.map(|p| p.to_string()).unwrap_or_default();
            format!(
                r#"<tr>
  <td class="name_column"><input type="text" name="records[{i}][name]" value="{name}"></td>
  <td class="type_column"><input type="hidden" name="records[{i}][type]" value="{ty}"><strong>{ty}</strong></td>
  <td class="ttl_column"><input type="text" name="records[{i}][ttl]" value="{ttl}"></td>
  <td class="value_column"><input type="text" name="records[{i}][value]" value="{value}"></td>
  <td class="priority_column"><input type="text" name="records[{i}][priority]" value="{priority}"></td>
  <td class="delete_column"><button type="button" onclick="if(confirm('Do you really want to remove this entry?')) location.href='/clientarea.php?managedns={zone}&amp;records={ty}&amp;dnsaction=delete&amp;name={name}&amp;value={value}&amp;ttl={ttl}&amp;domainid={domain_id}'">Delete</button></td>
</tr>"#,
                name = r.name,
                ty = r.record_type,
                ttl = r.ttl,
                value = r.value,
            )
        })
        .collect();

    let records_form = if records.is_empty() {
        String::new()
    } else {
        format!(
            r#"<form id="recordslistform" method="post">
<input type="hidden" name="token" value="{ZONE_TOKEN}">
<input type="hidden" name="dnsaction" value="modify">
<table><tbody>{rows}</tbody></table>
</form>"#
        )
    };

    format!(
        r#"<!DOCTYPE html><html><body>
<form id="form" method="post">
<input type="hidden" name="token" value="{ZONE_TOKEN}">
<input type="hidden" name="dnsaction" value="add">
</form>
{records_form}
</body></html>"#
    )
}

// ============ 模拟面板 ============

fn has_query_param(req: &Request, key: &str) -> bool {
    req.url.query_pairs().any(|(k, _)| k == key)
}

/// 模拟 Freenom 客户区
pub struct MockPanel {
    pub server: MockServer,
}

impl MockPanel {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn provider(&self) -> Arc<dyn RecordProvider> {
        let config = ProviderConfig::new(Credentials {
            username: TEST_USERNAME.to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .with_base_url(self.server.uri());
        create_provider(config).unwrap()
    }

    /// Login page and a login POST that succeeds; expects exactly `logins` logins.
    pub async fn mount_login(&self, logins: u64) {
        Mock::given(method("GET"))
            .and(path("/clientarea.php"))
            .and(|req: &Request| req.url.query().is_none())
            .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
            .expect(logins)
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/dologin.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string(client_area_page()))
            .expect(logins)
            .mount(&self.server)
            .await;
    }

    /// Login POST that the panel rejects.
    pub async fn mount_rejected_login(&self) {
        Mock::given(method("GET"))
            .and(path("/clientarea.php"))
            .and(|req: &Request| req.url.query().is_none())
            .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/dologin.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string(login_rejected_page()))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_domains(&self, domains: &[(&str, &str)]) {
        Mock::given(method("GET"))
            .and(path("/clientarea.php"))
            .and(query_param("action", "domains"))
            .respond_with(ResponseTemplate::new(200).set_body_string(domains_page(domains)))
            .mount(&self.server)
            .await;
    }

    /// Zone page served for the next `times` fetches, or for all of them when `None`.
    ///
    /// Mount the earlier page first: the first mounted mock that still matches answers.
    pub async fn mount_zone_page(
        &self,
        zone: &str,
        domain_id: &str,
        records: &[Record],
        times: Option<u64>,
    ) {
        self.mount_zone_html(zone, domain_id, zone_page(zone, domain_id, records), times)
            .await;
    }

    /// Like `mount_zone_page`, with a hand-edited page body.
    pub async fn mount_zone_html(
        &self,
        zone: &str,
        domain_id: &str,
        html: String,
        times: Option<u64>,
    ) {
        let mock = Mock::given(method("GET"))
            .and(path("/clientarea.php"))
            .and(query_param("managedns", zone))
            .and(query_param("domainid", domain_id))
            .and(|req: &Request| !has_query_param(req, "dnsaction"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html));
        let mock = match times {
            Some(n) => mock.up_to_n_times(n),
            None => mock,
        };
        mock.mount(&self.server).await;
    }

    /// Zone form POST; expects exactly `times` submissions.
    pub async fn mount_zone_submit(&self, zone: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/clientarea.php"))
            .and(query_param("managedns", zone))
            .respond_with(ResponseTemplate::new(200).set_body_string(client_area_page()))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Row delete action; expects exactly `times` calls.
    pub async fn mount_delete(&self, zone: &str, times: u64) {
        Mock::given(method("GET"))
            .and(path("/clientarea.php"))
            .and(query_param("managedns", zone))
            .and(query_param("dnsaction", "delete"))
            .respond_with(ResponseTemplate::new(200).set_body_string(client_area_page()))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Form bodies of every POST to the zone page, decoded.
    pub async fn zone_submissions(&self) -> Vec<Vec<(String, String)>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.method.as_str() == "POST" && has_query_param(req, "managedns"))
            .map(|req| {
                url::form_urlencoded::parse(&req.body)
                    .into_owned()
                    .collect()
            })
            .collect()
    }

    /// Body of the login POST, decoded.
    pub async fn login_submissions(&self) -> Vec<Vec<(String, String)>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.method.as_str() == "POST" && req.url.path() == "/dologin.php")
            .map(|req| {
                url::form_urlencoded::parse(&req.body)
                    .into_owned()
                    .collect()
            })
            .collect()
    }
}

/// 在表单中查找字段值
pub fn field<'a>(form: &'a [(String, String)], name: &str) -> Option<&'a str> {
    form.iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// 实网测试上下文
pub struct TestContext {
    pub provider: Arc<dyn RecordProvider>,
    pub domain: String,
}

impl TestContext {
    /// 从环境变量创建 Freenom 测试上下文
    pub fn freenom() -> Option<Self> {
        let domain = env::var("TEST_DOMAIN").ok()?;
        let config = ProviderConfig::from_env().ok()?;
        let provider = create_provider(config).ok()?;
        Some(Self { provider, domain })
    }
}

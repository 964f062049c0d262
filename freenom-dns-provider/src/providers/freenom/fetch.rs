//! 域名列表与区域页面获取

use std::sync::LazyLock;

use reqwest::Url;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::PROVIDER_NAME;
use crate::traits::{PageErrorMapper, PageKind};
use crate::types::{SessionState, Zone};

use super::error::PageErrors;
use super::extract::{css, parse_zone_page};
use super::session::LOGIN_FORM_SEL;
use super::{DOMAINS_PAGE_PATH, DomainRow, FreenomProvider, ZonePage};

static DOMAIN_ROWS_SEL: LazyLock<Selector> = LazyLock::new(|| css("table tbody tr"));
static DOMAIN_NAME_SEL: LazyLock<Selector> = LazyLock::new(|| css("td.second > a"));
static MANAGE_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| css("td.seventh div a[href]"));

/// Rows of the domain listing, in page order.
///
/// Rows without a domain anchor are skipped; a page with no domain row at all
/// is not the listing this client knows.
pub(super) fn parse_domain_list(html: &str) -> Result<Vec<DomainRow>> {
    let document = Html::parse_document(html);

    if document.select(&LOGIN_FORM_SEL).next().is_some() {
        return Err(PageErrors.shape_error(
            PageKind::Domains,
            "login form shown instead of the domain list",
        ));
    }

    let rows: Vec<DomainRow> = document
        .select(&DOMAIN_ROWS_SEL)
        .filter_map(|tr| {
            let anchor = tr.select(&DOMAIN_NAME_SEL).next()?;
            let manage_href = tr
                .select(&MANAGE_LINK_SEL)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string);
            Some(DomainRow {
                name: anchor.text().collect::<String>().trim().to_string(),
                manage_href,
            })
        })
        .collect();

    if rows.is_empty() {
        return Err(PageErrors.shape_error(PageKind::Domains, "no domain rows found"));
    }
    Ok(rows)
}

/// Numeric `id` query parameter of a manage link.
pub(super) fn domain_id_from_href(base: &Url, href: &str) -> Option<String> {
    let url = base.join(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

/// Find `zone` among the listed domains.
///
/// The match is exact on the trimmed anchor text.
pub(super) fn resolve_zone(base: &Url, rows: &[DomainRow], zone: &str) -> Result<Zone> {
    let row = rows
        .iter()
        .find(|row| row.name == zone)
        .ok_or_else(|| PageErrors.zone_not_found(zone))?;

    let href = row.manage_href.as_deref().ok_or_else(|| {
        PageErrors.shape_error(PageKind::Domains, format!("no manage link for '{zone}'"))
    })?;
    let id = domain_id_from_href(base, href).ok_or_else(|| {
        PageErrors.shape_error(
            PageKind::Domains,
            format!("manage link for '{zone}' has no domain id: {href}"),
        )
    })?;

    Ok(Zone {
        name: zone.to_string(),
        id,
    })
}

impl FreenomProvider {
    async fn fetch_domain_list(&self, state: &mut SessionState) -> Result<Vec<DomainRow>> {
        self.ensure_authenticated(state).await?;
        let url = self.url(DOMAINS_PAGE_PATH)?;
        let html = HttpUtils::execute_request(self.client.get(url.clone()), "GET", url.as_str())
            .await?;
        parse_domain_list(&html)
    }

    /// Every listed domain that carries a usable manage link.
    pub(super) async fn fetch_zones(&self, state: &mut SessionState) -> Result<Vec<Zone>> {
        let rows = self.fetch_domain_list(state).await?;
        let zones = rows
            .iter()
            .filter_map(|row| {
                let id = row
                    .manage_href
                    .as_deref()
                    .and_then(|href| domain_id_from_href(&self.base_url, href));
                if id.is_none() {
                    log::debug!(
                        "[{PROVIDER_NAME}] Skipping '{}': no domain id in listing",
                        row.name
                    );
                }
                Some(Zone {
                    name: row.name.clone(),
                    id: id?,
                })
            })
            .collect();
        Ok(zones)
    }

    /// Authenticate, resolve `zone` and fetch its management page.
    pub(super) async fn fetch_zone_page(
        &self,
        state: &mut SessionState,
        zone: &str,
    ) -> Result<(ZonePage, Zone)> {
        let rows = self.fetch_domain_list(state).await?;
        let zone = resolve_zone(&self.base_url, &rows, zone)?;
        let page = self.load_zone_page(&zone).await?;
        Ok((page, zone))
    }

    /// Fetch the management page of an already resolved zone.
    pub(super) async fn load_zone_page(&self, zone: &Zone) -> Result<ZonePage> {
        let url = self.zone_url(&zone.name, &zone.id)?;
        let html = HttpUtils::execute_request(self.client.get(url.clone()), "GET", url.as_str())
            .await?;
        let page = parse_zone_page(&html)?;
        log::debug!(
            "[{PROVIDER_NAME}] Zone '{}' (id {}) has {} record rows",
            zone.name,
            zone.id,
            page.rows.len()
        );
        Ok(page)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::domains_page;
    use super::*;
    use crate::error::ProviderError;

    fn base() -> Url {
        Url::parse("https://my.freenom.com/").unwrap()
    }

    #[test]
    fn selectors_compile() {
        for sel in [&DOMAIN_ROWS_SEL, &DOMAIN_NAME_SEL, &MANAGE_LINK_SEL, &LOGIN_FORM_SEL] {
            let _ = LazyLock::force(sel);
        }
    }

    #[test]
    fn listing_rows_parsed() {
        let rows = parse_domain_list(&domains_page(&[("example.tk", "1234"), ("other.ml", "99")]));
        assert!(rows.is_ok(), "expected Ok(..), got {rows:?}");
        let Ok(rows) = rows else {
            return;
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "example.tk");
        assert_eq!(
            rows[1].manage_href.as_deref(),
            Some("clientarea.php?action=domaindetails&id=99")
        );
    }

    #[test]
    fn zone_resolved_to_id() {
        let rows = parse_domain_list(&domains_page(&[("example.tk", "1234")])).unwrap();
        let zone = resolve_zone(&base(), &rows, "example.tk").unwrap();
        assert_eq!(
            zone,
            Zone {
                name: "example.tk".to_string(),
                id: "1234".to_string(),
            }
        );
    }

    #[test]
    fn match_is_exact() {
        let rows = parse_domain_list(&domains_page(&[("example.tk", "1234")])).unwrap();
        for name in ["EXAMPLE.TK", "example", "sub.example.tk"] {
            let res = resolve_zone(&base(), &rows, name);
            assert!(
                matches!(&res, Err(ProviderError::DomainNotFound { domain, .. }) if domain == name),
                "unexpected result for {name}: {res:?}"
            );
        }
    }

    #[test]
    fn missing_manage_link_is_shape_error() {
        let rows = vec![DomainRow {
            name: "example.tk".to_string(),
            manage_href: None,
        }];
        let res = resolve_zone(&base(), &rows, "example.tk");
        assert!(matches!(res, Err(ProviderError::PageShape { .. })));
    }

    #[test]
    fn empty_listing_is_shape_error() {
        let res = parse_domain_list("<html><body><table><tbody></tbody></table></body></html>");
        assert!(
            matches!(&res, Err(ProviderError::PageShape { page, .. }) if page == "domains"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn login_page_is_shape_error() {
        let res = parse_domain_list(
            r#"<html><body><form class="form-stacked"><input name="token" value="x"></form></body></html>"#,
        );
        assert!(
            matches!(&res, Err(ProviderError::PageShape { detail, .. }) if detail.contains("login form")),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn domain_id_requires_digits() {
        assert_eq!(
            domain_id_from_href(&base(), "clientarea.php?action=domaindetails&id=42"),
            Some("42".to_string())
        );
        assert_eq!(
            domain_id_from_href(&base(), "https://my.freenom.com/clientarea.php?id=7&x=1"),
            Some("7".to_string())
        );
        assert_eq!(domain_id_from_href(&base(), "clientarea.php?id=abc"), None);
        assert_eq!(domain_id_from_href(&base(), "clientarea.php"), None);
    }
}

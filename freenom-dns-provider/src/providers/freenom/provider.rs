//! Freenom `RecordProvider` trait implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::PROVIDER_NAME;
use crate::reconcile::{ReconcilePlan, confirmed_absent, confirmed_present, matching_positions};
use crate::traits::{PageErrorMapper, PageKind, RecordProvider};
use crate::types::{Record, SessionState, Zone};

use super::FreenomProvider;
use super::form::{append_form, converge_form};

/// Finish an operation: drop the session on errors that make it untrustworthy
/// and log the failure at a level matching its cause.
fn settle<T>(state: &mut SessionState, operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        if e.invalidates_session() {
            *state = SessionState::Unauthenticated;
        }
        if e.is_expected() {
            log::warn!("[{PROVIDER_NAME}] {operation} failed: {e}");
        } else {
            log::error!("[{PROVIDER_NAME}] {operation} failed: {e}");
        }
    }
    result
}

fn report(operation: &str, zone: &Zone, requested: &[Record], confirmed: &[Record]) {
    if confirmed.len() < requested.len() {
        log::warn!(
            "[{PROVIDER_NAME}] {operation} on '{}': {} of {} records confirmed",
            zone.name,
            confirmed.len(),
            requested.len()
        );
    } else {
        log::info!(
            "[{PROVIDER_NAME}] {operation} on '{}': {} records confirmed",
            zone.name,
            confirmed.len()
        );
    }
}

impl FreenomProvider {
    async fn list_records_inner(&self, state: &mut SessionState, zone: &str) -> Result<Vec<Record>> {
        let (page, _) = self.fetch_zone_page(state, zone).await?;
        Ok(page.records())
    }

    async fn append_records_inner(
        &self,
        state: &mut SessionState,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        let (page, zone) = self.fetch_zone_page(state, zone).await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let plan = ReconcilePlan::append_only(records);
        let fields = append_form(&page, &plan.appends)?;
        self.submit(&zone, &fields).await?;

        let observed = self.load_zone_page(&zone).await?.records();
        let confirmed = confirmed_present(records, &observed);
        report("append", &zone, records, &confirmed);
        Ok(confirmed)
    }

    async fn set_records_inner(
        &self,
        state: &mut SessionState,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        let (page, zone) = self.fetch_zone_page(state, zone).await?;
        let current = page.records();
        let plan = ReconcilePlan::converge(records, &current);

        log::info!(
            "[{PROVIDER_NAME}] set on '{}': {} updates, {} appends, {} unchanged, {} preserved",
            zone.name,
            plan.updates.len(),
            plan.appends.len(),
            plan.kept.len(),
            plan.preserved.len()
        );

        let observed = if plan.is_noop() {
            current
        } else {
            let fields = converge_form(&page, &plan)?;
            self.submit(&zone, &fields).await?;
            self.load_zone_page(&zone).await?.records()
        };

        let confirmed = confirmed_present(records, &observed);
        report("set", &zone, records, &confirmed);
        Ok(confirmed)
    }

    async fn delete_records_inner(
        &self,
        state: &mut SessionState,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>> {
        let (page, zone) = self.fetch_zone_page(state, zone).await?;
        let current = page.records();
        let positions = matching_positions(records, &current);

        if positions.is_empty() {
            let confirmed = confirmed_absent(records, &current);
            report("delete", &zone, records, &confirmed);
            return Ok(confirmed);
        }

        log::info!(
            "[{PROVIDER_NAME}] delete on '{}': {} matching rows",
            zone.name,
            positions.len()
        );
        // 先收集全部删除链接，缺任何一个都不发出请求
        let targets = positions
            .iter()
            .filter_map(|&i| page.rows.get(i))
            .map(|row| {
                row.delete_href
                    .as_deref()
                    .map(|href| (row, href))
                    .ok_or_else(|| {
                        self.shape_error(
                            PageKind::Zone,
                            format!("no delete action for record '{}'", row.record),
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        for (row, href) in targets {
            log::debug!("[{PROVIDER_NAME}] Deleting '{}'", row.record);
            self.delete_row(href).await?;
        }

        let observed = self.load_zone_page(&zone).await?.records();
        let confirmed = confirmed_absent(records, &observed);
        report("delete", &zone, records, &confirmed);
        Ok(confirmed)
    }
}

#[async_trait]
impl RecordProvider for FreenomProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let mut guard = self.session.lock().await;
        let state = &mut *guard;
        let result = self.fetch_zones(state).await;
        settle(state, "list_zones", result)
    }

    async fn list_records(&self, zone: &str) -> Result<Vec<Record>> {
        let mut guard = self.session.lock().await;
        let state = &mut *guard;
        let result = self.list_records_inner(state, zone).await;
        settle(state, "list_records", result)
    }

    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let mut guard = self.session.lock().await;
        let state = &mut *guard;
        let result = self.append_records_inner(state, zone, records).await;
        settle(state, "append_records", result)
    }

    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let mut guard = self.session.lock().await;
        let state = &mut *guard;
        let result = self.set_records_inner(state, zone, records).await;
        settle(state, "set_records", result)
    }

    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>> {
        let mut guard = self.session.lock().await;
        let state = &mut *guard;
        let result = self.delete_records_inner(state, zone, records).await;
        settle(state, "delete_records", result)
    }
}

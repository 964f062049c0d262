//! 表单构造与提交

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::PROVIDER_NAME;
use crate::reconcile::ReconcilePlan;
use crate::traits::{PageErrorMapper, PageKind};
use crate::types::{Record, Zone};
use crate::utils::log_sanitizer::redact_form;

use super::error::PageErrors;
use super::{FormFields, FreenomProvider, ZonePage};

/// Priority as the panel expects it: empty when absent or zero.
fn priority_field(record: &Record) -> String {
    match record.effective_priority() {
        0 => String::new(),
        p => p.to_string(),
    }
}

impl FormFields {
    /// New row `index` of the add-record form.
    pub fn add_record(&mut self, index: usize, record: &Record) {
        let key = |field: &str| format!("addrecord[{index}][{field}]");
        self.push(key("name"), record.name.as_str());
        self.push(key("type"), record.record_type.as_str());
        self.push(key("ttl"), record.ttl.to_string());
        self.push(key("value"), record.value.as_str());
        self.push(key("priority"), priority_field(record));
    }

    /// Existing row `row_id` of the records form.
    pub fn edit_record(&mut self, row_id: &str, record: &Record) {
        let key = |field: &str| format!("records[{row_id}][{field}]");
        self.push(key("name"), record.name.as_str());
        self.push(key("type"), record.record_type.as_str());
        self.push(key("ttl"), record.ttl.to_string());
        self.push(key("value"), record.value.as_str());
        self.push(key("priority"), priority_field(record));
    }
}

/// Add-record form body for `records`, numbered from zero.
pub(super) fn append_form(page: &ZonePage, records: &[Record]) -> Result<FormFields> {
    let hidden = page
        .add_form
        .as_deref()
        .ok_or_else(|| PageErrors.shape_error(PageKind::Zone, "add-record form not found"))?;

    let mut fields = FormFields::new();
    fields.extend_from(hidden);
    for (index, record) in records.iter().enumerate() {
        fields.add_record(index, record);
    }
    Ok(fields)
}

/// Records form body that rewrites every row of `page` and adds the plan's appends.
///
/// Rows left out of a records-form submission are dropped by the panel, so every
/// row is resubmitted, unchanged or not.
pub(super) fn converge_form(page: &ZonePage, plan: &ReconcilePlan) -> Result<FormFields> {
    let hidden = page
        .edit_form
        .as_deref()
        .or(page.add_form.as_deref())
        .ok_or_else(|| PageErrors.shape_error(PageKind::Zone, "no record form found"))?;

    let mut fields = FormFields::new();
    fields.extend_from(hidden);
    for edit in plan.row_edits() {
        let row = page.rows.get(edit.position).ok_or_else(|| {
            PageErrors.shape_error(
                PageKind::Zone,
                format!("record row {} vanished", edit.position + 1),
            )
        })?;
        fields.edit_record(&row.row_id, &edit.record);
    }
    for (index, record) in plan.appends.iter().enumerate() {
        fields.add_record(index, record);
    }
    Ok(fields)
}

impl FreenomProvider {
    /// POST a form to the zone's management page. The response page is not inspected;
    /// callers re-fetch to see what the panel accepted.
    pub(super) async fn submit(&self, zone: &Zone, fields: &FormFields) -> Result<()> {
        let url = self.zone_url(&zone.name, &zone.id)?;
        log::debug!(
            "[{PROVIDER_NAME}] Zone Form: {}",
            redact_form(fields.as_pairs())
        );
        let request = self.client.post(url.clone()).form(fields.as_pairs());
        HttpUtils::execute_request(request, "POST", url.as_str()).await?;
        Ok(())
    }

    /// Follow a row's delete action.
    pub(super) async fn delete_row(&self, href: &str) -> Result<()> {
        let url = self.url(href)?;
        HttpUtils::execute_request(self.client.get(url.clone()), "GET", url.as_str()).await?;
        Ok(())
    }
}

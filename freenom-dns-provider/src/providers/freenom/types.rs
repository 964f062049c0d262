//! 页面解析结果类型定义
//!
//! Everything here is owned data copied out of a parsed document, valid only
//! for the operation that fetched it.

use crate::types::Record;

/// One row of the account's domain listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRow {
    /// Trimmed anchor text.
    pub name: String,
    /// `href` of the row's manage link, if the row has one.
    pub manage_href: Option<String>,
}

/// One record row of the zone management page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    /// Key the edit form uses for this row (`records[<row_id>][...]`).
    pub row_id: String,
    /// Record shown in the row.
    pub record: Record,
    /// Delete action URL embedded in the row's delete button.
    pub delete_href: Option<String>,
}

/// Parsed zone management page.
#[derive(Debug, Clone, Default)]
pub struct ZonePage {
    /// Record rows in table order.
    pub rows: Vec<PageRow>,
    /// Hidden fields of the existing-records form, if the page has one.
    pub edit_form: Option<Vec<(String, String)>>,
    /// Hidden fields of the add-record form, if the page has one.
    pub add_form: Option<Vec<(String, String)>>,
}

impl ZonePage {
    /// Records in table order.
    pub fn records(&self) -> Vec<Record> {
        self.rows.iter().map(|row| row.record.clone()).collect()
    }
}

/// Ordered form body. Names may repeat, so this is not a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn extend_from(&mut self, fields: &[(String, String)]) {
        self.0.extend(fields.iter().cloned());
    }

    /// First value submitted under `name`.
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

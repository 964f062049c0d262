//! Record extraction from the zone management page

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::traits::{PageErrorMapper, PageKind};
use crate::types::{Record, RecordType};

use super::error::PageErrors;
use super::{PageRow, ZonePage};

/// Existing-records form.
const EDIT_FORM: &str = "#recordslistform";
/// Add-record form.
const ADD_FORM: &str = "#form";
/// Record rows of the existing-records table.
const RECORD_ROWS: &str = "#recordslistform > table > tbody > tr";

/// Compile a selector literal.
#[allow(clippy::expect_used)]
pub(super) fn css(selector: &'static str) -> Selector {
    Selector::parse(selector).expect("static selector is valid")
}

static EDIT_FORM_SEL: LazyLock<Selector> = LazyLock::new(|| css(EDIT_FORM));
static ADD_FORM_SEL: LazyLock<Selector> = LazyLock::new(|| css(ADD_FORM));
static RECORD_ROWS_SEL: LazyLock<Selector> = LazyLock::new(|| css(RECORD_ROWS));
static HIDDEN_INPUT_SEL: LazyLock<Selector> = LazyLock::new(|| css(r#"input[type="hidden"]"#));
static INPUT_SEL: LazyLock<Selector> = LazyLock::new(|| css("input"));
static TYPE_LABEL_SEL: LazyLock<Selector> = LazyLock::new(|| css("strong"));
static ONCLICK_SEL: LazyLock<Selector> = LazyLock::new(|| css("[onclick]"));

/// Hidden fields of a form, skipping per-row record inputs.
fn hidden_fields(form: ElementRef<'_>) -> Vec<(String, String)> {
    form.select(&HIDDEN_INPUT_SEL)
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            if name.starts_with("records[") || name.starts_with("addrecord[") {
                return None;
            }
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Parse the zone management page.
///
/// A page without the existing-records form but with the add-record form is a
/// zone with no records. A page with neither is not a zone page.
pub(super) fn parse_zone_page(html: &str) -> Result<ZonePage> {
    let document = Html::parse_document(html);
    let edit_form = document.select(&EDIT_FORM_SEL).next();
    let add_form = document.select(&ADD_FORM_SEL).next();

    if edit_form.is_none() && add_form.is_none() {
        return Err(PageErrors.shape_error(
            PageKind::Zone,
            format!("neither {EDIT_FORM} nor {ADD_FORM} found"),
        ));
    }

    let mut rows = Vec::new();
    if edit_form.is_some() {
        for tr in document.select(&RECORD_ROWS_SEL) {
            if let Some(row) = parse_row(tr, rows.len())? {
                rows.push(row);
            }
        }
    }

    Ok(ZonePage {
        rows,
        edit_form: edit_form.map(hidden_fields),
        add_form: add_form.map(hidden_fields),
    })
}

/// Direct child cell of `row` carrying `class`.
fn cell<'a>(row: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .find(|td| td.value().classes().any(|c| c == class))
}

fn input_value(cell: ElementRef<'_>) -> Option<(String, Option<String>)> {
    let input = cell.select(&INPUT_SEL).next()?;
    Some((
        input.value().attr("value").unwrap_or_default().to_string(),
        input.value().attr("name").map(str::to_string),
    ))
}

/// `N` from an input named `records[N][field]`.
fn row_id_from_input_name(name: &str) -> Option<String> {
    let rest = name.strip_prefix("records[")?;
    let (id, _) = rest.split_once(']')?;
    (!id.is_empty()).then(|| id.to_string())
}

/// URL assigned to `location.href` in a delete button's script.
fn href_from_script(script: &str) -> Option<String> {
    let (_, rest) = script.split_once("location.href='")?;
    let (href, _) = rest.split_once('\'')?;
    (!href.is_empty()).then(|| href.to_string())
}

/// Parse one table row. Rows without any record column (spacers, notices) yield `None`.
fn parse_row(tr: ElementRef<'_>, position: usize) -> Result<Option<PageRow>> {
    let shape = |detail: String| PageErrors.shape_error(PageKind::Zone, detail);
    let line = position + 1;

    let cells = (
        cell(tr, "name_column"),
        cell(tr, "type_column"),
        cell(tr, "ttl_column"),
        cell(tr, "value_column"),
    );
    let (name_cell, type_cell, ttl_cell, value_cell) = match cells {
        (None, None, None, None) => return Ok(None),
        (Some(n), Some(t), Some(ttl), Some(v)) => (n, t, ttl, v),
        _ => return Err(shape(format!("record row {line} is missing a column"))),
    };

    let (name, input_name) =
        input_value(name_cell).ok_or_else(|| shape(format!("record row {line} has no name input")))?;

    let label = type_cell
        .select(&TYPE_LABEL_SEL)
        .next()
        .map(|s| s.text().collect::<String>())
        .ok_or_else(|| shape(format!("record row {line} has no type label")))?;
    let record_type = RecordType::from_label(&label).ok_or_else(|| {
        shape(format!(
            "record row {line} has unknown type '{}'",
            label.trim()
        ))
    })?;

    let (ttl_text, _) =
        input_value(ttl_cell).ok_or_else(|| shape(format!("record row {line} has no TTL input")))?;
    let ttl = ttl_text.trim().parse::<u32>().map_err(|_| {
        shape(format!(
            "record row {line} TTL '{ttl_text}' is not a number"
        ))
    })?;

    let (value, _) = input_value(value_cell)
        .ok_or_else(|| shape(format!("record row {line} has no value input")))?;

    let priority = match cell(tr, "priority_column").and_then(input_value) {
        Some((text, _)) if !text.trim().is_empty() => {
            Some(text.trim().parse::<u16>().map_err(|_| {
                shape(format!(
                    "record row {line} priority '{text}' is not a number"
                ))
            })?)
        }
        _ => None,
    };

    let delete_href = cell(tr, "delete_column")
        .and_then(|td| td.select(&ONCLICK_SEL).next())
        .and_then(|button| button.value().attr("onclick"))
        .and_then(href_from_script);

    let row_id = input_name
        .as_deref()
        .and_then(row_id_from_input_name)
        .unwrap_or_else(|| position.to_string());

    Ok(Some(PageRow {
        row_id,
        record: Record {
            record_type,
            name,
            value,
            ttl,
            priority,
        },
        delete_href,
    }))
}

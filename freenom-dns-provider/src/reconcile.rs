//! Reconciliation between a desired record set and the rows of one zone page.
//!
//! Pure functions only. Row positions refer to the order of the extraction the
//! plan was computed from and are meaningless against any other fetch.

use crate::types::Record;

/// A row of the current page, addressed by position, and the record it must hold after submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEdit {
    /// Position of the row in the extracted sequence.
    pub position: usize,
    /// Record to submit for that row.
    pub record: Record,
}

/// Instruction set for one submission of the zone form.
///
/// Every row of the page appears exactly once across `updates`, `kept` and
/// `preserved`, because the panel drops rows that are not resubmitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Rows whose type+name matched a desired record with different TTL, value or priority.
    pub updates: Vec<RowEdit>,
    /// Rows already identical to a desired record.
    pub kept: Vec<RowEdit>,
    /// Rows unrelated to the desired set, resubmitted unchanged.
    pub preserved: Vec<RowEdit>,
    /// Desired records submitted as new rows.
    pub appends: Vec<Record>,
}

impl ReconcilePlan {
    /// Plan for append-style operations: every desired record is new, nothing is matched.
    pub fn append_only(desired: &[Record]) -> Self {
        Self {
            appends: desired.to_vec(),
            ..Self::default()
        }
    }

    /// Plan that converges `current` toward `desired`.
    ///
    /// A desired record identical to an unclaimed row claims that row. Each remaining
    /// desired record takes over the first unclaimed row with the same type and name,
    /// or becomes an append when there is none. Two desired records sharing a type
    /// and name can therefore land on either of two such rows.
    pub fn converge(desired: &[Record], current: &[Record]) -> Self {
        let mut claimed = vec![false; current.len()];
        let mut kept = Vec::new();
        let mut pending = Vec::new();

        for expected in desired {
            match (0..current.len()).find(|&i| !claimed[i] && current[i] == *expected) {
                Some(position) => {
                    claimed[position] = true;
                    kept.push(RowEdit {
                        position,
                        record: current[position].clone(),
                    });
                }
                None => pending.push(expected),
            }
        }

        let mut updates = Vec::new();
        let mut appends = Vec::new();
        for expected in pending {
            match (0..current.len()).find(|&i| !claimed[i] && current[i].same_slot(expected)) {
                Some(position) => {
                    claimed[position] = true;
                    updates.push(RowEdit {
                        position,
                        record: expected.clone(),
                    });
                }
                None => appends.push(expected.clone()),
            }
        }

        let preserved = current
            .iter()
            .enumerate()
            .filter(|(i, _)| !claimed[*i])
            .map(|(position, record)| RowEdit {
                position,
                record: record.clone(),
            })
            .collect();

        kept.sort_by_key(|edit| edit.position);
        updates.sort_by_key(|edit| edit.position);

        Self {
            updates,
            kept,
            preserved,
            appends,
        }
    }

    /// Nothing would change on the panel.
    pub fn is_noop(&self) -> bool {
        self.updates.is_empty() && self.appends.is_empty()
    }

    /// All row edits in page order.
    pub fn row_edits(&self) -> Vec<&RowEdit> {
        let mut rows: Vec<&RowEdit> = self
            .updates
            .iter()
            .chain(&self.kept)
            .chain(&self.preserved)
            .collect();
        rows.sort_by_key(|edit| edit.position);
        rows
    }
}

/// Requested records that appear in `observed`, in request order.
///
/// Each observed row confirms at most one requested record.
pub fn confirmed_present(requested: &[Record], observed: &[Record]) -> Vec<Record> {
    let mut used = vec![false; observed.len()];
    requested
        .iter()
        .filter(|wanted| {
            match (0..observed.len()).find(|&i| !used[i] && observed[i] == **wanted) {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
        .cloned()
        .collect()
}

/// Requested records that do not appear in `observed`, in request order.
pub fn confirmed_absent(requested: &[Record], observed: &[Record]) -> Vec<Record> {
    requested
        .iter()
        .filter(|wanted| !observed.contains(*wanted))
        .cloned()
        .collect()
}

/// Positions of rows in `current` equal to any requested record.
pub fn matching_positions(requested: &[Record], current: &[Record]) -> Vec<usize> {
    current
        .iter()
        .enumerate()
        .filter(|(_, rec)| requested.contains(*rec))
        .map(|(i, _)| i)
        .collect()
}

//! Rotation override records read from the schematic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A per-component rotation override.
///
/// Built from one row of the rotation-override export. An empty cell in
/// the export is stored as `None`; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixupRecord {
    /// Component reference designator (e.g., "R1").
    pub reference_id: String,
    /// Replacement rotation, verbatim from the export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_adjust: Option<String>,
}

impl FixupRecord {
    /// Create a record. Only an empty adjust becomes `None`.
    pub fn new(reference_id: impl Into<String>, rotation_adjust: Option<&str>) -> Self {
        let rotation_adjust = rotation_adjust
            .filter(|s| !s.is_empty())
            .map(String::from);
        Self {
            reference_id: reference_id.into(),
            rotation_adjust,
        }
    }

    /// The override to apply, if any.
    pub fn rotation_override(&self) -> Option<&str> {
        self.rotation_adjust.as_deref()
    }
}

/// Mapping of reference designator to its fixup record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixupTable {
    records: HashMap<String, FixupRecord>,
}

impl FixupTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record keyed by its reference. Last write wins.
    pub fn insert(&mut self, record: FixupRecord) {
        if let Some(previous) = self.records.insert(record.reference_id.clone(), record) {
            tracing::warn!(
                "Duplicate fixup row for {}, keeping the later one",
                previous.reference_id
            );
        }
    }

    /// Look up the record for a reference.
    pub fn get(&self, reference_id: &str) -> Option<&FixupRecord> {
        self.records.get(reference_id)
    }

    /// Rotation override for a reference.
    ///
    /// A reference missing from the table means "no override"; so does a
    /// record with an empty adjust. Neither is an error.
    pub fn rotation_for(&self, reference_id: &str) -> Option<&str> {
        self.get(reference_id).and_then(FixupRecord::rotation_override)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that carry an override.
    pub fn override_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.rotation_adjust.is_some())
            .count()
    }
}

impl FromIterator<FixupRecord> for FixupTable {
    fn from_iter<I: IntoIterator<Item = FixupRecord>>(iter: I) -> Self {
        let mut table = FixupTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

//! Pick-and-place rows.

/// Column header of the final position file.
pub const POSITION_HEADER: [&str; 7] = [
    "Designator",
    "Val",
    "Package",
    "Mid X",
    "Mid Y",
    "Rotation",
    "Layer",
];

/// One row of the raw placement export.
///
/// Fields are kept as the exporter wrote them; only `rotation` is ever
/// rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRow {
    pub reference_id: String,
    pub value: String,
    pub package: String,
    pub mid_x: String,
    pub mid_y: String,
    pub rotation: String,
    pub layer: String,
    /// Trailing columns beyond the seventh, passed through untouched.
    pub extra: Vec<String>,
}

impl PlacementRow {
    /// Number of columns a row must have.
    pub const COLUMNS: usize = 7;

    /// Build a row from exported fields.
    ///
    /// Returns `None` when fewer than [`Self::COLUMNS`] fields are present.
    pub fn from_fields<I, S>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut it = fields.into_iter().map(Into::into);
        let row = Self {
            reference_id: it.next()?,
            value: it.next()?,
            package: it.next()?,
            mid_x: it.next()?,
            mid_y: it.next()?,
            rotation: it.next()?,
            layer: it.next()?,
            extra: it.collect(),
        };
        Some(row)
    }

    /// Replace the rotation when an override is given.
    ///
    /// Returns true if an override was applied.
    pub fn apply_rotation(&mut self, rotation_override: Option<&str>) -> bool {
        match rotation_override {
            Some(rotation) => {
                self.rotation = rotation.to_string();
                true
            }
            None => false,
        }
    }

    /// Render as a position-file line (no trailing newline).
    ///
    /// Reference, value and package are wrapped in double quotes; the
    /// numeric, rotation and layer columns are written bare.
    pub fn to_line(&self) -> String {
        let mut fields = vec![
            quoted(&self.reference_id),
            quoted(&self.value),
            quoted(&self.package),
            self.mid_x.clone(),
            self.mid_y.clone(),
            self.rotation.clone(),
            self.layer.clone(),
        ];
        fields.extend(self.extra.iter().cloned());
        fields.join(",")
    }
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field)
}

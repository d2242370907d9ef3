//! Renderer-agnostic view-model produced from a term document.
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Cell text used when a table column has no value.
pub const PLACEHOLDER: &str = "-";

/// Sections of a fact sheet, declared in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Taxonomy,
    Morphology,
    Culture,
    Physiology,
    Isolation,
    Safety,
    Sequence,
}

impl SectionKind {
    pub const CANONICAL: [SectionKind; 7] = [
        SectionKind::Taxonomy,
        SectionKind::Morphology,
        SectionKind::Culture,
        SectionKind::Physiology,
        SectionKind::Isolation,
        SectionKind::Safety,
        SectionKind::Sequence,
    ];

    /// Top-level key of the section in a term document.
    pub fn source_key(self) -> &'static str {
        match self {
            SectionKind::Taxonomy => "Name and taxonomic classification",
            SectionKind::Morphology => "Morphology",
            SectionKind::Culture => "Culture and growth conditions",
            SectionKind::Physiology => "Physiology and metabolism",
            SectionKind::Isolation => "Isolation, sampling and environmental information",
            SectionKind::Safety => "Safety information",
            SectionKind::Sequence => "Sequence information",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Taxonomy => "Name and Taxonomic Classification",
            SectionKind::Morphology => "Morphology",
            SectionKind::Culture => "Culture and Growth Conditions",
            SectionKind::Physiology => "Physiology and Metabolism",
            SectionKind::Isolation => "Isolation, Sampling and Environmental Information",
            SectionKind::Safety => "Safety Information",
            SectionKind::Sequence => "Sequence Information",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A labeled value with the `@ref` marker of the entry it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: RowValue,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowValue {
    Text(String),
    /// Several fields describing one entry (a culture medium, an isolation event).
    Group(Vec<Row>),
    /// One-to-many sub-field rendered as a nested table.
    Table(Table),
}

impl Row {
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Row {
            label: label.into(),
            value: RowValue::Text(value.into()),
            provenance: None,
        }
    }

    pub fn group(label: impl Into<String>, rows: Vec<Row>) -> Self {
        Row {
            label: label.into(),
            value: RowValue::Group(rows),
            provenance: None,
        }
    }

    pub fn table(label: impl Into<String>, table: Table) -> Self {
        Row {
            label: label.into(),
            value: RowValue::Table(table),
            provenance: None,
        }
    }

    pub fn with_provenance(mut self, provenance: Option<Value>) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            RowValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Value>,
}

impl Table {
    pub fn new(columns: &[&str]) -> Self {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, filling missing cells with [`PLACEHOLDER`]. A row with
    /// no values at all is dropped.
    pub fn push(&mut self, cells: Vec<Option<String>>, provenance: Option<Value>) {
        if cells.iter().all(Option::is_none) {
            return;
        }
        let mut cells: Vec<String> = cells
            .into_iter()
            .map(|cell| cell.unwrap_or_else(|| PLACEHOLDER.to_string()))
            .collect();
        cells.resize(self.columns.len(), PLACEHOLDER.to_string());
        self.rows.push(TableRow { cells, provenance });
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Wraps the table in a row, or `None` when it has no rows.
    pub fn into_row(self, label: &str) -> Option<Row> {
        if self.is_empty() {
            None
        } else {
            Some(Row::table(label, self))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub rows: Vec<Row>,
}

/// Ordered fact sheet for one species.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    pub sections: Vec<Section>,
}

/// One leaf of a view-model, addressed by its label path.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub section: SectionKind,
    pub path: String,
    pub value: String,
    pub reference: Option<String>,
}

impl ViewModel {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Flattens every text leaf and table row into a label path and value.
    /// Table rows become `column: cell` pairs joined by "; ".
    pub fn flatten(&self) -> Vec<FlatRow> {
        let mut out = Vec::new();
        for section in &self.sections {
            for row in &section.rows {
                flatten_row(section.kind, "", row, None, &mut out);
            }
        }
        out
    }
}

fn flatten_row(
    section: SectionKind,
    prefix: &str,
    row: &Row,
    inherited: Option<&Value>,
    out: &mut Vec<FlatRow>,
) {
    let path = if prefix.is_empty() {
        row.label.clone()
    } else {
        format!("{} / {}", prefix, row.label)
    };
    let provenance = row.provenance.as_ref().or(inherited);
    match &row.value {
        RowValue::Text(text) => out.push(FlatRow {
            section,
            path,
            value: text.clone(),
            reference: provenance.map(reference_text),
        }),
        RowValue::Group(children) => {
            for child in children {
                flatten_row(section, &path, child, provenance, out);
            }
        }
        RowValue::Table(table) => {
            for table_row in &table.rows {
                let value = table
                    .columns
                    .iter()
                    .zip(&table_row.cells)
                    .map(|(column, cell)| format!("{}: {}", column, cell))
                    .collect::<Vec<_>>()
                    .join("; ");
                out.push(FlatRow {
                    section,
                    path: path.clone(),
                    value,
                    reference: table_row.provenance.as_ref().or(provenance).map(reference_text),
                });
            }
        }
    }
}

/// Text form of an `@ref` marker; strings are shown without quotes.
pub fn reference_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_order_matches_declaration_order() {
        let mut sorted = SectionKind::CANONICAL;
        sorted.sort();
        assert_eq!(sorted, SectionKind::CANONICAL);
    }

    #[test]
    fn table_fills_placeholders_and_drops_empty_rows() {
        let mut table = Table::new(&["Category 1", "Category 2", "Category 3"]);
        table.push(vec![Some("soil".into()), None, None], None);
        table.push(vec![None, None, None], Some(json!(1)));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells, vec!["soil", "-", "-"]);
        assert!(Table::new(&["a"]).into_row("Empty").is_none());
    }

    #[test]
    fn flatten_joins_group_labels_and_inherits_refs() {
        let mut table = Table::new(&["Enzyme", "Activity"]);
        table.push(vec![Some("catalase".into()), Some("+".into())], Some(json!(67770)));
        let model = ViewModel {
            species: None,
            sections: vec![Section {
                kind: SectionKind::Culture,
                title: SectionKind::Culture.title(),
                rows: vec![
                    Row::group("Culture Medium", vec![Row::text("Name", "R2A")])
                        .with_provenance(Some(json!("ref-1"))),
                    Row::table("Enzymes", table),
                ],
            }],
        };
        let flat = model.flatten();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].path, "Culture Medium / Name");
        assert_eq!(flat[0].reference.as_deref(), Some("ref-1"));
        assert_eq!(flat[1].value, "Enzyme: catalase; Activity: +");
        assert_eq!(flat[1].reference.as_deref(), Some("67770"));
    }

    #[test]
    fn rows_serialize_with_ref_marker() {
        let row = Row::text("Gram Stain", "positive").with_provenance(Some(json!(20215)));
        let encoded = serde_json::to_value(&row).unwrap();
        assert_eq!(
            encoded,
            json!({"label": "Gram Stain", "value": {"kind": "text", "value": "positive"}, "ref": 20215})
        );
    }
}

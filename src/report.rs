//! Text, JSON and TSV renderings of fact sheets and listings.
use crate::error::{CrateError, Result};
use crate::listing::Page;
use crate::portal::PortalRecord;
use crate::taxon::TaxonRecord;
use crate::taxon::normalizer::species_slug;
use crate::term::view::{Row, RowValue, Table, ViewModel, reference_text};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

const TSV_HEADER: [&str; 5] = ["species", "section", "field", "value", "ref"];

/// Streams fact-sheet rows as TSV, one line per leaf value.
pub struct TsvReport<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TsvReport<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(inner);
        writer.write_record(TSV_HEADER)?;
        Ok(TsvReport { writer })
    }

    /// Writes every leaf of `model`; returns the number of lines written.
    pub fn write_model(&mut self, species: &str, model: &ViewModel) -> Result<usize> {
        let rows = model.flatten();
        for row in &rows {
            self.writer.write_record([
                species,
                row.section.title(),
                row.path.as_str(),
                row.value.as_str(),
                row.reference.as_deref().unwrap_or(""),
            ])?;
        }
        Ok(rows.len())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| CrateError::IoError(e.into_error()))
    }
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Human-readable fact sheet: one block per section, nested rows indented.
pub fn write_view_text(model: &ViewModel, writer: &mut dyn Write) -> Result<()> {
    if let Some(species) = &model.species {
        writeln!(writer, "== {} ==", species)?;
    }
    if model.is_empty() {
        writeln!(writer, "No fact sheet data available.")?;
        return Ok(());
    }
    for section in &model.sections {
        writeln!(writer)?;
        writeln!(writer, "[{}]", section.title)?;
        for row in &section.rows {
            write_row(row, 1, writer)?;
        }
    }
    Ok(())
}

fn write_row(row: &Row, depth: usize, writer: &mut dyn Write) -> Result<()> {
    let indent = "  ".repeat(depth);
    let marker = row
        .provenance
        .as_ref()
        .map(|r| format!(" (@ref {})", reference_text(r)))
        .unwrap_or_default();
    match &row.value {
        RowValue::Text(text) => {
            writeln!(writer, "{}{}: {}{}", indent, row.label, text, marker)?;
        }
        RowValue::Group(children) => {
            writeln!(writer, "{}{}{}", indent, row.label, marker)?;
            for child in children {
                write_row(child, depth + 1, writer)?;
            }
        }
        RowValue::Table(table) => {
            writeln!(writer, "{}{}{}", indent, row.label, marker)?;
            write_table(table, depth + 1, writer)?;
        }
    }
    Ok(())
}

fn write_table(table: &Table, depth: usize, writer: &mut dyn Write) -> Result<()> {
    let indent = "  ".repeat(depth);
    let with_refs = table.rows.iter().any(|row| row.provenance.is_some());

    let mut lines: Vec<Vec<String>> = Vec::with_capacity(table.rows.len() + 1);
    let mut header = table.columns.clone();
    if with_refs {
        header.push("@ref".to_string());
    }
    lines.push(header);
    for row in &table.rows {
        let mut cells = row.cells.clone();
        if with_refs {
            cells.push(row.provenance.as_ref().map(reference_text).unwrap_or_default());
        }
        lines.push(cells);
    }

    let widths: Vec<usize> = (0..lines[0].len())
        .map(|col| {
            lines
                .iter()
                .filter_map(|line| line.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for line in &lines {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        writeln!(writer, "{}{}", indent, padded.join(" | ").trim_end())?;
    }
    Ok(())
}

pub fn write_taxa_page(page: &Page<TaxonRecord>, writer: &mut dyn Write) -> Result<()> {
    if page.items.is_empty() {
        writeln!(writer, "No results found. Try searching for another species.")?;
    }
    for taxon in &page.items {
        writeln!(
            writer,
            "{:>6}  {:>10}  {}  ({})",
            taxon.taxon_id,
            taxon.ncbi_taxon_id,
            taxon.species,
            species_slug(&taxon.species)
        )?;
    }
    write_page_footer(page, writer)
}

pub fn write_portals_page(page: &Page<PortalRecord>, writer: &mut dyn Write) -> Result<()> {
    if page.items.is_empty() {
        writeln!(writer, "No portals found.")?;
    }
    for portal in &page.items {
        writeln!(
            writer,
            "{:>6}  {:>10}  {}",
            portal.portal_id,
            portal.taxon_id,
            portal.web.join(", ")
        )?;
    }
    write_page_footer(page, writer)
}

fn write_page_footer<T>(page: &Page<T>, writer: &mut dyn Write) -> Result<()> {
    writeln!(
        writer,
        "Page {} of {} ({} total)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    )?;
    if page.has_prev() {
        writeln!(writer, "Previous: --page {}", page.page - 1)?;
    }
    if page.has_next() {
        writeln!(writer, "Next: --page {}", page.page + 1)?;
    }
    Ok(())
}

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod portal;
pub mod raw;
pub mod report;
pub mod taxon;
pub mod term;

use api::ApiClient;
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Command, OutputFormat, PortalsCommand, RawsCommand, TaxaCommand, TermsCommand};
use config::ClientConfig;
use error::{CrateError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use listing::paginate;
use log::{error, info};
use portal::PortalRecord;
use raw::{RawOutcome, RawQuery};
use report::{TsvReport, write_json, write_portals_page, write_taxa_page, write_view_text};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use taxon::TaxonRecord;
use taxon::normalizer::resolve_slug;
use taxon::record::{search, sort_by_species};
use term::{TermDocument, ViewModel, assemble};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .format_target(false)
        .format_timestamp_secs()
        .filter_level(level)
        .try_init()
        .expect("Failed to initialize logger");

    // Offline normalization needs no backend.
    if let Command::Normalize { file, species, format } = &cli.command {
        let doc = read_document(file, species.as_deref())?;
        return render_model(&assemble(&doc), *format);
    }

    let config = ClientConfig::new(&cli.api_url, cli.timeout_secs)?;
    let client = ApiClient::new(config)?;

    let outcome = match cli.command {
        Command::Taxa(command) => run_taxa(&client, command).await,
        Command::Portals(command) => run_portals(&client, command).await,
        Command::Raws(command) => run_raws(&client, command).await,
        Command::Terms(command) => run_terms(&client, command).await,
        Command::Export { output } => run_export(&client, output).await,
        Command::Normalize { .. } => Ok(()),
    };
    if let Err(e) = &outcome {
        error!("{}", e);
    }
    outcome
}

async fn run_taxa(client: &ApiClient, command: TaxaCommand) -> Result<()> {
    match command {
        TaxaCommand::List { search: query, paging } => {
            let mut taxa = client.list_taxa(&[]).await?;
            sort_by_species(&mut taxa);
            let matches = search(&taxa, query.as_deref().unwrap_or(""));
            let page = paginate(&matches, paging.page, paging.per_page);
            write_taxa_page(&page, &mut io::stdout().lock())
        }
        TaxaCommand::Show { slug, format } => {
            let taxa = client.list_taxa(&[]).await?;
            let taxon = resolve_slug(&taxa, &slug)?;
            info!(
                "Resolved '{}' to {} (NCBI taxon {})",
                slug, taxon.species, taxon.ncbi_taxon_id
            );
            let record = client.term_for(&taxon.ncbi_taxon_id).await?;
            let doc = TermDocument::from_record(record)?.with_species(&taxon.species);
            render_model(&assemble(&doc), format)
        }
        TaxaCommand::Detail { taxon_id } => {
            let taxon = client
                .taxon_detail(taxon_id)
                .await?
                .ok_or_else(|| CrateError::RecordNotFound(format!("taxon {}", taxon_id)))?;
            write_json(&taxon, &mut io::stdout().lock())
        }
        TaxaCommand::Create(args) => {
            let taxon = TaxonRecord::new(args.taxon_id, &args.ncbi_taxon_id, &args.species);
            taxon.validate()?;
            if client.taxon_detail(taxon.taxon_id).await?.is_some() {
                return Err(CrateError::TaxonIdTaken(taxon.taxon_id));
            }
            let saved = client.upsert_taxa(&[taxon]).await?;
            info!("Created {} taxon record(s)", saved.len());
            write_json(&saved, &mut io::stdout().lock())
        }
        TaxaCommand::Update(args) => {
            let taxon = TaxonRecord::new(args.taxon_id, &args.ncbi_taxon_id, &args.species);
            taxon.validate()?;
            if client.taxon_detail(taxon.taxon_id).await?.is_none() {
                return Err(CrateError::RecordNotFound(format!("taxon {}", taxon.taxon_id)));
            }
            let saved = client.upsert_taxa(&[taxon]).await?;
            write_json(&saved, &mut io::stdout().lock())
        }
        TaxaCommand::Delete { taxon_ids } => {
            let result = client.delete_taxa(&taxon_ids).await?;
            write_json(&result, &mut io::stdout().lock())
        }
    }
}

async fn run_portals(client: &ApiClient, command: PortalsCommand) -> Result<()> {
    match command {
        PortalsCommand::List { paging } => {
            let mut portals: Vec<PortalRecord> = client
                .list_portals(&[])
                .await?
                .into_iter()
                .filter(PortalRecord::exists)
                .collect();
            portals.sort_by_key(|portal| portal.portal_id);
            let page = paginate(&portals, paging.page, paging.per_page);
            write_portals_page(&page, &mut io::stdout().lock())
        }
        PortalsCommand::Create { portal_id, taxon_id, sources } => {
            let portal = PortalRecord::new(portal_id, taxon_id.unwrap_or(portal_id), &sources)?;
            if client.portal_detail(portal_id).await?.is_some() {
                return Err(CrateError::PortalIdTaken(portal_id));
            }
            let saved = client.create_portals(&[portal]).await?;
            info!("Created {} portal record(s)", saved.len());
            write_json(&saved, &mut io::stdout().lock())
        }
        PortalsCommand::Delete { portal_ids } => {
            let result = client.delete_portals(&portal_ids).await?;
            write_json(&result, &mut io::stdout().lock())
        }
        PortalsCommand::Retrieve { ncbi_taxon_id, source } => {
            info!("Retrieving {} data for NCBI taxon {}", source, ncbi_taxon_id);
            let data = client.retrieve_source_data(&ncbi_taxon_id, source).await?;
            write_json(&data, &mut io::stdout().lock())
        }
    }
}

async fn run_raws(client: &ApiClient, command: RawsCommand) -> Result<()> {
    let mut out = io::stdout().lock();
    match command {
        RawsCommand::Get(args) => {
            let docs = client.get_raws(&RawQuery::new(&args.taxon_ids, &args.sources)).await?;
            for doc in &docs {
                let state = if doc.is_fetched() { "fetched" } else { "pending" };
                writeln!(out, "{}\t{}\t{}\t{}", doc.taxon_id, doc.web, state, doc.species)?;
            }
            writeln!(out, "{} raw document(s)", docs.len())?;
        }
        RawsCommand::Store(args) => {
            let outcomes = client.store_raws(&RawQuery::new(&args.taxon_ids, &args.sources)).await?;
            write_raw_outcomes(&outcomes, "Stored", &mut out)?;
        }
        RawsCommand::Delete(args) => {
            let outcomes = client.delete_raws(&RawQuery::new(&args.taxon_ids, &args.sources)).await?;
            write_raw_outcomes(&outcomes, "Deleted", &mut out)?;
        }
    }
    Ok(())
}

/// One line per taxon: status, succeeded, empty and missing sources.
fn write_raw_outcomes(outcomes: &[RawOutcome], verb: &str, out: &mut dyn Write) -> Result<()> {
    for outcome in outcomes {
        writeln!(out, "{}\t{}\t{}", outcome.taxon_id, outcome.status, outcome.species)?;
        let succeeded = outcome.succeeded_webs();
        if !succeeded.is_empty() {
            writeln!(out, "  {}: {}", verb.to_lowercase(), succeeded.join(", "))?;
        }
        let empty: Vec<&str> = outcome.found_webs.empty().iter().map(|web| web.web.as_str()).collect();
        if !empty.is_empty() {
            writeln!(out, "  no data: {}", empty.join(", "))?;
        }
        if !outcome.missing_webs.is_empty() {
            writeln!(out, "  missing: {}", outcome.missing_webs.join(", "))?;
        }
    }
    let missing = outcomes.iter().filter(|outcome| outcome.is_missing()).count();
    writeln!(
        out,
        "{} raw data for {} taxon/taxa ({} not found)",
        verb,
        outcomes.len() - missing,
        missing
    )?;
    Ok(())
}

async fn run_terms(client: &ApiClient, command: TermsCommand) -> Result<()> {
    match command {
        TermsCommand::Get { ncbi_taxon_id, format } => {
            let record = client.term_for(&ncbi_taxon_id).await?;
            let doc = TermDocument::from_record(record)?;
            render_model(&assemble(&doc), format)
        }
        TermsCommand::Store { ncbi_taxon_ids } => {
            let stored = client.store_terms(&ncbi_taxon_ids).await?;
            info!("Stored terms for {} taxon/taxa", stored.len());
            let mut out = io::stdout().lock();
            for record in &stored {
                writeln!(out, "{}\t{}", record.taxon_id, record.species)?;
            }
            Ok(())
        }
        TermsCommand::Delete { ncbi_taxon_ids } => {
            let result = client.delete_terms(&ncbi_taxon_ids).await?;
            write_json(&result, &mut io::stdout().lock())
        }
        TermsCommand::Search { keyword } => {
            let hits = client.search_terms(&keyword).await?;
            let mut out = io::stdout().lock();
            if hits.is_empty() {
                writeln!(out, "No term documents match '{}'.", keyword.trim())?;
            }
            for record in &hits {
                writeln!(out, "{}\t{}", record.taxon_id, record.species)?;
            }
            Ok(())
        }
    }
}

async fn run_export(client: &ApiClient, output: Option<PathBuf>) -> Result<()> {
    let start_time = Instant::now();
    let output_path = output.unwrap_or_else(|| default_export_path(Local::now().date_naive()));

    let mut taxa = client.list_taxa(&[]).await?;
    sort_by_species(&mut taxa);
    info!("Exporting {} taxa to {:?}...", taxa.len(), output_path);

    let file = File::create(&output_path).map_err(|e| {
        error!("Failed to create output file {:?}: {}", output_path, e);
        CrateError::IoError(e)
    })?;
    let mut report = TsvReport::new(BufWriter::new(file))?;

    let pb = ProgressBar::new(taxa.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .map_err(|e| CrateError::ConfigError(format!("progress bar template: {}", e)))?
            .progress_chars("##-"),
    );

    let mut exported = 0usize;
    let mut lines = 0usize;
    let mut error_details: Vec<String> = Vec::new();
    for taxon in &taxa {
        pb.set_message(taxon.species.clone());
        match export_taxon(client, taxon, &mut report).await {
            Ok(written) => {
                exported += 1;
                lines += written;
            }
            Err(e) => {
                let message = format!("{} (NCBI {}): {}", taxon.species, taxon.ncbi_taxon_id, e);
                pb.println(format!("Error: {}", message));
                error!("{}", message);
                error_details.push(message);
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Export complete.");

    report.finish()?.flush()?;

    println!("\n--- Export Summary ---");
    println!("Taxa in catalog: {}", taxa.len());
    println!("Exported: {} ({} lines)", exported, lines);
    println!("Failed: {}", error_details.len());
    if !error_details.is_empty() {
        println!("\n--- Detailed Errors ---");
        for detail in &error_details {
            println!("- {}", detail);
        }
    }
    println!("Output saved to: {}", output_path.display());
    println!("Execution time: {:.2?}", start_time.elapsed());
    Ok(())
}

async fn export_taxon<W: Write>(
    client: &ApiClient,
    taxon: &TaxonRecord,
    report: &mut TsvReport<W>,
) -> Result<usize> {
    let record = client.term_for(&taxon.ncbi_taxon_id).await?;
    let doc = TermDocument::from_record(record)?.with_species(&taxon.species);
    report.write_model(&taxon.species, &assemble(&doc))
}

fn default_export_path(today: NaiveDate) -> PathBuf {
    PathBuf::from(format!("terms_export_{}.tsv", today.format("%Y%m%d")))
}

/// Loads a term document (bare or wrapped in a term record) from disk.
fn read_document(path: &Path, species: Option<&str>) -> Result<TermDocument> {
    let text = fs::read_to_string(path)?;
    let doc = TermDocument::parse(&text)?;
    Ok(match species {
        Some(name) => doc.with_species(name),
        None => doc,
    })
}

fn render_model(model: &ViewModel, format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => write_view_text(model, &mut out),
        OutputFormat::Json => write_json(model, &mut out),
        OutputFormat::Tsv => {
            let mut report = TsvReport::new(&mut out)?;
            report.write_model(model.species.as_deref().unwrap_or(""), model)?;
            report.finish()?;
            Ok(())
        }
    }
}

use crate::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::listing::ITEMS_PER_PAGE;
use crate::portal::Source;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the catalog backend API.
    #[arg(long, env = "BACTERY_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse and manage the species catalog.
    #[command(subcommand)]
    Taxa(TaxaCommand),
    /// Manage which external sources are linked to a taxon.
    #[command(subcommand)]
    Portals(PortalsCommand),
    /// Fetch, store or drop raw source payloads.
    #[command(subcommand)]
    Raws(RawsCommand),
    /// Work with normalized term documents.
    #[command(subcommand)]
    Terms(TermsCommand),
    /// Normalize a term document read from a local JSON file.
    Normalize {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Species name shown in the fact sheet header.
        #[arg(long)]
        species: Option<String>,
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Normalize every taxon in the catalog into one TSV file.
    Export {
        /// Defaults to terms_export_<YYYYMMDD>.tsv in the working directory.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaxaCommand {
    /// Sorted, searchable, paginated species listing.
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Fact sheet for the species behind a slug such as "Bacillus-subtilis".
    Show {
        slug: String,
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    Detail {
        taxon_id: u64,
    },
    /// Register a new taxon; fails if the id is taken.
    Create(TaxonArgs),
    /// Overwrite an existing taxon.
    Update(TaxonArgs),
    Delete {
        #[arg(required = true)]
        taxon_ids: Vec<u64>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TaxonArgs {
    #[arg(long)]
    pub taxon_id: u64,
    #[arg(long)]
    pub ncbi_taxon_id: String,
    #[arg(long)]
    pub species: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = ITEMS_PER_PAGE)]
    pub per_page: usize,
}

#[derive(Subcommand, Debug)]
pub enum PortalsCommand {
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
    Create {
        #[arg(long)]
        portal_id: u64,
        /// Defaults to the portal id.
        #[arg(long)]
        taxon_id: Option<u64>,
        #[arg(short, long = "source", value_enum, required = true)]
        sources: Vec<Source>,
    },
    Delete {
        #[arg(required = true)]
        portal_ids: Vec<u64>,
    },
    /// Ask the backend to pull one source's data for a taxon.
    Retrieve {
        #[arg(long)]
        ncbi_taxon_id: String,
        #[arg(short, long, value_enum)]
        source: Source,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RawArgs {
    /// NCBI taxon ids; none selects all.
    #[arg(long = "taxon-id")]
    pub taxon_ids: Vec<String>,
    /// Sources; none selects all.
    #[arg(short, long = "source", value_enum)]
    pub sources: Vec<Source>,
}

#[derive(Subcommand, Debug)]
pub enum RawsCommand {
    Get(RawArgs),
    Store(RawArgs),
    Delete(RawArgs),
}

#[derive(Subcommand, Debug)]
pub enum TermsCommand {
    /// Fact sheet for one NCBI taxon id.
    Get {
        ncbi_taxon_id: String,
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Rebuild term documents from stored raws.
    Store {
        #[arg(required = true)]
        ncbi_taxon_ids: Vec<String>,
    },
    Delete {
        #[arg(required = true)]
        ncbi_taxon_ids: Vec<String>,
    },
    Search {
        keyword: String,
    },
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented, human-readable fact sheet.
    Text,
    /// Ordered view-model as pretty JSON.
    Json,
    /// One tab-separated line per value.
    Tsv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_taxa_show() {
        let args = vec!["bactery", "taxa", "show", "Bacillus-subtilis", "-f", "json"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.api_url, DEFAULT_API_URL);
        assert_eq!(cli.timeout_secs, 30);
        match cli.command {
            Command::Taxa(TaxaCommand::Show { slug, format }) => {
                assert_eq!(slug, "Bacillus-subtilis");
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_taxa_list_defaults() {
        let cli = Cli::parse_from(["bactery", "taxa", "list"]);
        match cli.command {
            Command::Taxa(TaxaCommand::List { search, paging }) => {
                assert!(search.is_none());
                assert_eq!(paging, PageArgs { page: 1, per_page: ITEMS_PER_PAGE });
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_globals_after_subcommand() {
        let cli = Cli::parse_from([
            "bactery",
            "normalize",
            "doc.json",
            "--species",
            "Bacillus subtilis",
            "--api-url",
            "http://backend:9000/api/v1",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url, "http://backend:9000/api/v1");
        match cli.command {
            Command::Normalize { file, species, format } => {
                assert_eq!(file, PathBuf::from("doc.json"));
                assert_eq!(species.as_deref(), Some("Bacillus subtilis"));
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_portal_sources() {
        let cli = Cli::parse_from([
            "bactery", "portals", "create", "--portal-id", "7", "-s", "bacdive", "-s", "ncbi",
        ]);
        match cli.command {
            Command::Portals(PortalsCommand::Create { portal_id, taxon_id, sources }) => {
                assert_eq!(portal_id, 7);
                assert!(taxon_id.is_none());
                assert_eq!(sources, vec![Source::Bacdive, Source::Ncbi]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_raws_select_all_by_default() {
        let cli = Cli::parse_from(["bactery", "raws", "store"]);
        match cli.command {
            Command::Raws(RawsCommand::Store(args)) => {
                assert!(args.taxon_ids.is_empty());
                assert!(args.sources.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    #[should_panic] // At least one source is required
    fn test_cli_portal_without_source() {
        Cli::try_parse_from(["bactery", "portals", "create", "--portal-id", "7"]).unwrap();
    }

    #[test]
    #[should_panic] // Unknown source names are rejected
    fn test_cli_unknown_source() {
        Cli::try_parse_from(["bactery", "portals", "retrieve", "--ncbi-taxon-id", "1423", "-s", "kegg"]).unwrap();
    }

    #[test]
    #[should_panic] // Taxon ids must be numeric
    fn test_cli_non_numeric_taxon_id() {
        Cli::try_parse_from(["bactery", "taxa", "detail", "abc"]).unwrap();
    }
}

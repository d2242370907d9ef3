//! Lineage ranks and names from the NCBI part of a term document.
use super::{Row, SectionKind, TermDocument};
use crate::term::accessor::{field, lookup, text_field};
use crate::term::coerce::records;
use serde_json::Value;

/// Display label and the NCBI rank names that fill it.
const RANKS: [(&str, &[&str]); 6] = [
    ("Domain", &["superkingdom", "domain"]),
    ("Phylum", &["phylum"]),
    ("Class", &["class"]),
    ("Order", &["order"]),
    ("Family", &["family"]),
    ("Genus", &["genus"]),
];

const LINEAGE_ROOT: &str = "cellular organisms";
const OCCURRENCE_KEY: &str = "Occurence (geoference records)";

pub fn extract(doc: &TermDocument) -> Vec<Row> {
    let Some(section) = doc.section(SectionKind::Taxonomy.source_key()) else {
        return Vec::new();
    };

    let lineage = Lineage::from_section(section);
    let mut rows: Vec<Row> = RANKS
        .iter()
        .zip(lineage.ranks)
        .filter_map(|((label, _), name)| name.map(|name| Row::text(*label, name)))
        .collect();

    let species = doc.species().map(str::to_string).or(lineage.species);
    if let Some(species) = species {
        rows.push(Row::text("Species", species));
    }

    let occurrences = records(doc.section(OCCURRENCE_KEY), OCCURRENCE_KEY);
    if let Some(name) = occurrences
        .into_iter()
        .find_map(|occurrence| text_field(occurrence, "scientificName"))
    {
        rows.push(Row::text("Full Scientific Name (LPSN)", name));
    }

    rows
}

struct Lineage {
    ranks: [Option<String>; 6],
    species: Option<String>,
}

impl Lineage {
    fn from_section(section: &Value) -> Self {
        let taxa = records(lookup(section, &["LineageEx".into(), "Taxon".into()]), "LineageEx.Taxon");
        if taxa.is_empty() {
            let names: Vec<String> = field(section, "Lineage")
                .and_then(Value::as_str)
                .map(|lineage| {
                    lineage
                        .split(';')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            return Self::positional(names);
        }

        if taxa.iter().any(|taxon| text_field(taxon, "Rank").is_some()) {
            Self::by_rank(&taxa)
        } else {
            Self::positional(
                taxa.iter()
                    .filter_map(|taxon| text_field(taxon, "ScientificName"))
                    .collect(),
            )
        }
    }

    fn by_rank(taxa: &[&Value]) -> Self {
        let mut ranks: [Option<String>; 6] = Default::default();
        let mut species = None;
        for taxon in taxa {
            let (Some(rank), Some(name)) = (text_field(taxon, "Rank"), text_field(taxon, "ScientificName")) else {
                continue;
            };
            let rank = rank.to_lowercase();
            if rank == "species" {
                species = Some(name);
                continue;
            }
            if let Some(slot) = RANKS.iter().position(|(_, names)| names.contains(&rank.as_str())) {
                ranks[slot].get_or_insert(name);
            }
        }
        Lineage { ranks, species }
    }

    /// Domain..Genus by position, after an optional "cellular organisms" root.
    fn positional(mut names: Vec<String>) -> Self {
        if names.first().is_some_and(|first| first.eq_ignore_ascii_case(LINEAGE_ROOT)) {
            names.remove(0);
        }
        let mut ranks: [Option<String>; 6] = Default::default();
        for (slot, name) in ranks.iter_mut().zip(names) {
            *slot = Some(name);
        }
        Lineage { ranks, species: None }
    }
}

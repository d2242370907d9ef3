use crate::error::{CrateError, Result};
use crate::taxon::record::TaxonRecord;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalizes species labels for comparison (trimmed, single spaces).
pub fn normalize_species_name(species: &str) -> String {
    WHITESPACE_RUN.replace_all(species.trim(), " ").into_owned()
}

/// URL slug for a species: whitespace runs become a single hyphen.
pub fn species_slug(species: &str) -> String {
    WHITESPACE_RUN.replace_all(species.trim(), "-").into_owned()
}

/// Human-readable species name back from a slug.
pub fn slug_to_species(slug: &str) -> String {
    slug.trim().replace('-', " ")
}

/// Finds the listing entry whose species matches `slug`.
///
/// Slugs are compared slug-to-slug first so that species names which contain
/// hyphens still resolve; the plain de-slugged name is the fallback.
pub fn resolve_slug<'a>(records: &'a [TaxonRecord], slug: &str) -> Result<&'a TaxonRecord> {
    let wanted_slug = species_slug(slug);
    let wanted_name = normalize_species_name(&slug_to_species(slug));
    records
        .iter()
        .find(|record| species_slug(&record.species) == wanted_slug)
        .or_else(|| {
            records
                .iter()
                .find(|record| normalize_species_name(&record.species) == wanted_name)
        })
        .ok_or_else(|| CrateError::RecordNotFound(format!("species '{}'", wanted_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxon(taxon_id: u64, species: &str) -> TaxonRecord {
        TaxonRecord {
            taxon_id,
            ncbi_taxon_id: (taxon_id * 10).to_string(),
            species: species.to_string(),
            status: None,
            info: None,
        }
    }

    #[test]
    fn trims_and_collapses() {
        assert_eq!(
            normalize_species_name("  Bacillus   subtilis "),
            "Bacillus subtilis"
        );
        assert_eq!(normalize_species_name("Single"), "Single");
    }

    #[test]
    fn slugs_replace_whitespace_runs() {
        assert_eq!(species_slug("Bacillus subtilis"), "Bacillus-subtilis");
        assert_eq!(species_slug("Bacillus \t subtilis"), "Bacillus-subtilis");
        assert_eq!(slug_to_species("Bacillus-subtilis"), "Bacillus subtilis");
    }

    #[test]
    fn resolves_known_species() {
        let listing = vec![taxon(1, "Escherichia coli"), taxon(2, "Bacillus subtilis")];
        let found = resolve_slug(&listing, "Bacillus-subtilis").unwrap();
        assert_eq!(found.taxon_id, 2);
        assert_eq!(found.ncbi_taxon_id, "20");
    }

    #[test]
    fn resolves_hyphenated_species() {
        let listing = vec![taxon(7, "Candidatus Pelagibacter ubique-like")];
        let found = resolve_slug(&listing, "Candidatus-Pelagibacter-ubique-like").unwrap();
        assert_eq!(found.taxon_id, 7);
    }

    #[test]
    fn unknown_species_is_not_found() {
        let listing = vec![taxon(1, "Escherichia coli")];
        let err = resolve_slug(&listing, "Vibrio-cholerae").unwrap_err();
        assert!(matches!(err, CrateError::RecordNotFound(ref what) if what == "species 'Vibrio cholerae'"));
    }
}

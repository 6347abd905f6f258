//! Converter tests reading real files and writing YAML.

use std::io::Write;

use scholar_pubs::convert::{bibtex, citations, tabular};
use scholar_pubs::formatters::{to_yaml, write_json, write_yaml};
use scholar_pubs::{ConvertError, Normalizer, Publication, PublicationEntry};

fn temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// =============================================================================
// BibTeX
// =============================================================================

#[test]
fn test_bibtex_file_to_yaml() {
    let bib = temp_file(
        r"@article{a,
  author = {M{\'e}ndez, Jos{\'e} and Cheeseman, Iain},
  title = {Outer kinetochore assembly},
  journal = {eLife},
  year = {2022},
  doi = {10.7554/eLife.1}
}
@article{b,
  author = {Doe, Jane},
  title = {Untitled year study of things},
  journal = {Cell},
  year = {n.d.}
}
",
        ".bib",
    );

    let entries = bibtex::read_bibtex_file(bib.path(), &Normalizer::default()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Outer kinetochore assembly");
    assert_eq!(entries[0].authors[1], "I. Cheeseman");
    assert_eq!(entries[1].publication_year, None);

    let out = tempfile::tempdir().unwrap();
    let yaml_path = out.path().join("publications.yml");
    write_yaml(&yaml_path, &entries).unwrap();
    let yaml = std::fs::read_to_string(&yaml_path).unwrap();
    assert!(yaml.starts_with("- title: Outer kinetochore assembly"));
    assert!(yaml.contains("publication_year: null"));
}

#[test]
fn test_bibtex_missing_file() {
    let err = bibtex::read_bibtex_file("/nonexistent/citations.bib", &Normalizer::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
}

// =============================================================================
// CSV
// =============================================================================

#[test]
fn test_csv_file_filters_item_types() {
    let csv = temp_file(
        "Title,Authors,Journal,Publication year,DOI,Item type\n\
         Kinetochore assembly,\"Desai A, Cheeseman IM\",J Cell Biol,2018,10.1/a,Journal Article\n\
         A thesis,Someone,MIT,2020,,Thesis\n",
        ".csv",
    );

    let entries = tabular::read_csv_file(csv.path()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].authors, vec!["Desai A", "Cheeseman IM"]);
}

#[test]
fn test_csv_missing_column() {
    let csv = temp_file("Title,Authors\nA,B\n", ".csv");
    let err = tabular::read_csv_file(csv.path()).unwrap_err();
    assert_eq!(err.to_string(), "Missing column: Journal");
}

// =============================================================================
// Citation dump
// =============================================================================

#[test]
fn test_citation_dump_keeps_order() {
    let dump = temp_file(
        "1. Cell. 2010 Jan;1:1. doi: 10.1/old.\n\nOlder title\n\nA B.\n\n\
         2. Nature. 2020 Feb;2:2. doi: 10.1/new.\n\nNewer title\n\nC D.\n",
        ".txt",
    );

    let entries = citations::read_citations_file(dump.path()).unwrap();
    let years: Vec<_> = entries.iter().map(|e| e.publication_year).collect();
    assert_eq!(years, vec![Some(2010), Some(2020)]);
    assert_eq!(entries[1].doi, "10.1/new");
}

// =============================================================================
// Writers
// =============================================================================

#[test]
fn test_yaml_keeps_non_ascii() {
    let entries = vec![PublicationEntry {
        title: "Régulation du kinétochore".to_string(),
        authors: vec!["José Méndez".to_string()],
        journal: "Médecine/Sciences".to_string(),
        publication_year: Some(2019),
        doi: String::new(),
    }];
    let yaml = to_yaml(&entries).unwrap();
    assert!(yaml.contains("Régulation du kinétochore"));
    assert!(yaml.contains("José Méndez"));
    assert!(!yaml.contains("\\u"));
}

#[test]
fn test_detailed_json_written() {
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("publications_detailed.json");
    let publications = vec![Publication {
        title: "Kinetochore assembly".to_string(),
        citation_count: 12,
        semantic_scholar_id: "abc".to_string(),
        ..Default::default()
    }];

    write_json(&path, &publications).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  {\n    \"title\": \"Kinetochore assembly\""));
    let back: Vec<Publication> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, publications);
}

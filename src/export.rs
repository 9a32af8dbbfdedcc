use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::normalize::{
    articles, awards, contact, others, presentations, profile, publications, works, Entry,
    PresentationEntry, RankedEntry,
};
use crate::notion::{query_all, Page, QuerySource, Sort};

pub const DEFAULT_OUTPUT_PATH: &str = "data/notion_data.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Database {
    Profile,
    Publications,
    Presentations,
    Awards,
    Articles,
    Contact,
    Others,
    Works,
}

impl Database {
    pub const ALL: [Database; 8] = [
        Database::Profile,
        Database::Publications,
        Database::Presentations,
        Database::Awards,
        Database::Articles,
        Database::Contact,
        Database::Others,
        Database::Works,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Database::Profile => "5e5bcbae-fd88-43c1-a2fe-1979776d3a21",
            Database::Publications => "eac0998c-f09b-4446-a856-59aeb64f3815",
            Database::Presentations => "4bd20b5d-2364-47fb-ae8c-7583f495ca49",
            Database::Awards => "64ec4bb4-2dce-4414-b48c-9b2a87b8e844",
            Database::Articles => "edb728c2-4a6a-4746-bf72-3c9d0e1f62eb",
            Database::Contact => "60c6db62-9ddd-4796-b736-baf05fcabb60",
            Database::Others => "0569a734-04cd-4813-93c7-a9dcfef7b886",
            Database::Works => "932a4ee5-be0a-467e-92a0-f130ca562223",
        }
    }

    /// Key in the output document. `Publications ` carries a trailing space.
    pub fn key(self) -> &'static str {
        match self {
            Database::Profile => "Profile",
            Database::Publications => "Publications ",
            Database::Presentations => "Presentations",
            Database::Awards => "Awards",
            Database::Articles => "Articles",
            Database::Contact => "Contact",
            Database::Others => "Others",
            Database::Works => "Works",
        }
    }

    /// Year-sorted databases take the API's default order.
    fn sorts(self) -> Option<Vec<Sort>> {
        match self {
            Database::Profile | Database::Contact | Database::Others | Database::Works => {
                Some(vec![Sort::created_ascending()])
            }
            _ => None,
        }
    }

    fn fetch<S: QuerySource + ?Sized>(self, source: &S) -> Result<Vec<Page>> {
        query_all(source, self.id(), self.sorts())
            .with_context(|| format!("failed to fetch {}", self.key().trim_end()))
    }
}

/// The whole output document, one list per database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Export {
    #[serde(rename = "Profile")]
    pub profile: Vec<Entry>,
    #[serde(rename = "Publications ")]
    pub publications: Vec<RankedEntry>,
    #[serde(rename = "Presentations")]
    pub presentations: Vec<PresentationEntry>,
    #[serde(rename = "Awards")]
    pub awards: Vec<RankedEntry>,
    #[serde(rename = "Articles")]
    pub articles: Vec<Entry>,
    #[serde(rename = "Contact")]
    pub contact: Vec<Entry>,
    #[serde(rename = "Others")]
    pub others: Vec<Entry>,
    #[serde(rename = "Works")]
    pub works: Vec<Entry>,
}

impl Export {
    pub fn len_of(&self, db: Database) -> usize {
        match db {
            Database::Profile => self.profile.len(),
            Database::Publications => self.publications.len(),
            Database::Presentations => self.presentations.len(),
            Database::Awards => self.awards.len(),
            Database::Articles => self.articles.len(),
            Database::Contact => self.contact.len(),
            Database::Others => self.others.len(),
            Database::Works => self.works.len(),
        }
    }

    /// `(key, item count)` in output order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        Database::ALL
            .iter()
            .map(|db| (db.key(), self.len_of(*db)))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize export")
    }

    /// Overwrite `path` with the pretty-printed document.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(path, self.to_json()?).with_context(|| format!("Failed to write {:?}", path))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {:?}", path))
    }
}

/// Query every database in order and normalize the rows.
pub fn collect<S: QuerySource + ?Sized>(source: &S, pb: &ProgressBar) -> Result<Export> {
    let mut export = Export::default();

    for db in Database::ALL {
        pb.set_message(db.key().trim_end());
        let pages = db.fetch(source)?;
        match db {
            Database::Profile => export.profile = profile::normalize(&pages),
            Database::Publications => export.publications = publications::normalize(&pages),
            Database::Presentations => export.presentations = presentations::normalize(&pages),
            Database::Awards => export.awards = awards::normalize(&pages),
            Database::Articles => export.articles = articles::normalize(&pages),
            Database::Contact => export.contact = contact::normalize(&pages),
            Database::Others => export.others = others::normalize(&pages),
            Database::Works => export.works = works::normalize(&pages),
        }
        info!("{}: {} rows -> {} entries", db.key().trim_end(), pages.len(), export.len_of(db));
        pb.inc(1);
    }

    Ok(export)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::test_support::{checkbox, number, rich, select, title, url};
    use crate::notion::tests::FakeSource;
    use serde_json::{json, Value};

    fn page_of(rows: Vec<Value>) -> Value {
        let results: Vec<Value> = rows
            .into_iter()
            .enumerate()
            .map(|(i, properties)| json!({ "object": "page", "id": format!("p{}", i), "properties": properties }))
            .collect();
        json!({ "object": "list", "results": results, "has_more": false, "next_cursor": null })
    }

    fn empty_source() -> FakeSource {
        Database::ALL
            .iter()
            .fold(FakeSource::default(), |s, db| s.with(db.id(), vec![page_of(vec![])]))
    }

    fn sample_source() -> FakeSource {
        empty_source()
            .with(
                Database::Profile.id(),
                vec![page_of(vec![
                    json!({ "Category": select("リンク"), "Text": rich("GitHub") }),
                    json!({ "Category": select("経歴"), "Text": rich("東京大学 助教") }),
                ])],
            )
            .with(
                Database::Publications.id(),
                vec![
                    json!({
                        "results": [{ "id": "x", "properties": {
                            "Author": rich("A. Smith"), "Title": title("Later"), "Year": number(2019)
                        }}],
                        "has_more": true,
                        "next_cursor": "cur-1"
                    }),
                    page_of(vec![json!({
                        "Author": rich("A. Smith"), "URL": url("http://x"), "Title": title("Paper"),
                        "Journal": rich("J"), "Year": number(2020), "First": checkbox(true)
                    })]),
                ],
            )
            .with(
                Database::Others.id(),
                vec![page_of(vec![json!({ "Title": title("Talk"), "Comment": rich("notes") })])],
            )
    }

    #[test]
    fn collects_every_database_in_order() {
        let source = sample_source();
        let export = collect(&source, &ProgressBar::hidden()).unwrap();

        let queried: Vec<String> = source
            .calls
            .borrow()
            .iter()
            .map(|(id, _)| id.clone())
            .collect();
        let mut expected: Vec<String> = Database::ALL.iter().map(|d| d.id().to_string()).collect();
        expected.insert(2, Database::Publications.id().to_string());
        assert_eq!(queried, expected);

        assert_eq!(export.profile[0].text, "東京大学 助教");
        assert_eq!(
            export.publications[0].text,
            "A. Smith, <a href=http://x target='_blank'>Paper</a>, J, 2020"
        );
        assert_eq!(export.publications[1].text, "A. Smith, Later, 2019");
        assert_eq!(export.others[0].text, "Talk, notes");
        assert_eq!(
            export.counts(),
            vec![
                ("Profile", 2),
                ("Publications ", 2),
                ("Presentations", 0),
                ("Awards", 0),
                ("Articles", 0),
                ("Contact", 0),
                ("Others", 1),
                ("Works", 0),
            ]
        );
    }

    #[test]
    fn created_time_sort_only_where_needed() {
        let source = empty_source();
        collect(&source, &ProgressBar::hidden()).unwrap();
        for (id, body) in source.calls.borrow().iter() {
            let db = Database::ALL.into_iter().find(|d| d.id() == id.as_str()).unwrap();
            let sorted = matches!(
                db,
                Database::Profile | Database::Contact | Database::Others | Database::Works
            );
            assert_eq!(body.sorts.is_some(), sorted, "{:?}", db);
        }
    }

    #[test]
    fn fetch_failure_aborts_run() {
        let source = empty_source().with(Database::Awards.id(), vec![]);
        let err = collect(&source, &ProgressBar::hidden()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to fetch Awards"));
    }

    #[test]
    fn written_file_round_trips() {
        let export = collect(&sample_source(), &ProgressBar::hidden()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/notion_data.json");

        export.write(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("東京大学 助教"));
        assert!(raw.contains("\"Publications \": ["));
        assert!(raw.contains("\"fitst\": true"));
        assert!(raw.starts_with("{\n  \"Profile\": ["));

        assert_eq!(Export::read(&path).unwrap(), export);
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notion_data.json");
        std::fs::write(&path, "stale contents that are longer than the new file ".repeat(100)).unwrap();

        Export::default().write(&path).unwrap();
        let back = Export::read(&path).unwrap();
        assert_eq!(back, Export::default());
    }

    #[test]
    fn key_order_matches_output() {
        let raw = Export::default().to_json().unwrap();
        let positions: Vec<usize> = Database::ALL
            .iter()
            .map(|d| raw.find(&format!("\"{}\"", d.key())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

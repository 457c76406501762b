//! The taxonomy index: (taxonomy name, label) to documents.
//!
//! Built as a pure fold over a parsed collection and rebuilt from scratch
//! whenever the collection changes; nothing is mutated in place. Queries
//! never fail: an unknown taxonomy or label is a normal state and yields an
//! empty result.

use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{doc_id::DocumentId, document::Document};

/// A lightweight reference to an indexed document, carrying what a listing
/// page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRef {
    pub id: DocumentId,
    pub collection: String,
    pub relative_path: PathBuf,
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
}

impl From<&Document> for DocumentRef {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id.clone(),
            collection: document.collection.clone(),
            relative_path: document.relative_path.clone(),
            slug: document.slug.clone(),
            title: document.front_matter.title.clone(),
            date: document.front_matter.date,
        }
    }
}

/// Mapping from (taxonomy name, label) to the documents carrying that label.
#[derive(Debug, Default)]
pub struct TaxonomyIndex {
    terms: BTreeMap<String, BTreeMap<String, Vec<DocumentRef>>>,
}

impl TaxonomyIndex {
    /// Build the index from a collection of parsed documents.
    ///
    /// Documents are deduplicated by id (first occurrence wins) and every
    /// bucket is sorted by date descending with the document id and relative
    /// path as tie-breaks, so the same document set produces the same index
    /// for any arrival order.
    pub fn build(documents: &[Document]) -> Self {
        let mut seen = HashSet::new();
        let mut terms: BTreeMap<String, BTreeMap<String, Vec<DocumentRef>>> =
            BTreeMap::new();

        for document in documents {
            if !seen.insert(document.id.numeric) {
                continue;
            }
            for (taxonomy, labels) in &document.front_matter.taxonomies {
                // Registers the taxonomy name even when it has no labels.
                let buckets = terms.entry(taxonomy.clone()).or_default();
                for label in labels {
                    buckets
                        .entry(label.clone())
                        .or_default()
                        .push(DocumentRef::from(document));
                }
            }
        }

        for buckets in terms.values_mut() {
            for bucket in buckets.values_mut() {
                bucket.sort_by(|a, b| {
                    b.date
                        .cmp(&a.date)
                        .then_with(|| a.id.cmp(&b.id))
                        .then_with(|| a.relative_path.cmp(&b.relative_path))
                });
            }
        }

        Self { terms }
    }

    /// All taxonomy names, sorted.
    pub fn taxonomies(&self) -> Vec<&str> {
        self.terms.keys().map(String::as_str).collect()
    }

    /// All labels under a taxonomy, sorted. Empty for unknown names.
    pub fn labels(&self, taxonomy: &str) -> Vec<&str> {
        self.terms
            .get(taxonomy)
            .map(|buckets| buckets.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Documents carrying `label` under `taxonomy`, date descending.
    ///
    /// Unknown names yield an empty slice, never an error.
    pub fn documents(&self, taxonomy: &str, label: &str) -> &[DocumentRef] {
        self.terms
            .get(taxonomy)
            .and_then(|buckets| buckets.get(label))
            .map_or(&[], Vec::as_slice)
    }

    /// All `(label, documents)` pairs of one taxonomy, in label order.
    pub fn entries(&self, taxonomy: &str) -> Vec<(&str, &[DocumentRef])> {
        self.terms
            .get(taxonomy)
            .map(|buckets| {
                buckets
                    .iter()
                    .map(|(label, bucket)| (label.as_str(), bucket.as_slice()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True when no document declared any taxonomy.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn post(path: &str, date: &str, tags: &[&str]) -> Document {
        let labels = tags
            .iter()
            .map(|tag| format!("\"{tag}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let text = format!(
            "+++\ntitle = \"Post {path}\"\ndate = {date}\n\n\
             [taxonomies]\ntags = [{labels}]\n+++\nBody."
        );
        Document::parse("blog", path, &text).unwrap()
    }

    fn untagged(path: &str, date: &str) -> Document {
        let text =
            format!("+++\ntitle = \"Post {path}\"\ndate = {date}\n+++\nBody.");
        Document::parse("blog", path, &text).unwrap()
    }

    #[test]
    fn empty_collection_builds_empty_index() {
        let index = TaxonomyIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.taxonomies().is_empty());
        assert!(index.documents("tags", "meta").is_empty());
    }

    #[test]
    fn untagged_documents_occupy_zero_buckets() {
        let explicit = Document::parse(
            "blog",
            "b.md",
            "+++\ntitle = \"T\"\ndate = 2026-02-10\n\
             taxonomies = {}\nextra = {}\n+++\n",
        )
        .unwrap();
        let index =
            TaxonomyIndex::build(&[untagged("a.md", "2026-02-10"), explicit]);
        assert!(index.is_empty());
    }

    #[test]
    fn buckets_group_by_label() {
        let docs = vec![
            post("a.md", "2026-02-10", &["meta", "release"]),
            post("b.md", "2026-02-11", &["release"]),
        ];
        let index = TaxonomyIndex::build(&docs);
        assert_eq!(index.documents("tags", "meta").len(), 1);
        assert_eq!(index.documents("tags", "release").len(), 2);
    }

    #[test]
    fn only_tagged_documents_match() {
        let docs = vec![
            post("welcome.md", "2026-02-10", &["meta"]),
            post("roadmap.md", "2026-02-12", &["release"]),
        ];
        let index = TaxonomyIndex::build(&docs);

        let meta = index.documents("tags", "meta");
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].slug, "welcome");
        assert!(index.documents("tags", "nonexistent").is_empty());
    }

    #[test]
    fn buckets_are_date_descending() {
        let docs = vec![
            post("old.md", "2026-01-05", &["meta"]),
            post("new.md", "2026-02-10", &["meta"]),
            post("mid.md", "2026-01-20", &["meta"]),
        ];
        let index = TaxonomyIndex::build(&docs);
        let slugs: Vec<_> = index
            .documents("tags", "meta")
            .iter()
            .map(|doc| doc.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
    }

    #[test]
    fn equal_dates_order_deterministically() {
        let a = post("a.md", "2026-02-10", &["meta"]);
        let b = post("b.md", "2026-02-10", &["meta"]);
        let c = post("c.md", "2026-02-10", &["meta"]);

        let forward = TaxonomyIndex::build(&[a.clone(), b.clone(), c.clone()]);
        let backward = TaxonomyIndex::build(&[c, b, a]);
        assert_eq!(
            forward.documents("tags", "meta"),
            backward.documents("tags", "meta")
        );
    }

    #[test]
    fn reindexing_is_idempotent() {
        let docs = vec![
            post("a.md", "2026-02-10", &["meta"]),
            post("b.md", "2026-02-11", &["meta", "release"]),
        ];
        let first = TaxonomyIndex::build(&docs);
        let second = TaxonomyIndex::build(&docs);
        assert_eq!(
            first.documents("tags", "meta"),
            second.documents("tags", "meta")
        );
        assert_eq!(first.taxonomies(), second.taxonomies());
    }

    #[test]
    fn duplicate_documents_are_deduplicated() {
        let doc = post("a.md", "2026-02-10", &["meta"]);
        let index = TaxonomyIndex::build(&[doc.clone(), doc]);
        assert_eq!(index.documents("tags", "meta").len(), 1);
    }

    #[test]
    fn unknown_taxonomy_is_empty_not_an_error() {
        let index = TaxonomyIndex::build(&[post("a.md", "2026-02-10", &["x"])]);
        assert!(index.labels("categories").is_empty());
        assert!(index.documents("categories", "announcements").is_empty());
        assert!(index.entries("categories").is_empty());
    }

    #[test]
    fn labels_are_sorted() {
        let docs = vec![
            post("a.md", "2026-02-10", &["zebra"]),
            post("b.md", "2026-02-11", &["apple"]),
        ];
        let index = TaxonomyIndex::build(&docs);
        assert_eq!(index.labels("tags"), vec!["apple", "zebra"]);
    }

    #[test]
    fn empty_label_sequence_registers_the_name() {
        let index = TaxonomyIndex::build(&[post("a.md", "2026-02-10", &[])]);
        assert_eq!(index.taxonomies(), vec!["tags"]);
        assert!(index.labels("tags").is_empty());
        assert!(!index.is_empty());
    }

    #[test]
    fn entries_walk_a_whole_taxonomy() {
        let docs = vec![
            post("a.md", "2026-02-10", &["meta", "release"]),
            post("b.md", "2026-02-11", &["release"]),
        ];
        let index = TaxonomyIndex::build(&docs);
        let entries = index.entries("tags");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "meta");
        assert_eq!(entries[0].1.len(), 1);
        assert_eq!(entries[1].0, "release");
        assert_eq!(entries[1].1.len(), 2);
    }

    #[test]
    fn multiple_taxonomies_are_listed() {
        let text = "+++\ntitle = \"T\"\ndate = 2026-02-10\n\n[taxonomies]\n\
                    categories = [\"announcements\"]\ntags = [\"meta\"]\n+++\n";
        let doc = Document::parse("blog", "a.md", text).unwrap();
        let index = TaxonomyIndex::build(&[doc]);
        assert_eq!(index.taxonomies(), vec!["categories", "tags"]);
        assert_eq!(index.documents("categories", "announcements").len(), 1);
    }

    type Seed = (u32, u32, u32);

    // Seeds for a document set, plus an arrival order over it: a shuffle
    // of every document index with some indices repeated.
    fn arrival_orders() -> impl Strategy<Value = (Vec<Seed>, Vec<usize>)> {
        prop::collection::vec((0u32..3, 1u32..=12, 1u32..=28), 1..12)
            .prop_flat_map(|seeds| {
                let n = seeds.len();
                let arrival = prop::collection::vec(0..n, 0..n)
                    .prop_map(move |extra| {
                        (0..n).chain(extra).collect::<Vec<_>>()
                    })
                    .prop_shuffle();
                (Just(seeds), arrival)
            })
    }

    proptest! {
        #[test]
        fn order_is_arrival_invariant(
            (seeds, arrival) in arrival_orders(),
        ) {
            let docs: Vec<Document> = seeds
                .iter()
                .enumerate()
                .map(|(i, (group, month, day))| {
                    post(
                        &format!("p{i}.md"),
                        &format!("2026-{month:02}-{day:02}"),
                        &["meta", &format!("group-{group}")],
                    )
                })
                .collect();
            let rearranged: Vec<Document> =
                arrival.iter().map(|&i| docs[i].clone()).collect();

            let reference = TaxonomyIndex::build(&docs);
            let shuffled = TaxonomyIndex::build(&rearranged);
            prop_assert_eq!(
                reference.entries("tags"),
                shuffled.entries("tags")
            );
            prop_assert_eq!(reference.taxonomies(), shuffled.taxonomies());
        }
    }
}

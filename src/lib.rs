//! masthead - front matter parsing and taxonomy indexing for content
//! collections.
//!
//! masthead is the content layer of a static-site pipeline: it parses
//! `+++`-delimited TOML front matter into typed metadata, loads whole
//! collections from disk, and folds them into a taxonomy index that listing
//! pages are built from. Rendering pages, serving them, and full-text search
//! belong to downstream consumers of this model.
//!
//! # Quick start
//!
//! ```
//! use masthead::{Document, TaxonomyIndex};
//!
//! let text = r#"+++
//! title = "Welcome to the Rapina Blog"
//! date = 2026-02-10
//!
//! [taxonomies]
//! categories = ["announcements"]
//! tags = ["meta"]
//! +++
//!
//! We're excited to launch the Rapina blog!
//! "#;
//!
//! let doc = Document::parse("blog", "welcome.md", text).unwrap();
//! assert_eq!(doc.front_matter.title, "Welcome to the Rapina Blog");
//! assert_eq!(doc.slug, "welcome");
//!
//! let index = TaxonomyIndex::build(&[doc]);
//! assert_eq!(index.documents("tags", "meta").len(), 1);
//! assert!(index.documents("tags", "nonexistent").is_empty());
//! ```
//!
//! Whole directories load through [`load_collection`], which walks a content
//! root, parses every file in parallel, and fails on the first invalid
//! document with its path attached.

pub mod doc_id;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod loader;
pub mod slug;
pub mod taxonomy;
pub mod walker;

pub use doc_id::DocumentId;
pub use document::Document;
pub use error::{Error, ParseError, Result};
pub use frontmatter::FrontMatter;
pub use loader::load_collection;
pub use taxonomy::{DocumentRef, TaxonomyIndex};

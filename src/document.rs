use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    doc_id::DocumentId,
    error::{ParseError, Result},
    frontmatter::{self, FrontMatter},
    slug::slugify,
};

/// A parsed, immutable content document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Stable identity derived from (collection, relative_path).
    pub id: DocumentId,
    /// Name of the collection the document belongs to.
    pub collection: String,
    /// Path relative to the collection root.
    pub relative_path: PathBuf,
    /// URL-safe slug derived from the file stem.
    pub slug: String,
    /// The validated metadata block.
    pub front_matter: FrontMatter,
    /// Free-form body text; opaque payload.
    pub body: String,
}

impl Document {
    /// Parse raw text into a document belonging to `collection` at
    /// `relative_path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use masthead::Document;
    ///
    /// let text = "+++\ntitle = \"Hello\"\ndate = 2026-02-10\n+++\nHi.";
    /// let doc = Document::parse("blog", "posts/hello.md", text).unwrap();
    /// assert_eq!(doc.slug, "hello");
    /// assert_eq!(doc.front_matter.title, "Hello");
    /// assert_eq!(doc.body, "Hi.");
    /// ```
    pub fn parse(
        collection: &str,
        relative_path: impl Into<PathBuf>,
        text: &str,
    ) -> Result<Self, ParseError> {
        let relative_path = relative_path.into();
        let (front_matter, body) = frontmatter::parse(text)?;
        let id =
            DocumentId::new(collection, &relative_path.to_string_lossy());
        let slug = slugify(file_stem(&relative_path));

        Ok(Self {
            id,
            collection: collection.to_string(),
            relative_path,
            slug,
            front_matter,
            body,
        })
    }

    /// Render the document back into delimited text.
    ///
    /// See [`frontmatter::render`] for the output shape.
    pub fn to_text(&self) -> Result<String> {
        frontmatter::render(&self.front_matter, &self.body)
    }
}

fn file_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("untitled")
}

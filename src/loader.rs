//! Loading a content collection from disk.

use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    document::Document,
    error::{Error, Result},
    walker,
};

/// Read and parse every content file under `root` into documents belonging
/// to `collection`.
///
/// Files are read and parsed in parallel; the returned order is the walker's
/// deterministic relative-path order. The first invalid document (in that
/// order) aborts the load, with its relative path attached to the error.
pub fn load_collection(collection: &str, root: &Path) -> Result<Vec<Document>> {
    let files = walker::discover_files(root)?;
    debug!(collection, files = files.len(), "discovered content files");

    let parsed: Vec<Result<Document>> = files
        .par_iter()
        .map(|file| {
            let text = std::fs::read_to_string(&file.absolute_path)?;
            Document::parse(collection, &file.relative_path, &text).map_err(
                |source| Error::Document {
                    path: file.relative_path.clone(),
                    source,
                },
            )
        })
        .collect();

    let documents = parsed.into_iter().collect::<Result<Vec<_>>>()?;
    debug!(collection, documents = documents.len(), "loaded collection");
    Ok(documents)
}

//! Filesystem sources for documents and noise words.

use crate::engine::SearchEngine;
use crate::error::LoadError;
use crate::tokenizer::NoiseWords;
use crate::DocName;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document to index: its identifier and where to read it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub name: DocName,
    pub path: PathBuf,
}

/// Read whitespace-delimited noise words.
pub fn load_noise_words(path: &Path) -> Result<NoiseWords, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let noise: NoiseWords = text.split_whitespace().collect();
    tracing::debug!(path = %path.display(), count = noise.len(), "loaded noise words");
    Ok(noise)
}

/// List the documents named by `manifest`.
///
/// A manifest file holds whitespace-separated names resolved against the
/// manifest's own directory. A directory manifest yields every `.txt` file
/// beneath it, sorted by path and named relative to the directory.
pub fn list_documents(manifest: &Path) -> Result<Vec<DocumentSource>, LoadError> {
    if manifest.is_dir() {
        return walk_documents(manifest);
    }
    let text = fs::read_to_string(manifest).map_err(|e| LoadError::io(manifest, e))?;
    let base = manifest.parent().unwrap_or_else(|| Path::new(""));
    Ok(text
        .split_whitespace()
        .map(|name| DocumentSource { name: name.to_string(), path: base.join(name) })
        .collect())
}

fn walk_documents(root: &Path) -> Result<Vec<DocumentSource>, LoadError> {
    let mut docs = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| LoadError::Walk { path: root.to_path_buf(), source: e })?;
        let p = entry.path();
        if !p.is_file() { continue; }
        if p.extension().and_then(|s| s.to_str()) != Some("txt") { continue; }
        let name = p.strip_prefix(root).unwrap_or(p).to_string_lossy().into_owned();
        docs.push(DocumentSource { name, path: p.to_path_buf() });
    }
    Ok(docs)
}

/// Whitespace-delimited tokens of one document.
pub fn read_tokens(path: &Path) -> Result<Vec<String>, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}

/// Load noise words and every listed document, then build the engine.
pub fn build_from_files(manifest: &Path, noise_file: &Path) -> Result<SearchEngine, LoadError> {
    let noise = load_noise_words(noise_file)?;
    let mut engine = SearchEngine::new(noise);
    for doc in list_documents(manifest)? {
        let tokens = read_tokens(&doc.path)?;
        engine.add_document(doc.name, tokens);
    }
    tracing::info!(
        manifest = %manifest.display(),
        num_docs = engine.document_count(),
        num_keywords = engine.index().len(),
        "index built"
    );
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn manifest_names_resolve_next_to_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("docs.txt"), "a.txt\nb.txt\n").unwrap();
        let docs = list_documents(&dir.path().join("docs.txt")).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, "a.txt");
        assert_eq!(docs[1].path, dir.path().join("b.txt"));
    }

    #[test]
    fn directory_manifest_walks_txt_files_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "x").unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();
        fs::write(dir.path().join("sub").join("c.txt"), "x").unwrap();
        let names: Vec<String> = list_documents(dir.path()).unwrap().into_iter().map(|d| d.name).collect();
        let expected: Vec<String> = vec![
            "a.txt".into(),
            "b.txt".into(),
            Path::new("sub").join("c.txt").to_string_lossy().into_owned(),
        ];
        assert_eq!(names, expected);
    }

    #[test]
    fn missing_noise_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_noise_words(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

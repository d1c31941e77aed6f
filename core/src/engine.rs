use crate::index::{scan_document, KeywordIndex};
use crate::occurrence::Occurrence;
use crate::query::{merge_ranked, top_documents, TOP_N};
use crate::tokenizer::NoiseWords;
use crate::DocName;
use std::collections::HashSet;

/// Owns the keyword index and the noise words it was built with.
#[derive(Debug, Default, Clone)]
pub struct SearchEngine {
    index: KeywordIndex,
    noise: NoiseWords,
    documents: HashSet<DocName>,
}

impl SearchEngine {
    pub fn new(noise: NoiseWords) -> Self {
        Self { index: KeywordIndex::new(), noise, documents: HashSet::new() }
    }

    /// Index every `(document, tokens)` pair in order.
    pub fn build<D, I, S>(documents: D, noise: NoiseWords) -> Self
    where
        D: IntoIterator<Item = (DocName, I)>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut engine = Self::new(noise);
        for (doc, tokens) in documents {
            engine.add_document(doc, tokens);
        }
        tracing::info!(num_docs = engine.documents.len(), num_keywords = engine.index.len(), "index built");
        engine
    }

    /// Scan one document and merge its keyword counts into the index.
    pub fn add_document<I, S>(&mut self, document: impl Into<DocName>, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let document = document.into();
        let kws = scan_document(&document, tokens, &self.noise);
        tracing::debug!(document = %document, keywords = kws.len(), "scanned document");
        self.index.merge(kws);
        self.documents.insert(document);
    }

    /// Up to five documents containing `kw1` or `kw2`, best first.
    ///
    /// Missing, blank and unknown keywords are treated alike. An empty result
    /// means nothing matched.
    pub fn top5_search(&self, kw1: Option<&str>, kw2: Option<&str>) -> Vec<String> {
        if self.index.is_empty() { return Vec::new(); }
        let first = self.lookup(kw1);
        let second = self.lookup(kw2);
        let docs = match (first, second) {
            (None, None) => Vec::new(),
            (Some(list), None) | (None, Some(list)) => top_documents(list, TOP_N),
            (Some(a), Some(b)) => merge_ranked(a, b, TOP_N),
        };
        docs.into_iter().map(str::to_string).collect()
    }

    fn lookup(&self, keyword: Option<&str>) -> Option<&[Occurrence]> {
        let keyword = keyword?.trim().to_lowercase();
        if keyword.is_empty() { return None; }
        self.index.get(&keyword).map(|l| l.as_slice())
    }

    pub fn index(&self) -> &KeywordIndex { &self.index }

    pub fn noise_words(&self) -> &NoiseWords { &self.noise }

    pub fn document_count(&self) -> usize { self.documents.len() }
}

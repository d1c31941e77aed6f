use crate::occurrence::{Occurrence, OccurrenceList};
use crate::tokenizer::{normalize, NoiseWords};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Count keyword occurrences within a single document.
pub fn scan_document<I, S>(document: &str, tokens: I, noise: &NoiseWords) -> HashMap<String, Occurrence>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, Occurrence> = HashMap::new();
    for tok in tokens {
        let Some(kw) = normalize(tok.as_ref(), noise) else { continue };
        counts
            .entry(kw)
            .and_modify(|occ| occ.frequency += 1)
            .or_insert_with(|| Occurrence::new(document, 1));
    }
    counts
}

/// Master index: keyword -> occurrences across the corpus.
#[derive(Debug, Default, Clone)]
pub struct KeywordIndex {
    map: HashMap<String, OccurrenceList>,
}

impl KeywordIndex {
    pub fn new() -> Self { Self::default() }

    /// Fold one document's keyword counts into the index.
    ///
    /// A keyword whose list already holds this document is left untouched, so
    /// merging the same document twice is a no-op.
    pub fn merge(&mut self, per_doc: HashMap<String, Occurrence>) {
        for (keyword, occ) in per_doc {
            match self.map.entry(keyword) {
                Entry::Vacant(slot) => {
                    slot.insert(OccurrenceList::singleton(occ));
                }
                Entry::Occupied(mut slot) => {
                    let list = slot.get_mut();
                    if list.contains_document(&occ.document) {
                        tracing::trace!(keyword = %slot.key(), document = %occ.document, "document already indexed");
                        continue;
                    }
                    list.push_sorted(occ);
                }
            }
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&OccurrenceList> { self.map.get(keyword) }

    pub fn len(&self) -> usize { self.map.len() }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// All keywords, sorted.
    pub fn keywords(&self) -> Vec<&str> {
        let mut kws: Vec<&str> = self.map.keys().map(String::as_str).collect();
        kws.sort_unstable();
        kws
    }

    /// Entries in keyword order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &OccurrenceList)> {
        self.keywords().into_iter().filter_map(move |kw| self.map.get(kw).map(|l| (kw, l)))
    }
}

//! Ranked merge of occurrence lists into a short list of documents.

use crate::occurrence::Occurrence;
use std::collections::HashSet;

/// Maximum number of documents a search returns.
pub const TOP_N: usize = 5;

/// Documents of a single list, best first.
pub fn top_documents(list: &[Occurrence], limit: usize) -> Vec<&str> {
    list.iter().take(limit).map(|o| o.document.as_str()).collect()
}

/// Merge two frequency-descending lists into at most `limit` distinct documents.
///
/// Higher frequency ranks first; on equal frequency the entry from `first`
/// precedes the one from `second`. A document present in both lists is
/// reported once, at its better-ranked position.
pub fn merge_ranked<'a>(first: &'a [Occurrence], second: &'a [Occurrence], limit: usize) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::with_capacity(limit.min(first.len() + second.len()));
    let mut seen: HashSet<&str> = HashSet::new();
    let (mut i, mut j) = (0, 0);

    while out.len() < limit {
        let next = match (first.get(i), second.get(j)) {
            (Some(a), Some(b)) if a.frequency >= b.frequency => { i += 1; a }
            (Some(_), Some(b)) => { j += 1; b }
            (Some(a), None) => { i += 1; a }
            (None, Some(b)) => { j += 1; b }
            (None, None) => break,
        };
        if seen.insert(next.document.as_str()) {
            out.push(next.document.as_str());
        }
    }
    out
}

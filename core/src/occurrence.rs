use crate::DocName;
use serde::Serialize;
use std::fmt;

/// How many times a keyword occurs in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub document: DocName,
    pub frequency: u32,
}

impl Occurrence {
    pub fn new(document: impl Into<DocName>, frequency: u32) -> Self {
        Self { document: document.into(), frequency }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.document, self.frequency)
    }
}

/// Occurrences of one keyword, ordered by non-increasing frequency.
///
/// Each document appears at most once. Equal frequencies keep arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OccurrenceList(Vec<Occurrence>);

impl OccurrenceList {
    pub fn singleton(occ: Occurrence) -> Self { Self(vec![occ]) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn first(&self) -> Option<&Occurrence> { self.0.first() }

    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> { self.0.iter() }

    pub fn as_slice(&self) -> &[Occurrence] { &self.0 }

    pub fn contains_document(&self, document: &str) -> bool {
        self.0.iter().any(|o| o.document == document)
    }

    pub fn is_sorted_by_frequency(&self) -> bool {
        self.0.windows(2).all(|w| w[0].frequency >= w[1].frequency)
    }

    /// Append `occ` and move it into sorted position. Returns the binary-search midpoints.
    pub fn push_sorted(&mut self, occ: Occurrence) -> Option<Vec<usize>> {
        assert!(!self.contains_document(&occ.document), "duplicate document {}", occ.document);
        self.0.push(occ);
        self.insert_last()
    }

    /// Relocate the last element into its place among the already-sorted
    /// `0..n-1` prefix using binary search.
    ///
    /// Returns the midpoints examined, or `None` for a single-element list.
    /// Each midpoint is `(low + high) / 2` over an inclusive range that starts
    /// as `0..=n-2`. A new element equal to an existing run lands after the run.
    ///
    /// # Panics
    ///
    /// If the list is empty or its `0..n-1` prefix is not sorted.
    pub fn insert_last(&mut self) -> Option<Vec<usize>> {
        assert!(!self.0.is_empty(), "insert_last on empty occurrence list");
        let n = self.0.len();
        if n == 1 { return None; }
        assert!(
            self.0[..n - 1].windows(2).all(|w| w[0].frequency >= w[1].frequency),
            "occurrence list prefix not sorted"
        );

        if n == 2 {
            if self.0[0].frequency < self.0[1].frequency {
                self.0.swap(0, 1);
            }
            return Some(Vec::new());
        }

        let target = self.0[n - 1].frequency;
        let mut mids = Vec::new();
        let mut lo = 0;
        // exclusive bound; `hi - 1` is the inclusive high end
        let mut hi = n - 1;
        let pos = loop {
            if lo >= hi { break lo; }
            let mid = (lo + hi - 1) / 2;
            mids.push(mid);
            let freq = self.0[mid].frequency;
            if freq == target {
                let mut p = mid + 1;
                while p < n - 1 && self.0[p].frequency == target { p += 1; }
                break p;
            } else if freq > target {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        };

        if pos < n - 1 {
            if let Some(last) = self.0.pop() {
                tracing::trace!(document = %last.document, frequency = last.frequency, pos, "relocated occurrence");
                self.0.insert(pos, last);
            }
        }
        Some(mids)
    }
}

impl<'a> IntoIterator for &'a OccurrenceList {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl fmt::Display for OccurrenceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, occ) in self.0.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{occ}")?;
        }
        write!(f, "]")
    }
}

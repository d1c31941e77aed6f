use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref KEYWORD_RE: Regex = Regex::new(r"^[a-z]+$").expect("valid regex");
}

/// Punctuation stripped from the end of a token before it is checked.
pub const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', '?', ':', ';', '!'];

/// Words excluded from the index. Entries are stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct NoiseWords {
    words: HashSet<String>,
}

impl NoiseWords {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() { return false; }
        self.words.insert(word)
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for NoiseWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut noise = NoiseWords::new();
        for word in iter {
            noise.insert(word.as_ref());
        }
        noise
    }
}

/// Turn a raw token into a keyword: lowercase, trim, strip the trailing run of
/// punctuation, then require `[a-z]+` and reject noise words.
pub fn normalize(raw: &str, noise: &NoiseWords) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    let stripped = lowered.trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c));
    if !KEYWORD_RE.is_match(stripped) { return None; }
    if noise.contains(stripped) { return None; }
    Some(stripped.to_string())
}

/// Split text on whitespace and yield the tokens that survive [`normalize`].
pub fn keywords<'a>(text: &'a str, noise: &'a NoiseWords) -> impl Iterator<Item = String> + 'a {
    text.split_whitespace().filter_map(move |tok| normalize(tok, noise))
}

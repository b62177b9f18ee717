//! Stopword set construction.
//!
//! The set is an explicit, immutable value: build it once, hand it to the
//! [`Preprocessor`](crate::preprocess::Preprocessor). There is no hidden
//! process-global state, which keeps the filter trivially testable with an
//! injected set.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::RandomState;

use crate::error::{Result, TextSimError};

/// Default word-list resource, resolved relative to the working directory.
pub const STOPWORDS_PATH: &str = "data/stopwords.txt";

/// Terms excluded unconditionally, before any word list is read.
const BUILTIN: &[&str] = &[
    "the", "of", "is", "and", "to", "in", "that", "we", "for", "an", "are",
    "by", "be", "as", "on", "with", "can", "if", "from", "which", "you",
    "it", "this", "then", "at", "have", "all", "not", "one", "has", "or",
    "..", "...", "---",
];

/// Immutable set of terms to drop during preprocessing.
///
/// Matching is a case-sensitive exact comparison against the term as the
/// segmenter produced it; no normalization happens here.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    terms: HashSet<Box<str>, RandomState>,
}

impl StopwordSet {
    /// Only the built-in list.
    pub fn builtin() -> Self {
        Self::from_terms(BUILTIN.iter().copied())
    }

    /// Build a set from arbitrary terms.
    pub fn from_terms<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| Box::<str>::from(t.as_ref()))
            .collect();
        Self { terms }
    }

    /// The built-in list unioned with every non-empty trimmed line of the
    /// UTF-8 word list at `path`, one term per line. Blank and
    /// whitespace-only lines are skipped; there is no comment syntax.
    ///
    /// The word list is a hard dependency: an unopenable file is
    /// [`TextSimError::ResourceUnavailable`], never silently defaulted.
    pub fn with_word_list(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TextSimError::resource(path, e))?;
        let mut set = Self::builtin();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| TextSimError::malformed(path, e))?;
            let term = line.trim();
            if !term.is_empty() {
                set.terms.insert(Box::from(term));
            }
        }
        Ok(set)
    }

    /// [`Self::with_word_list`] against [`STOPWORDS_PATH`].
    pub fn load_default() -> Result<Self> {
        Self::with_word_list(STOPWORDS_PATH)
    }

    /// Whether `term` is a stopword (exact match).
    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Number of distinct stopwords.
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

//! Term dictionary and bag-of-words corpus.

use std::collections::HashMap;
use std::path::Path;

use ahash::RandomState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::error::Result;
use crate::utils::sparse::SparseVector;

/// Maps terms to dense ids.
///
/// Ids start at 0 and follow first-seen order over the corpus, so building
/// a dictionary from the same processed corpus always assigns the same
/// ids. Serialized as an ordered sequence to keep that property across a
/// save/load round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dictionary {
    #[serde(with = "indexmap::map::serde_seq")]
    token2id: IndexMap<String, u32>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary covering every term of a processed corpus.
    pub fn from_corpus(corpus: &[Vec<String>]) -> Self {
        let mut dictionary = Self::new();
        for document in corpus {
            dictionary.add_document(document);
        }
        dictionary
    }

    /// Register every unseen term of one document.
    pub fn add_document(&mut self, tokens: &[String]) {
        for token in tokens {
            if !self.token2id.contains_key(token.as_str()) {
                let id = self.token2id.len() as u32;
                self.token2id.insert(token.clone(), id);
            }
        }
    }

    /// Id of `term`, if known.
    #[inline]
    pub fn id(&self, term: &str) -> Option<u32> {
        self.token2id.get(term).copied()
    }

    /// Term behind `id`, if in range.
    #[inline]
    pub fn term(&self, id: u32) -> Option<&str> {
        self.token2id
            .get_index(id as usize)
            .map(|(term, _)| term.as_str())
    }

    /// Number of distinct terms, which is also the bag-of-words dimension.
    #[inline]
    pub fn len(&self) -> usize {
        self.token2id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token2id.is_empty()
    }

    /// Convert a token list into id-sorted per-document counts.
    ///
    /// Terms the dictionary does not know are ignored, so queries may
    /// contain unseen vocabulary without failing.
    pub fn doc2bow<T: AsRef<str>>(&self, tokens: &[T]) -> SparseVector {
        let mut counts: HashMap<u32, u64, RandomState> = HashMap::default();
        for token in tokens {
            if let Some(id) = self.id(token.as_ref()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let mut bow: SparseVector = counts
            .into_iter()
            .map(|(id, count)| (id, count as f64))
            .collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        artifact::save(self, path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        artifact::load(path)
    }
}

/// Ordered bag-of-words view of a processed corpus.
///
/// Document identity is the position in `docs`; the sequence is parallel
/// to the processed corpus it was built from, including documents whose
/// bag is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BowCorpus {
    num_terms: usize,
    docs: Vec<SparseVector>,
}

impl BowCorpus {
    /// Vectorize a processed corpus against `dictionary`.
    pub fn from_processed(dictionary: &Dictionary, corpus: &[Vec<String>]) -> Self {
        let docs = corpus
            .iter()
            .map(|tokens| dictionary.doc2bow(tokens))
            .collect();
        Self {
            num_terms: dictionary.len(),
            docs,
        }
    }

    /// Bag-of-words dimension (the dictionary size at build time).
    #[inline]
    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    #[inline]
    pub fn docs(&self) -> &[SparseVector] {
        &self.docs
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        artifact::save(self, path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        artifact::load(path)
    }
}

//! Cosine similarity index.

use std::fmt::Debug;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::error::Result;
use crate::utils::sparse::{dot, normalized, SparseVector};

/// Ranked query results.
///
/// Entries are `(document position, score)`; the position is the
/// document's index in the corpus the index was built from.
pub struct Hits {
    pub list: Vec<(usize, f64)>,
}

impl Hits {
    pub fn new(list: Vec<(usize, f64)>) -> Self {
        Hits { list }
    }

    /// Sort by descending score. NaN scores are removed first.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.retain(|(_, score)| !score.is_nan());
        self.list.sort_by(|a, b| b.1.total_cmp(&a.1));
        self
    }

    /// Sort by ascending score. NaN scores are removed first.
    pub fn sort_by_score_rev(&mut self) -> &mut Self {
        self.list.retain(|(_, score)| !score.is_nan());
        self.list.sort_by(|a, b| a.1.total_cmp(&b.1));
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for (position, score) in &self.list {
                writeln!(f, "    {position}: {score:.6}")?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

/// Dense cosine index over the topic vectors of a whole corpus.
///
/// Every indexed vector is L2-normalized at build time, so a query is one
/// sparse dot product per document. Querying returns one entry per indexed
/// document, unranked; call [`Hits::sort_by_score`] to rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSimilarity {
    num_features: usize,
    index: Vec<SparseVector>,
}

impl MatrixSimilarity {
    /// Build an index from per-document vectors, in corpus order.
    pub fn from_vectors(vectors: Vec<SparseVector>, num_features: usize) -> Self {
        let index = vectors.iter().map(|v| normalized(v)).collect();
        Self {
            num_features,
            index,
        }
    }

    /// Cosine score of `vector` against every indexed document.
    pub fn query(&self, vector: &SparseVector) -> Hits {
        let query = normalized(vector);
        let list = self
            .index
            .iter()
            .enumerate()
            .map(|(position, doc)| (position, dot(&query, doc)))
            .collect();
        Hits::new(list)
    }

    /// Dimensionality the index expects from queries.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        artifact::save(self, path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        artifact::load(path)
    }
}

//! Latent semantic indexing.
//!
//! The factorization itself is delegated to `nalgebra`; this module only
//! assembles the term-document matrix, truncates the decomposition and
//! projects documents into the latent space.

use std::path::Path;

use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::error::Result;
use crate::model::VectorModel;
use crate::utils::sparse::SparseVector;

/// Truncated-SVD topic model over a weighted term-document matrix.
///
/// `projection` holds the retained left singular vectors as columns
/// (`num_terms × k`); a document maps into the latent space as
/// `Uᵏᵀ · x`. The retained topic count can be lower than requested when
/// the corpus has lower rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsiModel {
    num_terms: usize,
    projection: DMatrix<f64>,
    singular_values: DVector<f64>,
}

impl LsiModel {
    /// Fit from an ordered, weighted corpus (typically TF-IDF output).
    ///
    /// `num_terms` is the vocabulary dimension; `num_topics` the requested
    /// latent dimensionality.
    pub fn fit(corpus: &[SparseVector], num_terms: usize, num_topics: usize) -> Self {
        if corpus.is_empty() || num_terms == 0 || num_topics == 0 {
            return Self {
                num_terms,
                projection: DMatrix::zeros(num_terms, 0),
                singular_values: DVector::zeros(0),
            };
        }

        let mut matrix = DMatrix::<f64>::zeros(num_terms, corpus.len());
        for (column, doc) in corpus.iter().enumerate() {
            for &(id, value) in doc {
                if (id as usize) < num_terms {
                    matrix[(id as usize, column)] = value;
                }
            }
        }

        // singular values come back sorted descending
        let svd = matrix.svd(true, false);
        let u = svd.u.expect("left singular vectors were requested");
        let rank = svd.singular_values.len();
        let k = num_topics.min(rank);
        debug!("lsi fit: {} terms, {} docs, retaining {k} of {rank} singular values", num_terms, corpus.len());

        Self {
            num_terms,
            projection: u.columns(0, k).into_owned(),
            singular_values: svd.singular_values.rows(0, k).into_owned(),
        }
    }

    /// Retained singular values, descending.
    pub fn singular_values(&self) -> &DVector<f64> {
        &self.singular_values
    }

    /// Vocabulary dimension the model expects as input.
    pub fn num_terms(&self) -> usize {
        self.num_terms
    }
}

impl VectorModel for LsiModel {
    fn num_features(&self) -> usize {
        self.projection.ncols()
    }

    fn transform(&self, input: &SparseVector) -> SparseVector {
        let k = self.projection.ncols();
        let mut latent = vec![0.0; k];
        for &(id, value) in input {
            if (id as usize) < self.num_terms {
                for (topic, cell) in latent.iter_mut().enumerate() {
                    *cell += value * self.projection[(id as usize, topic)];
                }
            }
        }
        latent
            .into_iter()
            .enumerate()
            .filter(|&(_, value)| value != 0.0)
            .map(|(topic, value)| (topic as u32, value))
            .collect()
    }

    fn save(&self, path: &Path) -> Result<()> {
        artifact::save(self, path)
    }

    fn load(path: &Path) -> Result<Self> {
        artifact::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::sparse::cosine;

    /// Two topical clusters over a six-term vocabulary.
    fn weighted_corpus() -> Vec<SparseVector> {
        vec![
            vec![(0, 1.0), (1, 0.8), (2, 0.3)],
            vec![(0, 0.9), (1, 1.0)],
            vec![(3, 1.0), (4, 0.7), (5, 0.4)],
            vec![(3, 0.8), (5, 1.0)],
        ]
    }

    #[test]
    fn transform_lives_in_the_latent_space() {
        let model = LsiModel::fit(&weighted_corpus(), 6, 2);
        assert_eq!(model.num_features(), 2);
        for doc in weighted_corpus() {
            let latent = model.transform(&doc);
            assert!(latent.iter().all(|&(topic, _)| topic < 2));
        }
    }

    #[test]
    fn requested_topics_are_capped_by_rank() {
        let corpus = vec![vec![(0, 1.0)], vec![(0, 2.0)]];
        let model = LsiModel::fit(&corpus, 1, 20);
        assert!(model.num_features() <= 1);
    }

    #[test]
    fn same_cluster_documents_stay_close() {
        let corpus = weighted_corpus();
        let model = LsiModel::fit(&corpus, 6, 2);
        let a = model.transform(&corpus[0]);
        let b = model.transform(&corpus[1]);
        let c = model.transform(&corpus[2]);
        assert!(cosine(&a, &b) > cosine(&a, &c));
    }

    #[test]
    fn fitting_is_deterministic() {
        let first = LsiModel::fit(&weighted_corpus(), 6, 2);
        let second = LsiModel::fit(&weighted_corpus(), 6, 2);
        assert_eq!(first.projection, second.projection);
        assert_eq!(first.singular_values, second.singular_values);
    }

    #[test]
    fn empty_corpus_yields_an_empty_model() {
        let model = LsiModel::fit(&[], 6, 2);
        assert_eq!(model.num_features(), 0);
        assert!(model.transform(&vec![(0, 1.0)]).is_empty());
    }

    #[test]
    fn singular_values_are_descending() {
        let model = LsiModel::fit(&weighted_corpus(), 6, 2);
        let sv = model.singular_values();
        for i in 1..sv.len() {
            assert!(sv[i - 1] >= sv[i]);
        }
    }

    #[test]
    fn save_then_load_preserves_transforms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.lsi");
        let corpus = weighted_corpus();
        let model = LsiModel::fit(&corpus, 6, 2);
        model.save(&path).unwrap();
        let loaded = LsiModel::load(&path).unwrap();
        assert_eq!(loaded.transform(&corpus[0]), model.transform(&corpus[0]));
    }
}

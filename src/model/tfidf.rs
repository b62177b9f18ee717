//! TF-IDF weighting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::corpus::BowCorpus;
use crate::error::Result;
use crate::model::VectorModel;
use crate::utils::sparse::{normalized, SparseVector};

/// Per-term inverse document frequencies fit over one corpus.
///
/// `idf = ln(1 + num_docs / (1 + document_frequency))`, so terms present
/// in many documents are discounted but never zeroed out entirely.
/// Transforms multiply raw counts by idf and L2-normalize the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfModel {
    idf: Vec<f64>,
    num_docs: u64,
}

impl TfidfModel {
    /// Fit idf weights from per-document bag-of-words counts.
    pub fn fit(corpus: &BowCorpus) -> Self {
        let mut document_frequency = vec![0u64; corpus.num_terms()];
        for doc in corpus.docs() {
            for &(id, _) in doc {
                document_frequency[id as usize] += 1;
            }
        }
        let num_docs = corpus.len() as u64;
        let idf = document_frequency
            .iter()
            .map(|&df| Self::idf_calc(num_docs, df))
            .collect();
        Self { idf, num_docs }
    }

    /// Smoothed inverse document frequency.
    #[inline]
    pub fn idf_calc(num_docs: u64, document_frequency: u64) -> f64 {
        (1.0 + num_docs as f64 / (1.0 + document_frequency as f64)).ln()
    }

    /// Idf of one term id. Out-of-range ids weigh zero.
    #[inline]
    pub fn idf(&self, id: u32) -> f64 {
        self.idf.get(id as usize).copied().unwrap_or(0.0)
    }

    /// Number of documents the model was fit on.
    #[inline]
    pub fn num_docs(&self) -> u64 {
        self.num_docs
    }
}

impl VectorModel for TfidfModel {
    fn num_features(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, input: &SparseVector) -> SparseVector {
        let weighted: SparseVector = input
            .iter()
            .filter(|&&(id, _)| (id as usize) < self.idf.len())
            .map(|&(id, count)| (id, count * self.idf[id as usize]))
            .filter(|&(_, weight)| weight != 0.0)
            .collect();
        normalized(&weighted)
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
    use crate::corpus::Dictionary;
    use crate::utils::sparse::norm;

    fn fit_sample() -> (Dictionary, BowCorpus, TfidfModel) {
        let processed: Vec<Vec<String>> = vec![
            vec!["common".into(), "rare".into()],
            vec!["common".into(), "other".into()],
            vec!["common".into()],
        ];
        let dictionary = Dictionary::from_corpus(&processed);
        let corpus = BowCorpus::from_processed(&dictionary, &processed);
        let model = TfidfModel::fit(&corpus);
        (dictionary, corpus, model)
    }

    #[test]
    fn rare_terms_outweigh_common_terms() {
        let (dictionary, _, model) = fit_sample();
        let common = model.idf(dictionary.id("common").unwrap());
        let rare = model.idf(dictionary.id("rare").unwrap());
        assert!(rare > common, "rare {rare} should exceed common {common}");
        assert!(common > 0.0);
    }

    #[test]
    fn transform_is_unit_norm() {
        let (dictionary, corpus, model) = fit_sample();
        let weighted = model.transform(&corpus.docs()[0]);
        assert!((norm(&weighted) - 1.0).abs() < 1e-12);
        assert_eq!(weighted.len(), 2);
        assert_eq!(model.num_features(), dictionary.len());
    }

    #[test]
    fn transform_of_empty_bag_is_empty() {
        let (_, _, model) = fit_sample();
        assert!(model.transform(&Vec::new()).is_empty());
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        let (_, _, model) = fit_sample();
        let weighted = model.transform(&vec![(999, 3.0)]);
        assert!(weighted.is_empty());
    }

    #[test]
    fn save_then_load_preserves_transforms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.tfidf");
        let (_, corpus, model) = fit_sample();
        model.save(&path).unwrap();
        let loaded = TfidfModel::load(&path).unwrap();
        assert_eq!(
            loaded.transform(&corpus.docs()[0]),
            model.transform(&corpus.docs()[0])
        );
        assert_eq!(loaded.num_docs(), model.num_docs());
    }
}

//! Vector-space models.
//!
//! Every model is fit from a bag-of-words (or already-weighted) corpus and
//! then behaves as an opaque transform with a persistence pair: given a
//! document vector, produce a vector in the model's feature space; save to
//! a path; load it back. Fitting stays on the concrete types because the
//! constructors differ in shape (corpus only vs. corpus plus topic count).

pub mod lda;
pub mod lsi;
pub mod tfidf;

use std::path::Path;

use crate::error::Result;
use crate::utils::sparse::SparseVector;

pub use lda::{LdaConfig, LdaModel};
pub use lsi::LsiModel;
pub use tfidf::TfidfModel;

/// Common surface of a fitted model.
pub trait VectorModel: Sized {
    /// Dimensionality of the output feature space.
    fn num_features(&self) -> usize;

    /// Map a document vector into the model's feature space.
    fn transform(&self, input: &SparseVector) -> SparseVector;

    /// Persist the fitted model.
    fn save(&self, path: &Path) -> Result<()>;

    /// Reload a previously persisted model.
    fn load(path: &Path) -> Result<Self>;
}

/// Transform every document of a corpus, preserving order.
pub fn transform_corpus<M: VectorModel>(model: &M, docs: &[SparseVector]) -> Vec<SparseVector> {
    docs.iter().map(|doc| model.transform(doc)).collect()
}

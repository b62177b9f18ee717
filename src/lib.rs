//! This crate trains and serializes text-similarity models over a document
//! corpus and loads them back for similarity queries.
//!
//! The flow mirrors the classic batch setup: preprocess a directory of raw
//! documents into cleaned term lists, build a dictionary and bag-of-words
//! corpus, fit TF-IDF weights and a topic model (truncated-SVD LSI or
//! Gibbs-sampled LDA), index the topic vectors in a cosine similarity
//! index, and persist every artifact so the whole stack can be reloaded in
//! a fixed order.
pub mod artifact;
pub mod corpus;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod preprocess;
pub mod similarity;
pub mod utils;

/// Crate-wide result and error types.
///
/// The pipeline is batch-oriented: every error aborts the current run, and
/// re-running after the underlying condition is fixed is the recovery
/// path.
pub use error::{Result, TextSimError};

/// Corpus Preprocessor
/// Turns raw documents into cleaned per-document term lists: segment,
/// drop stopwords, then drop terms that are corpus-wide rare or very
/// short. Document count is always preserved; a fully filtered document
/// stays in the output as an empty list.
///
/// The stopword set is an explicit immutable value and the filter
/// thresholds are configuration, so the component is trivially testable
/// with injected inputs.
pub use preprocess::{PreprocessConfig, Preprocessor};

/// Stopword set: a fixed built-in list, optionally unioned with a
/// plain-text word list (one term per line, UTF-8). The word list is a
/// hard dependency when requested; a missing file fails the run.
pub use preprocess::stopwords::StopwordSet;

/// Document sources. `DirLoader` enumerates the files of a directory in
/// path order; custom sources implement `DocumentLoader`.
pub use preprocess::loader::{DirLoader, DocumentLoader};

/// Word segmentation seam. `WhitespaceSegmenter` splits on Unicode
/// whitespace; language-aware segmenters plug in through `Segmenter`.
pub use preprocess::segmenter::{Segmenter, WhitespaceSegmenter};

/// Term dictionary and bag-of-words corpus.
/// Dictionary ids are dense and first-seen ordered; `doc2bow` converts a
/// token list into id-sorted counts, ignoring unknown terms.
pub use corpus::{BowCorpus, Dictionary};

/// Sparse vector type shared by every stage: id-sorted
/// `(feature id, value)` pairs.
pub use utils::sparse::SparseVector;

/// Vector-space models.
/// `TfidfModel` reweights bag-of-words counts; `LsiModel` projects
/// weighted vectors into a truncated-SVD latent space; `LdaModel` returns
/// Gibbs-fitted topic mixtures. All three share the `VectorModel`
/// transform/save/load surface.
pub use model::{LdaConfig, LdaModel, LsiModel, TfidfModel, VectorModel};

/// Cosine similarity index over the topic vectors of a corpus, plus the
/// ranked `Hits` result list.
pub use similarity::{Hits, MatrixSimilarity};

/// Training and loading orchestration: fit and persist the full LSI or
/// LDA stack, reload it in a fixed order, and query it.
pub use pipeline::{
    load_models, train_lda, train_lsi, LoadedModels, ModelKind, ModelPaths, TopicModel,
};

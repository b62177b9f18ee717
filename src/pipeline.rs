//! Training and loading orchestration.
//!
//! One batch flow: preprocess a corpus, fit successive models, persist
//! every artifact, and later reload them in a fixed order for similarity
//! queries. Each invocation is
//! all-or-nothing; a failed stage aborts the run and already-written
//! artifacts are simply overwritten on the next run.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::corpus::{BowCorpus, Dictionary};
use crate::error::{Result, TextSimError};
use crate::model::{transform_corpus, LdaConfig, LdaModel, LsiModel, TfidfModel, VectorModel};
use crate::preprocess::loader::DocumentLoader;
use crate::preprocess::segmenter::Segmenter;
use crate::preprocess::Preprocessor;
use crate::similarity::{Hits, MatrixSimilarity};

/// Artifact locations: one directory plus a file name per artifact.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub dir: PathBuf,
    pub corpus: String,
    pub dictionary: String,
    pub tfidf: String,
    pub lsi: String,
    pub lda: String,
    pub lsi_index: String,
    pub lda_index: String,
}

impl ModelPaths {
    /// Default artifact names under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            corpus: "corpus.bow".to_string(),
            dictionary: "model.dic".to_string(),
            tfidf: "model.tfidf".to_string(),
            lsi: "model.lsi".to_string(),
            lda: "model.lda".to_string(),
            lsi_index: "model.sim".to_string(),
            lda_index: "model_lda.sim".to_string(),
        }
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.dir.join(&self.corpus)
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.dir.join(&self.dictionary)
    }

    pub fn tfidf_path(&self) -> PathBuf {
        self.dir.join(&self.tfidf)
    }

    pub fn lsi_path(&self) -> PathBuf {
        self.dir.join(&self.lsi)
    }

    pub fn lda_path(&self) -> PathBuf {
        self.dir.join(&self.lda)
    }

    pub fn lsi_index_path(&self) -> PathBuf {
        self.dir.join(&self.lsi_index)
    }

    pub fn lda_index_path(&self) -> PathBuf {
        self.dir.join(&self.lda_index)
    }

    fn index_path(&self, kind: ModelKind) -> PathBuf {
        match kind {
            ModelKind::Lsi => self.lsi_index_path(),
            ModelKind::Lda => self.lda_index_path(),
        }
    }
}

/// Which topic model a load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Lsi,
    Lda,
}

/// Preprocess `loader`'s documents and train the full LSI stack:
/// dictionary, bag-of-words corpus, TF-IDF weights, the truncated-SVD
/// topic model and its similarity index. Every artifact is persisted
/// under `paths` as soon as it is fit.
pub fn train_lsi<L, S>(
    preprocessor: &Preprocessor,
    loader: &L,
    segmenter: &S,
    num_topics: usize,
    paths: &ModelPaths,
    limit: Option<usize>,
) -> Result<()>
where
    L: DocumentLoader,
    S: Segmenter + Sync,
{
    fs::create_dir_all(&paths.dir).map_err(|e| TextSimError::resource(&paths.dir, e))?;

    let processed = preprocessor.process(loader, segmenter, limit)?;
    info!("preprocessed {} documents", processed.len());

    let dictionary = Dictionary::from_corpus(&processed);
    let corpus = BowCorpus::from_processed(&dictionary, &processed);
    corpus.save(&paths.corpus_path())?;
    dictionary.save(&paths.dictionary_path())?;
    info!("dictionary of {} terms persisted", dictionary.len());

    let tfidf = TfidfModel::fit(&corpus);
    tfidf.save(&paths.tfidf_path())?;
    let weighted = transform_corpus(&tfidf, corpus.docs());

    let lsi = LsiModel::fit(&weighted, dictionary.len(), num_topics);
    lsi.save(&paths.lsi_path())?;
    info!("lsi model with {} topics persisted", lsi.num_features());

    let latent = transform_corpus(&lsi, &weighted);
    let index = MatrixSimilarity::from_vectors(latent, lsi.num_features());
    index.save(&paths.lsi_index_path())?;
    info!("similarity index over {} documents persisted", index.len());
    Ok(())
}

/// Train the LDA stack from the artifacts `train_lsi` already persisted.
///
/// The bag-of-words corpus and dictionary are reloaded from disk rather
/// than recomputed, so LDA training can run long after (and independently
/// of) the preprocessing pass.
pub fn train_lda(num_topics: usize, config: &LdaConfig, paths: &ModelPaths) -> Result<()> {
    let corpus = BowCorpus::load(&paths.corpus_path())?;
    let dictionary = Dictionary::load(&paths.dictionary_path())?;
    info!(
        "training lda on {} persisted documents, {} terms",
        corpus.len(),
        dictionary.len()
    );

    let lda = LdaModel::fit(corpus.docs(), dictionary.len(), num_topics, config);
    lda.save(&paths.lda_path())?;

    let mixtures = transform_corpus(&lda, corpus.docs());
    let index = MatrixSimilarity::from_vectors(mixtures, lda.num_features());
    index.save(&paths.lda_index_path())?;
    info!("lda similarity index over {} documents persisted", index.len());
    Ok(())
}

/// Topic model reloaded by [`load_models`].
#[derive(Debug, Clone)]
pub enum TopicModel {
    Lsi(LsiModel),
    Lda(LdaModel),
}

impl TopicModel {
    pub fn num_features(&self) -> usize {
        match self {
            TopicModel::Lsi(model) => model.num_features(),
            TopicModel::Lda(model) => model.num_features(),
        }
    }
}

/// The full persisted stack, reloaded.
#[derive(Debug, Clone)]
pub struct LoadedModels {
    pub corpus: BowCorpus,
    pub dictionary: Dictionary,
    pub tfidf: TfidfModel,
    pub topic: TopicModel,
    pub similarity: MatrixSimilarity,
}

/// Reload every artifact, in a fixed order: corpus, dictionary, TF-IDF,
/// the selected topic model, then its similarity index.
pub fn load_models(paths: &ModelPaths, kind: ModelKind) -> Result<LoadedModels> {
    let corpus = BowCorpus::load(&paths.corpus_path())?;
    let dictionary = Dictionary::load(&paths.dictionary_path())?;
    let tfidf = TfidfModel::load(&paths.tfidf_path())?;
    let topic = match kind {
        ModelKind::Lsi => TopicModel::Lsi(LsiModel::load(&paths.lsi_path())?),
        ModelKind::Lda => TopicModel::Lda(LdaModel::load(&paths.lda_path())?),
    };
    let similarity = MatrixSimilarity::load(&paths.index_path(kind))?;
    info!(
        "loaded {:?} stack: {} documents, {} terms, {} topics",
        kind,
        corpus.len(),
        dictionary.len(),
        topic.num_features()
    );
    Ok(LoadedModels {
        corpus,
        dictionary,
        tfidf,
        topic,
        similarity,
    })
}

impl LoadedModels {
    /// Score an already-tokenized query against every indexed document.
    ///
    /// The query runs through the same chain the index was built with:
    /// bag-of-words, then TF-IDF plus LSI projection, or the LDA fold-in
    /// on raw counts.
    pub fn query<T: AsRef<str>>(&self, tokens: &[T]) -> Hits {
        let bow = self.dictionary.doc2bow(tokens);
        let vector = match &self.topic {
            TopicModel::Lsi(lsi) => lsi.transform(&self.tfidf.transform(&bow)),
            TopicModel::Lda(lda) => lda.transform(&bow),
        };
        self.similarity.query(&vector)
    }
}

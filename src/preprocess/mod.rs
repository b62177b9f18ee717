//! Corpus preprocessing.
//!
//! Turns a directory of raw documents into cleaned per-document term
//! lists ready for bag-of-words vectorization: segment, drop stopwords,
//! count corpus-wide term frequencies, then drop rare and very short
//! terms. Retention is a pure function of the stopword set, the global
//! frequency and the term length; no per-document context enters the
//! decision.

pub mod loader;
pub mod segmenter;
pub mod stopwords;

use std::collections::HashMap;

use ahash::RandomState;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use loader::DocumentLoader;
use segmenter::Segmenter;
use stopwords::StopwordSet;

/// Vocabulary-filter thresholds.
///
/// The defaults reproduce the classic pruning heuristics: terms occurring
/// exactly once anywhere in the corpus (hapax legomena) and terms shorter
/// than three characters are dropped everywhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Retain a term only if its corpus-wide post-stopword occurrence
    /// count is at least this. Default 2.
    pub min_term_count: u64,
    /// Retain a term only if it has at least this many characters.
    /// Default 3.
    pub min_term_chars: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            min_term_count: 2,
            min_term_chars: 3,
        }
    }
}

/// The corpus preprocessor.
///
/// Owns an immutable [`StopwordSet`] and the filter thresholds; the
/// document source and the segmenter are injected per call.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    stopwords: StopwordSet,
    config: PreprocessConfig,
}

impl Preprocessor {
    /// Preprocessor with the default thresholds.
    pub fn new(stopwords: StopwordSet) -> Self {
        Self::with_config(stopwords, PreprocessConfig::default())
    }

    pub fn with_config(stopwords: StopwordSet, config: PreprocessConfig) -> Self {
        Self { stopwords, config }
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Run the full pipeline and return one term list per enumerated
    /// document, in enumeration order.
    ///
    /// Documents are never dropped: a document whose every term is
    /// filtered out stays in the output as an empty list, which downstream
    /// vectorizers represent as a zero vector. A source with no documents
    /// yields an empty corpus.
    ///
    /// The operation is all-or-nothing: any loader failure aborts the
    /// whole run.
    pub fn process<L, S>(
        &self,
        loader: &L,
        segmenter: &S,
        limit: Option<usize>,
    ) -> Result<Vec<Vec<String>>>
    where
        L: DocumentLoader,
        S: Segmenter + Sync,
    {
        let raw = loader.load_documents(limit)?;

        // per-document segmentation is embarrassingly parallel; collect
        // preserves document order
        let mut texts: Vec<Vec<String>> = raw
            .par_iter()
            .map(|document| segmenter.segment(document))
            .collect();
        drop(raw);

        // stopword filter: case-sensitive exact match as segmented
        for tokens in &mut texts {
            tokens.retain(|token| !self.stopwords.contains(token));
        }

        // corpus-wide term frequencies. This reduction must observe every
        // document before any retention decision: the thresholds are
        // corpus-global, so no streaming/partial filtering is possible.
        let mut frequency: HashMap<&str, u64, RandomState> = HashMap::default();
        for tokens in &texts {
            for token in tokens {
                *frequency.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let processed: Vec<Vec<String>> = texts
            .iter()
            .map(|tokens| {
                tokens
                    .iter()
                    .filter(|token| {
                        frequency[token.as_str()] >= self.config.min_term_count
                            && token.chars().count() >= self.config.min_term_chars
                    })
                    .cloned()
                    .collect()
            })
            .collect();

        debug!(
            "preprocessed {} documents, {} distinct terms before pruning",
            processed.len(),
            frequency.len()
        );
        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::loader::DirLoader;
    use super::segmenter::WhitespaceSegmenter;
    use super::*;
    use crate::error::TextSimError;

    /// In-memory loader for pipeline tests.
    struct VecLoader(Vec<&'static str>);

    impl DocumentLoader for VecLoader {
        fn load_documents(&self, limit: Option<usize>) -> Result<Vec<String>> {
            let mut docs: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
            if let Some(limit) = limit {
                docs.truncate(limit);
            }
            Ok(docs)
        }
    }

    fn preprocessor(stopwords: &[&str]) -> Preprocessor {
        Preprocessor::new(StopwordSet::from_terms(stopwords.iter().copied()))
    }

    #[test]
    fn pruning_keeps_only_frequent_long_terms() {
        let pre = preprocessor(&["the"]);
        let loader = VecLoader(vec!["the cat sat", "the cat ate", "dog"]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        // "cat" is the only term that is frequent enough and long enough;
        // the third document survives as an empty list
        assert_eq!(
            corpus,
            vec![vec!["cat".to_string()], vec!["cat".to_string()], vec![]]
        );
    }

    #[test]
    fn document_count_is_preserved() {
        let pre = preprocessor(&[]);
        let loader = VecLoader(vec!["aaa bbb", "", "zzz", "aaa zzz bbb"]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        assert_eq!(corpus.len(), 4);
    }

    #[test]
    fn stopwords_never_survive() {
        let pre = preprocessor(&["stop"]);
        let loader = VecLoader(vec!["stop word word", "stop word stop"]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        for doc in &corpus {
            assert!(!doc.iter().any(|t| t == "stop"));
        }
    }

    #[test]
    fn hapax_terms_are_dropped_everywhere() {
        let pre = preprocessor(&[]);
        let loader = VecLoader(vec!["unique common", "common other"]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        assert_eq!(
            corpus,
            vec![vec!["common".to_string()], vec!["common".to_string()]]
        );
    }

    #[test]
    fn short_terms_are_dropped_even_when_frequent() {
        let pre = preprocessor(&[]);
        let loader = VecLoader(vec!["ab ab longer", "ab longer"]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        assert_eq!(
            corpus,
            vec![vec!["longer".to_string()], vec!["longer".to_string()]]
        );
    }

    #[test]
    fn length_threshold_counts_characters_not_bytes() {
        let pre = preprocessor(&[]);
        // three multibyte characters each, repeated so frequency passes
        let loader = VecLoader(vec!["日本語 日本語", "日本 日本"]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        assert_eq!(corpus[0], vec!["日本語".to_string(), "日本語".to_string()]);
        assert!(corpus[1].is_empty());
    }

    #[test]
    fn empty_source_yields_empty_corpus() {
        let pre = preprocessor(&["the"]);
        let loader = VecLoader(vec![]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn limit_takes_the_first_documents_in_order() {
        let pre = preprocessor(&[]);
        let loader = VecLoader(vec!["aaa aaa", "bbb bbb", "ccc ccc", "ddd ddd", "eee eee"]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, Some(1)).unwrap();
        assert_eq!(corpus, vec![vec!["aaa".to_string(), "aaa".to_string()]]);
    }

    #[test]
    fn process_is_deterministic() {
        let pre = preprocessor(&["the"]);
        let loader = VecLoader(vec!["the quick quick fox", "fox fox jumped jumped"]);
        let first = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        let second = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn thresholds_are_configurable() {
        let config = PreprocessConfig {
            min_term_count: 1,
            min_term_chars: 1,
        };
        let pre = Preprocessor::with_config(StopwordSet::from_terms(["the"]), config);
        let loader = VecLoader(vec!["the a lone"]);
        let corpus = pre.process(&loader, &WhitespaceSegmenter, None).unwrap();
        // with relaxed thresholds only the stopword filter applies
        assert_eq!(corpus, vec![vec!["a".to_string(), "lone".to_string()]]);
    }

    #[test]
    fn loader_failure_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirLoader::new(dir.path().join("absent"));
        let pre = preprocessor(&[]);
        let err = pre
            .process(&loader, &WhitespaceSegmenter, None)
            .unwrap_err();
        assert!(matches!(err, TextSimError::ResourceUnavailable { .. }));
    }
}

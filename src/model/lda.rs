//! Latent Dirichlet allocation.

use std::path::Path;

use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::artifact;
use crate::error::Result;
use crate::model::VectorModel;
use crate::utils::sparse::SparseVector;

/// Number of fixed-point sweeps used to fold an unseen document in.
const FOLD_IN_SWEEPS: usize = 32;

/// LDA hyperparameters.
///
/// `alpha` and `beta` are the Dirichlet priors for the document-topic and
/// topic-word distributions and must be positive. `seed` pins the sampler,
/// making a fit reproducible for identical input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LdaConfig {
    pub alpha: f64,
    pub beta: f64,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            beta: 0.01,
            iterations: 200,
            seed: 42,
        }
    }
}

/// Topic model fit by collapsed Gibbs sampling over bag-of-words counts.
///
/// After sampling, the smoothed topic-word distributions are retained;
/// transforming a document runs a deterministic fixed-point fold-in and
/// returns its topic mixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdaModel {
    num_topics: usize,
    num_terms: usize,
    alpha: f64,
    /// Row-major `num_topics × num_terms` probabilities.
    topic_word: Vec<f64>,
}

impl LdaModel {
    /// Fit from an ordered bag-of-words corpus.
    ///
    /// Fractional counts are rounded; the sampler sees whole token
    /// instances.
    pub fn fit(
        corpus: &[SparseVector],
        num_terms: usize,
        num_topics: usize,
        config: &LdaConfig,
    ) -> Self {
        let k = num_topics.max(1);
        let docs: Vec<Vec<usize>> = corpus
            .iter()
            .map(|doc| {
                let mut words = Vec::new();
                for &(id, count) in doc {
                    if (id as usize) < num_terms {
                        for _ in 0..count.round() as u64 {
                            words.push(id as usize);
                        }
                    }
                }
                words
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut doc_topic = vec![vec![0u64; k]; docs.len()];
        let mut topic_term = vec![vec![0u64; num_terms]; k];
        let mut topic_total = vec![0u64; k];
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(docs.len());

        for (d, words) in docs.iter().enumerate() {
            let mut z = Vec::with_capacity(words.len());
            for &w in words {
                let topic = rng.gen_range(0..k);
                z.push(topic);
                doc_topic[d][topic] += 1;
                topic_term[topic][w] += 1;
                topic_total[topic] += 1;
            }
            assignments.push(z);
        }

        let v_beta = num_terms as f64 * config.beta;
        let mut weights = vec![0.0; k];
        for _ in 0..config.iterations {
            for (d, words) in docs.iter().enumerate() {
                for (i, &w) in words.iter().enumerate() {
                    let old = assignments[d][i];
                    doc_topic[d][old] -= 1;
                    topic_term[old][w] -= 1;
                    topic_total[old] -= 1;

                    for (t, weight) in weights.iter_mut().enumerate() {
                        *weight = (doc_topic[d][t] as f64 + config.alpha)
                            * (topic_term[t][w] as f64 + config.beta)
                            / (topic_total[t] as f64 + v_beta);
                    }
                    let new = WeightedIndex::new(&weights)
                        .expect("positive topic weights")
                        .sample(&mut rng);

                    assignments[d][i] = new;
                    doc_topic[d][new] += 1;
                    topic_term[new][w] += 1;
                    topic_total[new] += 1;
                }
            }
        }

        let mut topic_word = vec![0.0; k * num_terms];
        for t in 0..k {
            let denom = topic_total[t] as f64 + v_beta;
            for w in 0..num_terms {
                topic_word[t * num_terms + w] = (topic_term[t][w] as f64 + config.beta) / denom;
            }
        }
        debug!(
            "lda fit: {} docs, {} terms, {} topics, {} iterations",
            docs.len(),
            num_terms,
            k,
            config.iterations
        );

        Self {
            num_topics: k,
            num_terms,
            alpha: config.alpha,
            topic_word,
        }
    }

    /// Probability of term `w` under topic `t`.
    #[inline]
    pub fn phi(&self, topic: usize, term: usize) -> f64 {
        self.topic_word[topic * self.num_terms + term]
    }

    /// Vocabulary dimension the model expects as input.
    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    /// Top `n` most probable terms of one topic, descending.
    pub fn topic_top_terms(&self, topic: usize, n: usize) -> Vec<(u32, f64)> {
        let mut terms: Vec<(u32, f64)> = (0..self.num_terms)
            .map(|w| (w as u32, self.phi(topic, w)))
            .collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1));
        terms.truncate(n);
        terms
    }
}

impl VectorModel for LdaModel {
    fn num_features(&self) -> usize {
        self.num_topics
    }

    /// Deterministic fold-in: iterate topic responsibilities under the
    /// fitted topic-word distributions and return the document's topic
    /// mixture. Always a probability distribution over all topics.
    fn transform(&self, input: &SparseVector) -> SparseVector {
        let k = self.num_topics;
        let entries: Vec<(usize, f64)> = input
            .iter()
            .filter(|&&(id, _)| (id as usize) < self.num_terms)
            .map(|&(id, count)| (id as usize, count))
            .collect();
        let total: f64 = entries.iter().map(|&(_, count)| count).sum();

        let mut theta = vec![1.0 / k as f64; k];
        if total > 0.0 {
            let denom = total + k as f64 * self.alpha;
            for _ in 0..FOLD_IN_SWEEPS {
                let mut acc = vec![0.0; k];
                for &(w, count) in &entries {
                    let resp: Vec<f64> = (0..k).map(|t| self.phi(t, w) * theta[t]).collect();
                    let sum: f64 = resp.iter().sum();
                    if sum > 0.0 {
                        for (t, r) in resp.iter().enumerate() {
                            acc[t] += count * r / sum;
                        }
                    }
                }
                for (t, cell) in theta.iter_mut().enumerate() {
                    *cell = (acc[t] + self.alpha) / denom;
                }
            }
        }
        theta
            .into_iter()
            .enumerate()
            .map(|(t, p)| (t as u32, p))
            .collect()
    }

    fn save(&self, path: &Path) -> Result<()> {
        artifact::save(self, path)
    }

    fn load(path: &Path) -> Result<Self> {
        artifact::load(path)
    }
}

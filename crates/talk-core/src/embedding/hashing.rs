//! Offline feature-hashing embedder.
//!
//! Word unigrams, word bigrams and boundary-marked character trigrams are
//! hashed (FNV-1a) into a fixed number of signed buckets and the result is
//! L2-normalized. Common function words are down-weighted so questions that
//! only share "what is" do not look alike. Output is stable across runs.

use super::Embedder;
use crate::shared::DEFAULT_EMBEDDING_DIMS;

const BIGRAM_WEIGHT: f32 = 0.5;
const TRIGRAM_WEIGHT: f32 = 0.35;
const STOP_WORD_WEIGHT: f32 = 0.25;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "to", "of", "in", "on", "at", "for",
    "and", "or", "i", "me", "my", "you", "your", "it", "its", "do", "does", "how", "what",
    "where", "when", "which", "who", "can", "could", "should", "would", "will", "this", "that",
    "with", "from", "by", "about",
];

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Deterministic bag-of-features embedder that needs no model files.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dims: usize,
}

impl HashingEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let h = fnv1a(feature.as_bytes());
        let bucket = (h % self.dims as u64) as usize;
        let sign = if h >> 63 == 1 { -1.0 } else { 1.0 };
        vector[bucket] += sign * weight;
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIMS)
    }
}

impl Embedder for HashingEmbedder {
    fn dimensions(&self) -> usize {
        self.dims
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dims];
        let tokens = tokenize(text);

        for token in &tokens {
            if is_stop_word(token) {
                self.add_feature(&mut vector, &format!("w:{token}"), STOP_WORD_WEIGHT);
                continue;
            }
            self.add_feature(&mut vector, &format!("w:{token}"), 1.0);
            let marked: Vec<char> = format!("^{token}$").chars().collect();
            for tri in marked.windows(3) {
                let tri: String = tri.iter().collect();
                self.add_feature(&mut vector, &format!("c:{tri}"), TRIGRAM_WEIGHT);
            }
        }
        for pair in tokens.windows(2) {
            if is_stop_word(&pair[0]) && is_stop_word(&pair[1]) {
                continue;
            }
            self.add_feature(
                &mut vector,
                &format!("b:{} {}", pair[0], pair[1]),
                BIGRAM_WEIGHT,
            );
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::cosine_similarity;

    #[test]
    fn fnv1a_matches_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("What's GIT?"), vec!["what", "s", "git"]);
        assert!(tokenize(" ?! ").is_empty());
    }

    #[test]
    fn embedding_is_deterministic_and_unit_length() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed("where can i find the library?");
        let b = embedder.embed("where can i find the library?");
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_EMBEDDING_DIMS);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let embedder = HashingEmbedder::new(16);
        assert!(embedder.embed("  ").iter().all(|&x| x == 0.0));
    }

    #[test]
    fn related_phrasings_score_higher_than_unrelated_ones() {
        let embedder = HashingEmbedder::default();
        let key = embedder.embed("what is your name?");
        let paraphrase = embedder.embed("tell me your name");
        let unrelated = embedder.embed("why do aliens love pizza?");
        let related = cosine_similarity(&key, &paraphrase);
        assert!(related > 0.45, "related score {related}");
        assert!(cosine_similarity(&key, &unrelated) < related);
    }
}

//! Word segmentation.

/// Splits raw text into terms, in left-to-right textual order.
///
/// Segmentation is the language-aware seam of the pipeline: corpora that
/// need real word segmentation (CJK text, morphological analysis) plug a
/// dedicated segmenter in here, the same way an external morphological
/// analyzer would be wired behind this trait. The preprocessor itself only
/// ever sees the token sequence.
pub trait Segmenter {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Splits on Unicode whitespace. Sufficient for corpora that are already
/// space-delimited.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace_run() {
        let tokens = WhitespaceSegmenter.segment("a  b\tc\nd");
        assert_eq!(tokens, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn preserves_textual_order_and_case() {
        let tokens = WhitespaceSegmenter.segment("The cat Sat");
        assert_eq!(tokens, vec!["The", "cat", "Sat"]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(WhitespaceSegmenter.segment("").is_empty());
        assert!(WhitespaceSegmenter.segment("   \n ").is_empty());
    }
}

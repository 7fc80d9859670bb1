use crate::error::Result;
use crate::morph::Normalizer;
use async_trait::async_trait;
use std::collections::HashSet;

/// Built-in suffix-stripping normalizer.
///
/// A deliberately naive English stemmer: lowercases the word and emits it
/// together with candidate stems for common plural and verb suffixes. It
/// over-generates on purpose (the matcher only needs set intersection to
/// find equivalent inflections), which makes it usable for authoring and
/// tests without a real morphology service. Production deployments for
/// richer languages should configure `RemoteNormalizer` instead.
#[derive(Debug, Default, Clone)]
pub struct SimpleNormalizer;

impl SimpleNormalizer {
    pub fn new() -> Self {
        Self
    }

    fn candidates(word: &str) -> HashSet<String> {
        let word = word.to_lowercase();
        let mut forms = HashSet::new();

        if let Some(stem) = word.strip_suffix("ies").filter(|s| s.len() >= 2) {
            forms.insert(format!("{}y", stem));
        }
        if let Some(stem) = word.strip_suffix("es").filter(|s| s.len() >= 2) {
            forms.insert(stem.to_string());
        }
        if let Some(stem) = word.strip_suffix('s').filter(|s| s.len() >= 2 && !s.ends_with('s')) {
            forms.insert(stem.to_string());
        }
        if let Some(stem) = word.strip_suffix("ing").filter(|s| s.len() >= 3) {
            forms.insert(stem.to_string());
            forms.insert(format!("{}e", stem));
        }
        if let Some(stem) = word.strip_suffix("ed").filter(|s| s.len() >= 2) {
            forms.insert(stem.to_string());
            forms.insert(format!("{}e", stem));
        }

        forms.insert(word);
        forms
    }
}

#[async_trait]
impl Normalizer for SimpleNormalizer {
    async fn normalize(&self, word: &str) -> Result<HashSet<String>> {
        Ok(Self::candidates(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn lemmas(word: &str) -> HashSet<String> {
        SimpleNormalizer::new().normalize(word).await.unwrap()
    }

    #[tokio::test]
    async fn test_plural_matches_singular() {
        let cats = lemmas("cats").await;
        let cat = lemmas("cat").await;
        assert!(!cats.is_disjoint(&cat));
    }

    #[tokio::test]
    async fn test_case_insensitive() {
        let upper = lemmas("CATS").await;
        let lower = lemmas("cat").await;
        assert!(!upper.is_disjoint(&lower));
    }

    #[tokio::test]
    async fn test_unrelated_words_are_disjoint() {
        let cat = lemmas("cat").await;
        let dog = lemmas("dog").await;
        assert!(cat.is_disjoint(&dog));
    }

    #[tokio::test]
    async fn test_ies_plural() {
        let stories = lemmas("stories").await;
        assert!(stories.contains("story"));
    }

    #[tokio::test]
    async fn test_ing_form() {
        let making = lemmas("making").await;
        assert!(making.contains("make"));
    }

    #[tokio::test]
    async fn test_word_itself_is_always_included() {
        assert!(lemmas("x").await.contains("x"));
        assert!(lemmas("Cats").await.contains("cats"));
    }

    #[tokio::test]
    async fn test_short_words_are_not_mangled_empty() {
        // "s" and "es" alone keep at least themselves
        assert!(!lemmas("s").await.is_empty());
        assert!(!lemmas("es").await.is_empty());
    }
}

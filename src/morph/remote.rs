use crate::error::{Result, VocabotError};
use crate::morph::Normalizer;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Request structure for the morphology service
#[derive(Serialize)]
struct NormalizeRequest<'a> {
    word: &'a str,
    lang: &'a str,
}

/// Response structure from the morphology service
#[derive(Deserialize)]
struct NormalizeResponse {
    lemmas: Vec<String>,
}

/// HTTP client for an external morphological normalization service.
///
/// The service takes a surface word form and returns every canonical form
/// its analyzer considers possible. Language-specific logic stays on the
/// service side; this client only moves words and lemma sets.
pub struct RemoteNormalizer {
    client: Client,
    endpoint: String,
    lang: String,
}

impl RemoteNormalizer {
    /// Create a client for the service at `endpoint`, analyzing `lang`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// normal operation)
    pub fn new(endpoint: String, lang: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint,
            lang,
        }
    }
}

#[async_trait]
impl Normalizer for RemoteNormalizer {
    async fn normalize(&self, word: &str) -> Result<HashSet<String>> {
        let word = word.to_lowercase();
        let request = NormalizeRequest {
            word: &word,
            lang: &self.lang,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| VocabotError::Normalizer(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(VocabotError::Normalizer(format!(
                "Morphology service returned {}",
                response.status()
            )));
        }

        let parsed: NormalizeResponse = response
            .json()
            .await
            .map_err(|e| VocabotError::Normalizer(format!("Invalid response: {}", e)))?;

        let mut lemmas: HashSet<String> =
            parsed.lemmas.into_iter().map(|l| l.to_lowercase()).collect();

        // An analyzer that knows nothing about a word must not make it
        // unmatchable by its literal form.
        if lemmas.is_empty() {
            lemmas.insert(word);
        }

        Ok(lemmas)
    }
}

//! Embedding generation for similarity search.
//!
//! Supports the Gemini embedding API with fallback to deterministic
//! hash-based embeddings when no API key is available (useful for testing and
//! for running without external dependencies).

use crate::error::{MemoryError, Result};
use crate::memory::DEFAULT_EMBEDDING_DIM;
use tracing::{debug, warn};

/// Environment variable for the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "text-embedding-004";

/// Gemini embedding API endpoint template.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Embedding provider configuration.
#[derive(Debug, Clone)]
pub enum EmbeddingProvider {
    /// Use the Gemini embedding API.
    Gemini { api_key: String, model: String },
    /// Use hash-based fake embeddings (for testing only).
    HashBased { dimension: usize },
}

impl EmbeddingProvider {
    /// Creates a provider from environment variables.
    ///
    /// Falls back to hash-based embeddings when `GEMINI_API_KEY` is unset.
    pub fn from_env() -> Self {
        if let Ok(api_key) = std::env::var(GEMINI_API_KEY_ENV) {
            if !api_key.trim().is_empty() {
                debug!("Using Gemini embedding provider");
                return Self::Gemini {
                    api_key,
                    model: DEFAULT_MODEL.to_string(),
                };
            }
        }

        warn!("No embedding API key found, using hash-based fallback");
        Self::HashBased {
            dimension: DEFAULT_EMBEDDING_DIM,
        }
    }

    /// Whether this provider uses real (API-based) embeddings.
    pub fn is_real(&self) -> bool {
        !matches!(self, Self::HashBased { .. })
    }

    /// The embedding dimension for this provider.
    pub fn dimension(&self) -> usize {
        match self {
            Self::Gemini { .. } => DEFAULT_EMBEDDING_DIM,
            Self::HashBased { dimension } => *dimension,
        }
    }
}

/// Generates embeddings for text content.
#[derive(Clone)]
pub struct EmbeddingGenerator {
    provider: EmbeddingProvider,
    client: reqwest::Client,
}

impl EmbeddingGenerator {
    /// Creates a new generator with the given provider.
    pub fn new(provider: EmbeddingProvider) -> Self {
        Self {
            provider,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a generator from environment variables.
    pub fn from_env() -> Self {
        Self::new(EmbeddingProvider::from_env())
    }

    /// Whether real embeddings are in use (not hash-based).
    pub fn is_real(&self) -> bool {
        self.provider.is_real()
    }

    /// The embedding dimension.
    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    /// Generates an embedding for the given text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        match &self.provider {
            EmbeddingProvider::Gemini { api_key, model } => {
                self.embed_gemini(text, api_key, model).await
            }
            EmbeddingProvider::HashBased { dimension } => {
                Ok(hash_based_embedding(text, *dimension))
            }
        }
    }

    async fn embed_gemini(&self, text: &str, api_key: &str, model: &str) -> Result<Vec<f32>> {
        let url = format!("{}/{}:embedContent?key={}", GEMINI_API_BASE, model, api_key);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "model": format!("models/{}", model),
                "content": { "parts": [{ "text": text }] }
            }))
            .send()
            .await
            .map_err(|e| MemoryError::EmbeddingError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MemoryError::EmbeddingError(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| MemoryError::EmbeddingError(e.to_string()))?;

        parse_embedding_response(&json)
    }
}

fn parse_embedding_response(json: &serde_json::Value) -> Result<Vec<f32>> {
    let values = json["embedding"]["values"]
        .as_array()
        .ok_or_else(|| MemoryError::EmbeddingError("Invalid response format".to_string()))?;

    values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| MemoryError::EmbeddingError("Invalid embedding value".to_string()))
        })
        .collect()
}

/// Generates a hash-based fake embedding.
///
/// Deterministic for a given text; NOT semantically meaningful. Used when no
/// API key is available.
fn hash_based_embedding(text: &str, dimension: usize) -> Vec<f32> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut embedding = Vec::with_capacity(dimension);
    let mut hasher = DefaultHasher::new();

    for i in 0..dimension {
        text.hash(&mut hasher);
        i.hash(&mut hasher);
        let hash = hasher.finish();

        let value = ((hash as f64 / u64::MAX as f64) * 2.0 - 1.0) as f32;
        embedding.push(value);

        hasher = DefaultHasher::new();
    }

    // Normalize to unit vector
    let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for x in &mut embedding {
            *x /= magnitude;
        }
    }

    embedding
}

/// Calculates cosine similarity between two embeddings.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}

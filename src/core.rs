//! Core querying API: wraps a low-level vision client with schema-declared
//! requests and strict JSON parsing of the model response.
//!
//! Quick start:
//! - Use `QuestionResolver::generate_question()` to turn 1-3 acquired images
//!   into a parsed [`QuestionRecord`](crate::quiz::QuestionRecord)
//! - Use `QuestionResolver::generate::<T>()` for other schema-typed targets

use crate::error::{AIError, GenerationError};
use crate::images::AcquiredImage;
use crate::quiz::QuestionRecord;
use async_trait::async_trait;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use tracing::{debug, info, instrument, warn};

/// One inline image payload as embedded in a model request: raw base64 data
/// (no data-URL prefix) plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub data: String,
    pub mime_type: String,
}

impl From<&AcquiredImage> for InlineImage {
    fn from(image: &AcquiredImage) -> Self {
        Self {
            data: image.data.clone(),
            mime_type: image.mime_type.clone(),
        }
    }
}

/// A single outbound generation request: prompt, inline images, and an
/// optional declared output schema the model must answer in.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub prompt: String,
    pub images: Vec<InlineImage>,
    pub response_schema: Option<Value>,
}

/// Low-level model client abstraction.
///
/// Implementors provide `generate_raw`, which executes one request and returns
/// the raw model text. Schema declaration and response parsing are performed
/// by [`QuestionResolver`].
#[async_trait]
pub trait VisionClient: Send + Sync + Debug {
    /// The only method that implementations must provide
    async fn generate_raw(&self, request: VisionRequest) -> Result<String, AIError>;

    /// Clone this client into a boxed trait object
    fn clone_box(&self) -> Box<dyn VisionClient>;
}

// Implement Clone for Box<dyn VisionClient>
impl Clone for Box<dyn VisionClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// Implement VisionClient for Box<dyn VisionClient>
#[async_trait]
impl VisionClient for Box<dyn VisionClient> {
    async fn generate_raw(&self, request: VisionRequest) -> Result<String, AIError> {
        self.as_ref().generate_raw(request).await
    }

    fn clone_box(&self) -> Box<dyn VisionClient> {
        self.as_ref().clone_box()
    }
}

#[derive(Clone)]
/// Resolver that wraps a VisionClient and turns images into typed records.
/// Generic over the client so tests can substitute a scripted mock.
pub struct QuestionResolver<C: VisionClient> {
    client: C,
}

impl<C: VisionClient> QuestionResolver<C> {
    pub fn new(client: C) -> Self {
        info!("Creating new QuestionResolver");
        Self { client }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Response schema for `T` in the form the generateContent endpoint accepts.
    fn response_schema<T: JsonSchema>() -> Value {
        let schema = schema_for!(T);
        let mut value = serde_json::to_value(schema).unwrap_or(Value::Null);
        if let Some(obj) = value.as_object_mut() {
            // The endpoint rejects JSON-Schema meta keys.
            obj.remove("$schema");
            obj.remove("title");
        }
        value
    }

    /// Fixed instruction template for one generation, stating how many images
    /// are attached.
    fn build_prompt(image_count: usize) -> String {
        format!(
            "Analyze these images ({image_count} in total) and create one high-quality \
             educational multiple-choice question based on their shared content or the \
             information they contain. The question must be precise and educational. \
             Provide four answer options, identify the correct answer, and give a short, \
             clear explanation."
        )
    }

    /// Send one schema-declared request and parse the raw response into `T`.
    ///
    /// Empty model text fails with `EmptyResponse`; text that does not parse
    /// as `T` fails with `SchemaParse`, carrying the raw response. No partial
    /// result is ever produced.
    #[instrument(target = "snapquiz::resolver", skip(self, prompt, images), fields(prompt_len = prompt.len(), image_count = images.len()))]
    pub async fn generate<T>(
        &self,
        prompt: String,
        images: &[AcquiredImage],
    ) -> Result<T, GenerationError>
    where
        T: DeserializeOwned + JsonSchema + Send + Debug,
    {
        let request = VisionRequest {
            prompt,
            images: images.iter().map(InlineImage::from).collect(),
            response_schema: Some(Self::response_schema::<T>()),
        };

        let raw = self.client.generate_raw(request).await?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            warn!("Model returned no text");
            return Err(GenerationError::EmptyResponse);
        }

        debug!(response_len = trimmed.len(), "Parsing model response");
        serde_json::from_str(trimmed).map_err(|e| GenerationError::SchemaParse(e, raw.clone()))
    }

    /// Build the fixed instruction and request one question over the given images.
    #[instrument(target = "snapquiz::resolver", skip(self, images), fields(image_count = images.len()))]
    pub async fn generate_question(
        &self,
        images: &[AcquiredImage],
    ) -> Result<QuestionRecord, GenerationError> {
        info!(image_count = images.len(), "Starting question generation");
        self.generate(Self::build_prompt(images.len()), images).await
    }
}

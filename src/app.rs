//! Application state machine coordinating image collection and generation.
//!
//! Exactly one [`AppState`] is active at a time; `Success` and `Error` carry
//! their payload inline so a stale result can never outlive its state. The
//! `Loading` state is the sole mutual-exclusion mechanism: no second request
//! can be issued while one is in flight.

use crate::core::{QuestionResolver, VisionClient};
use crate::error::{AIError, GeminiError, GenerationError};
use crate::images::{AcquiredImage, ImageCollection};
use crate::quiz::QuestionRecord;
use tracing::{info, instrument, warn};

/// Fallback notice when a generation failure renders no message of its own.
pub const GENERIC_FAILURE_NOTICE: &str =
    "Something went wrong while processing the images. Make sure they are clear and show educational content.";

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Idle,
    Loading,
    Success(QuestionRecord),
    Error(String),
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// The application: an image collection, a resolver, and the current state.
pub struct QuizApp<C: VisionClient> {
    resolver: QuestionResolver<C>,
    images: ImageCollection,
    state: AppState,
}

impl<C: VisionClient> QuizApp<C> {
    pub fn new(client: C) -> Self {
        Self {
            resolver: QuestionResolver::new(client),
            images: ImageCollection::new(),
            state: AppState::Idle,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn images(&self) -> &ImageCollection {
        &self.images
    }

    /// Add an image to the collection. Returns whether it was taken (the
    /// collection caps at three). Any actual change discards the current
    /// result and returns to `Idle`. Ignored while a request is in flight.
    pub fn add_image(&mut self, image: AcquiredImage) -> bool {
        if self.state.is_loading() {
            return false;
        }
        let added = self.images.add(image);
        if added {
            self.state = AppState::Idle;
        }
        added
    }

    /// Remove an image by id, discarding the current result on an actual
    /// removal. Ignored while a request is in flight.
    pub fn remove_image(&mut self, id: &str) -> bool {
        if self.state.is_loading() {
            return false;
        }
        let removed = self.images.remove(id);
        if removed {
            self.state = AppState::Idle;
        }
        removed
    }

    /// Issue one generation request against the current collection.
    ///
    /// A no-op with zero images or while a request is already in flight; the
    /// `&mut self` receiver additionally guarantees no two requests overlap.
    #[instrument(target = "snapquiz::app", skip(self), fields(image_count = self.images.len()))]
    pub async fn generate(&mut self) {
        if self.state.is_loading() {
            return;
        }
        if self.images.is_empty() {
            warn!("Generation requested with no images, ignoring");
            return;
        }

        self.state = AppState::Loading;
        match self.resolver.generate_question(self.images.as_slice()).await {
            Ok(record) => {
                info!("Question ready");
                self.state = AppState::Success(record);
            }
            Err(err) => {
                warn!(error = %err, "Generation failed");
                self.state = AppState::Error(failure_notice(&err));
            }
        }
    }

    /// Re-issue the failed request against the current collection. A no-op
    /// unless the application is in the `Error` state.
    pub async fn retry(&mut self) {
        if matches!(self.state, AppState::Error(_)) {
            self.generate().await;
        }
    }

    /// Clear images and result, returning to `Idle`. Ignored while a request
    /// is in flight.
    pub fn reset(&mut self) {
        if self.state.is_loading() {
            return;
        }
        self.images.clear();
        self.state = AppState::Idle;
    }
}

fn failure_notice(err: &GenerationError) -> String {
    match err {
        GenerationError::Ai(AIError::Gemini(GeminiError::Api(text)))
            if text.trim().is_empty() =>
        {
            GENERIC_FAILURE_NOTICE.to_string()
        }
        _ => err.to_string(),
    }
}

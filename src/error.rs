use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("AI error: {0}")]
    Ai(#[from] AIError),
    #[error("The model returned no usable response")]
    EmptyResponse,
    #[error("Response did not match the question schema: {0}. Raw response: {1}")]
    SchemaParse(#[source] serde_json::Error, String),
}

#[derive(Error, Debug)]
pub enum AIError {
    #[error("Gemini API error: {0}")]
    Gemini(#[from] GeminiError),
    #[error("Mock error: {0}")]
    Mock(String),
}

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}

/// Failures while acquiring an image. Handled at the acquisition site with a
/// user-facing notice; they never drive the application state machine.
#[derive(Error, Debug)]
pub enum ImageSourceError {
    #[error("Failed to read image file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to fetch image: {0}")]
    Fetch(String),
}

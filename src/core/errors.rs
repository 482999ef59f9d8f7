use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Empty response body from {0}")]
    EmptyBody(String),

    #[error("Async runtime error: {0}")]
    Runtime(String),

    #[error("StatsError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for StatsError {
    fn from(error: std::io::Error) -> Self {
        StatsError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for StatsError {
    fn from(error: reqwest::Error) -> Self {
        StatsError::Reqwest(Box::new(error))
    }
}

mod store;

pub use store::{
    CredentialStore,
    CREDENTIALS_FILE,
};
use thiserror::Error;
use tracing::{
    debug,
    info,
    warn,
};

use crate::{
    api::TermBackend,
    core::{
        Credentials,
        StatsError,
    },
};

/// Longest selection the capture client will submit, in characters.
pub const MAX_SELECTION_LENGTH: usize = 25;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Server issues")]
    ServerIssues,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Failed to store credentials: {0}")]
    Storage(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Please login first")]
    NotLoggedIn,

    #[error("Term is too long")]
    TooLong { length: usize },

    #[error("Error while adding the term")]
    Rejected,
}

/// Checks run before any request is made. Returns the credentials to submit with.
pub fn validate_capture<'a>(
    store: &'a CredentialStore,
    selection: &str,
) -> Result<&'a Credentials, CaptureError> {
    let credentials = store.credentials().ok_or(CaptureError::NotLoggedIn)?;

    let length = selection.chars().count();
    if length > MAX_SELECTION_LENGTH {
        return Err(CaptureError::TooLong { length });
    }

    Ok(credentials)
}

/// Exchanges an API key for credentials without storing them.
pub async fn authorize<B: TermBackend + ?Sized>(
    backend: &B,
    api_key: &str,
) -> Result<Credentials, LoginError> {
    let response = backend.authorize(api_key.trim()).await.map_err(|e: StatsError| {
        warn!("Authorize request failed: {e}");
        LoginError::ServerIssues
    })?;

    response.into_credentials().ok_or(LoginError::InvalidApiKey)
}

pub async fn login<B: TermBackend + ?Sized>(
    backend: &B,
    store: &mut CredentialStore,
    api_key: &str,
) -> Result<Credentials, LoginError> {
    let credentials = authorize(backend, api_key).await?;
    store.store(credentials.clone()).map_err(|e| LoginError::Storage(e.to_string()))?;
    info!(chat_id = credentials.chat_id, "Logged in");
    Ok(credentials)
}

pub fn logout(store: &mut CredentialStore) -> Result<(), StatsError> {
    store.clear()
}

/// Submits `selection` as a new term. Validation failures never reach the network.
pub async fn capture<B: TermBackend + ?Sized>(
    backend: &B,
    store: &CredentialStore,
    selection: &str,
) -> Result<(), CaptureError> {
    let credentials = validate_capture(store, selection)?;
    submit(backend, &credentials.api_key, selection).await
}

/// The network half of [`capture`], for callers that already validated.
pub async fn submit<B: TermBackend + ?Sized>(
    backend: &B,
    api_key: &str,
    selection: &str,
) -> Result<(), CaptureError> {
    match backend.add_term(api_key, selection).await {
        Ok(response) if response.status => {
            debug!("added");
            Ok(())
        }
        Ok(_) => Err(CaptureError::Rejected),
        Err(e) => {
            warn!("add_term request failed: {e}");
            Err(CaptureError::Rejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> CredentialStore {
        CredentialStore::in_memory(Some(Credentials { chat_id: 5, api_key: "5:key".to_string() }))
    }

    #[test]
    fn test_validate_requires_credentials() {
        let store = CredentialStore::in_memory(None);
        assert_eq!(validate_capture(&store, "word"), Err(CaptureError::NotLoggedIn));
    }

    #[test]
    fn test_validate_length_limit_counts_characters() {
        let store = logged_in();
        assert!(validate_capture(&store, &"a".repeat(MAX_SELECTION_LENGTH)).is_ok());
        assert_eq!(
            validate_capture(&store, &"a".repeat(MAX_SELECTION_LENGTH + 1)),
            Err(CaptureError::TooLong { length: MAX_SELECTION_LENGTH + 1 })
        );
        // 25 multi-byte characters are still within the limit
        assert!(validate_capture(&store, &"語".repeat(MAX_SELECTION_LENGTH)).is_ok());
    }

    #[test]
    fn test_missing_login_reported_before_length() {
        let store = CredentialStore::in_memory(None);
        let long = "x".repeat(100);
        assert_eq!(validate_capture(&store, &long), Err(CaptureError::NotLoggedIn));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CaptureError::NotLoggedIn.to_string(), "Please login first");
        assert_eq!(CaptureError::TooLong { length: 30 }.to_string(), "Term is too long");
        assert_eq!(CaptureError::Rejected.to_string(), "Error while adding the term");
        assert_eq!(LoginError::ServerIssues.to_string(), "Server issues");
        assert_eq!(LoginError::InvalidApiKey.to_string(), "Invalid API key");
    }
}

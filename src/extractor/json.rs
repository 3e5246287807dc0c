use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{ApiError, BodyError, ErrorVerbosity, ErrorVerbosityProvider};

use super::Extractor;

/// Reads the whole request body and parses it as JSON, rejecting with an [`ApiError`].
///
/// Unlike [`axum::Json`] the `Content-Type` header is not checked.
pub struct ApiJson<T>(pub T);

impl<T> ApiJson<T>
where
    T: DeserializeOwned + Debug,
{
    /// Parses an already collected body.
    pub fn from_bytes(verbosity: ErrorVerbosity, bytes: &[u8]) -> Result<Self, ApiError> {
        match serde_json::from_slice::<T>(bytes) {
            Ok(value) => {
                tracing::trace!(json=?value, "Extracted");

                Ok(ApiJson(value))
            }
            Err(err) => Err(BodyError::new(verbosity, err.to_string()).into()),
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "json_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let verbosity = state.error_verbosity();

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| BodyError::new(verbosity, rejection.body_text()))?;

        Self::from_bytes(verbosity, &bytes)
    }
}

impl<T> Extractor for ApiJson<T> {
    type Extracted = T;

    fn extracted(&self) -> &Self::Extracted {
        &self.0
    }

    fn into_extracted(self) -> Self::Extracted {
        self.0
    }
}

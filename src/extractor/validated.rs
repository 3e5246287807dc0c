use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use validator::Validate;

use crate::error::{ApiError, ErrorVerbosity, ErrorVerbosityProvider, ValidationError};

use super::Extractor;

/// Validates a value, rejecting with an [`ApiError`].
pub fn validate<T: Validate>(verbosity: ErrorVerbosity, value: &T) -> Result<(), ApiError> {
    match value.validate() {
        Ok(_) => {
            tracing::trace!("Validated");

            Ok(())
        }
        Err(errors) => Err(ValidationError::from_validation_errors(verbosity, errors).into()),
    }
}

/// An extractor that validates the data extracted by another extractor.
pub struct Validated<X>(pub X);

#[async_trait]
impl<X, S> FromRequest<S> for Validated<X>
where
    X: FromRequest<S, Rejection = ApiError> + Extractor,
    <X as Extractor>::Extracted: Validate,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "validated_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let inner = X::from_request(req, state).await?;

        validate(state.error_verbosity(), inner.extracted())?;

        Ok(Validated(inner))
    }
}

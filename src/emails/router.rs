use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    routing::post,
    Json, Router,
};
use tracing::{debug, info};

use super::allowlist::email_domain;
use super::check_email;
use super::error::RequestValidationError;
use super::model::{EmailValidationRequest, EmailValidationResponse};

/// Router builder exposing the email domain check.
pub fn email_router() -> Router {
    Router::new().route("/emails", post(validate_email_domain))
}

#[async_trait]
impl<S> FromRequest<S> for EmailValidationRequest
where
    S: Send + Sync,
{
    type Rejection = RequestValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // The body is parsed as JSON whatever the Content-Type says.
        let result = match Bytes::from_request(req, state).await {
            Ok(body) => EmailValidationRequest::from_json(&body),
            Err(rejection) => Err(RequestValidationError::from(rejection)),
        };

        if let Err(error) = &result {
            debug!(
                status = %error.status(),
                violations = ?error.violations(),
                "rejected email check request"
            );
        }
        result
    }
}

pub(crate) async fn validate_email_domain(
    request: EmailValidationRequest,
) -> Json<EmailValidationResponse> {
    let response = check_email(&request);
    info!(
        domain = email_domain(request.email()),
        domain_allowed = response.domain_allowed(),
        "email domain checked"
    );
    Json(response)
}

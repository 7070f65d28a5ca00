//! Email domain allowlist check backing `POST /emails`.

pub mod allowlist;
pub mod error;
pub mod model;
pub mod router;

pub use allowlist::{email_domain, email_domain_allowed, ALLOWED_DOMAINS};
pub use error::{FieldViolation, RequestValidationError};
pub use model::{
    EmailValidationRequest, EmailValidationResponse, RawEmailValidationRequest,
    DOMAIN_ALLOWED_MESSAGE, DOMAIN_NOT_ALLOWED_MESSAGE,
};
pub use router::email_router;

/// Runs the allowlist lookup for a validated request and assembles the reply.
pub fn check_email(request: &EmailValidationRequest) -> EmailValidationResponse {
    EmailValidationResponse::for_domain_check(email_domain_allowed(request.email()))
}

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use super::error::RequestValidationError;

pub const DOMAIN_ALLOWED_MESSAGE: &str = "Email domain is allowed";
pub const DOMAIN_NOT_ALLOWED_MESSAGE: &str = "Email domain is not allowed";

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_LABEL_LEN: usize = 63;

/// Wire shape of `POST /emails` before validation.
#[derive(Debug, Default, Validate)]
pub struct RawEmailValidationRequest {
    #[validate(
        required(message = "field required"),
        custom(function = "validate_email_address")
    )]
    pub email: Option<String>,
}

impl RawEmailValidationRequest {
    /// Reads `{"email": ..}` from a JSON body.
    ///
    /// Anything other than an object is rejected, as is an `email` that is
    /// present but not a string. `null` counts as missing.
    pub fn from_json(body: &[u8]) -> Result<Self, RequestValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(|err| {
            RequestValidationError::malformed_body("json_invalid", format!("invalid JSON: {err}"))
        })?;

        let Value::Object(mut fields) = value else {
            return Err(RequestValidationError::malformed_body(
                "object_type",
                "request body must be a JSON object",
            ));
        };

        let email = match fields.remove("email") {
            None | Some(Value::Null) => None,
            Some(Value::String(email)) => Some(email),
            Some(_) => {
                return Err(RequestValidationError::field(
                    "email",
                    "string_type",
                    "email must be a string",
                ))
            }
        };

        Ok(Self { email })
    }
}

/// A request whose `email` already passed syntax validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailValidationRequest {
    email: String,
}

impl EmailValidationRequest {
    pub fn parse(email: impl Into<String>) -> Result<Self, RequestValidationError> {
        Self::try_from(RawEmailValidationRequest {
            email: Some(email.into()),
        })
    }

    pub fn from_json(body: &[u8]) -> Result<Self, RequestValidationError> {
        Self::try_from(RawEmailValidationRequest::from_json(body)?)
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl TryFrom<RawEmailValidationRequest> for EmailValidationRequest {
    type Error = RequestValidationError;

    fn try_from(raw: RawEmailValidationRequest) -> Result<Self, Self::Error> {
        raw.validate()?;

        match raw.email {
            Some(email) => Ok(Self { email }),
            None => Err(RequestValidationError::required("email")),
        }
    }
}

/// Outcome of an allowlist check.
///
/// Serialized as `{"domainAllowed": .., "message": ..}`. Deserialization also
/// accepts the snake_case field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailValidationResponse {
    #[serde(alias = "domain_allowed")]
    domain_allowed: bool,
    message: String,
}

impl EmailValidationResponse {
    pub fn new(domain_allowed: bool, message: impl Into<String>) -> Self {
        Self {
            domain_allowed,
            message: message.into(),
        }
    }

    /// Builds the response with the fixed message for `domain_allowed`.
    pub fn for_domain_check(domain_allowed: bool) -> Self {
        let message = if domain_allowed {
            DOMAIN_ALLOWED_MESSAGE
        } else {
            DOMAIN_NOT_ALLOWED_MESSAGE
        };
        Self::new(domain_allowed, message)
    }

    pub fn domain_allowed(&self) -> bool {
        self.domain_allowed
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Syntax check for `local@domain`.
///
/// The split happens on the last `@`, so extra `@` inside the local part are
/// tolerated. The domain needs at least two labels.
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if email.len() > MAX_ADDRESS_LEN {
        return Err(invalid_email("email address is too long"));
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err(invalid_email("value is not a valid email address: missing '@'"));
    };

    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return Err(invalid_email(
            "value is not a valid email address: invalid local part",
        ));
    }
    if local
        .chars()
        .any(|ch| ch.is_whitespace() || ch.is_control())
    {
        return Err(invalid_email(
            "value is not a valid email address: invalid local part",
        ));
    }

    if !is_valid_domain(domain) {
        return Err(invalid_email(
            "value is not a valid email address: invalid domain",
        ));
    }

    Ok(())
}

fn is_valid_domain(domain: &str) -> bool {
    let mut labels = 0;
    for label in domain.split('.') {
        let well_formed = !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .bytes()
                .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-');
        if !well_formed {
            return false;
        }
        labels += 1;
    }
    labels >= 2
}

fn invalid_email(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("email");
    error.message = Some(Cow::Borrowed(message));
    error
}

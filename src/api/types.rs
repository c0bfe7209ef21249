use serde::{Deserialize, Deserializer, Serialize};

use crate::services::{FieldErrors, RatingSubmission, ReviewSubmission};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorBody {
    pub fn detail(message: impl Into<String>) -> Self {
        Self {
            detail: message.into(),
            errors: None,
        }
    }

    #[must_use]
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            detail: "Validation failed".to_string(),
            errors: Some(errors),
        }
    }
}

/// `?page=&page_size=` of the listing endpoints. Values are kept as text so
/// that a bad number is reported as a field error.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewForm {
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub movie: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub parent: Option<String>,
}

impl From<ReviewForm> for ReviewSubmission {
    fn from(form: ReviewForm) -> Self {
        Self {
            email: form.email,
            name: form.name,
            text: form.text,
            movie: form.movie,
            parent: form.parent,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RatingForm {
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub movie: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub star: Option<String>,
}

impl RatingForm {
    #[must_use]
    pub fn into_submission(self, ip: String) -> RatingSubmission {
        RatingSubmission {
            movie: self.movie,
            star: self.star,
            ip,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

/// Accepts `"1"` from forms as well as `1` or `null` from JSON bodies.
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
            Scalar::Int(n) => n.to_string(),
            Scalar::Text(text) => text,
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_form_accepts_json_numbers() {
        let form: ReviewForm = serde_json::from_str(
            r#"{"email":"a@b.io","name":"n","text":"t","movie":1,"parent":null}"#,
        )
        .unwrap();
        assert_eq!(form.movie.as_deref(), Some("1"));
        assert!(form.parent.is_none());
    }

    #[test]
    fn test_rating_form_missing_fields_are_none() {
        let form: RatingForm = serde_json::from_str(r#"{"star":"5"}"#).unwrap();
        assert_eq!(form.star.as_deref(), Some("5"));
        assert!(form.movie.is_none());
    }

    #[test]
    fn test_validation_body_shape() {
        let body = ErrorBody::validation(FieldErrors::single("email", "Enter a valid email address."));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["detail"], "Validation failed");
        assert_eq!(json["errors"]["email"][0], "Enter a valid email address.");

        let json = serde_json::to_value(ErrorBody::detail("gone")).unwrap();
        assert!(json.get("errors").is_none());
    }
}

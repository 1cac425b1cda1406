//! JSON body extractor that reports schema violations as 422 with per-field
//! detail, before the handler (and the model) ever sees the request.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, ValidationIssue};
use crate::domain::{FieldKind, PredictionRequest, REQUEST_SCHEMA};

/// A body type with a field-level schema check.
pub trait RequestSchema: DeserializeOwned + Send {
    /// Every problem with `value`; empty when it conforms. Lax coercions
    /// are applied in place.
    fn check(value: &mut Value) -> Vec<ValidationIssue>;
}

impl RequestSchema for PredictionRequest {
    fn check(value: &mut Value) -> Vec<ValidationIssue> {
        check_fields(value, &REQUEST_SCHEMA)
    }
}

/// Checks required fields by kind. Extra fields are ignored.
///
/// Number fields also take strings that parse as a float; those are
/// rewritten to JSON numbers so deserialization sees the coerced value.
pub fn check_fields(value: &mut Value, schema: &[(&str, FieldKind)]) -> Vec<ValidationIssue> {
    let Some(object) = value.as_object_mut() else {
        return vec![ValidationIssue::body(
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )];
    };

    let mut issues = Vec::new();
    for (name, kind) in schema {
        let Some(field) = object.get_mut(*name) else {
            issues.push(ValidationIssue::field(name, "Field required", "missing"));
            continue;
        };

        let coerced = match (kind, &*field) {
            (FieldKind::Text, Value::String(_)) | (FieldKind::Number, Value::Number(_)) => None,
            (FieldKind::Text, _) => {
                issues.push(ValidationIssue::field(
                    name,
                    "Input should be a valid string",
                    "string_type",
                ));
                None
            }
            (FieldKind::Number, Value::String(text)) => {
                let number = parse_number(text);
                if number.is_none() {
                    issues.push(ValidationIssue::field(
                        name,
                        "Input should be a valid number, unable to parse string as a number",
                        "float_parsing",
                    ));
                }
                number
            }
            (FieldKind::Number, _) => {
                issues.push(ValidationIssue::field(
                    name,
                    "Input should be a valid number",
                    "float_type",
                ));
                None
            }
        };
        if let Some(number) = coerced {
            *field = Value::Number(number);
        }
    }
    issues
}

fn parse_number(text: &str) -> Option<serde_json::Number> {
    text.trim()
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}

/// Validated JSON body.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RequestSchema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejected {
                status: rejection.status(),
                detail: rejection.body_text(),
            })?;

        let mut value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::Validation(vec![ValidationIssue::body(
                format!("JSON decode error: {e}"),
                "json_invalid",
            )])
        })?;

        let issues = T::check(&mut value);
        if !issues.is_empty() {
            return Err(ApiError::Validation(issues));
        }

        serde_json::from_value(value)
            .map(ValidatedJson)
            .map_err(|e| ApiError::Validation(vec![ValidationIssue::body(e.to_string(), "value_error")]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "equipment_name": "Pump-1",
            "location_name": "PlantA",
            "temperature": 75.0,
            "pressure": 101.3,
            "vibration": 0.02,
            "humidity": 40
        })
    }

    #[test]
    fn accepts_conforming_object_with_extras() {
        let mut body = valid();
        body["operator"] = json!("night shift");
        assert!(PredictionRequest::check(&mut body).is_empty());
    }

    #[test]
    fn reports_every_bad_field() {
        let mut body = valid();
        body.as_object_mut().unwrap().remove("humidity");
        body["temperature"] = json!("hot");
        body["equipment_name"] = json!(7);

        let issues = PredictionRequest::check(&mut body);
        let kinds: Vec<(&str, &str)> = issues
            .iter()
            .map(|i| (i.loc[1].as_str(), i.kind.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("equipment_name", "string_type"),
                ("temperature", "float_parsing"),
                ("humidity", "missing"),
            ]
        );
    }

    #[test]
    fn null_is_a_type_error() {
        let mut body = valid();
        body["pressure"] = Value::Null;
        let issues = PredictionRequest::check(&mut body);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, "float_type");
    }

    #[test]
    fn non_object_body_is_rejected() {
        let issues = PredictionRequest::check(&mut json!([1, 2, 3]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].loc, vec!["body"]);
        assert_eq!(issues[0].kind, "model_attributes_type");
    }

    #[test]
    fn numeric_strings_are_coerced_in_place() {
        let mut body = valid();
        body["temperature"] = json!(" 75.5 ");
        body["humidity"] = json!("40");

        assert!(PredictionRequest::check(&mut body).is_empty());
        assert_eq!(body["temperature"], json!(75.5));
        assert_eq!(body["humidity"], json!(40.0));

        let request: PredictionRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.temperature, 75.5);
    }

    #[test]
    fn non_finite_strings_do_not_parse() {
        let mut body = valid();
        body["vibration"] = json!("inf");
        let issues = PredictionRequest::check(&mut body);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, "float_parsing");
    }
}

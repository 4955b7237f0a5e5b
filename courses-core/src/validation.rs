//! Decode-and-validate step for create and update payloads.
//!
//! Checks run in a fixed order (`name`, then `description`, then unknown keys) and stop at the
//! first violation, whose message is returned to the client verbatim.
use crate::model::{CourseUpdate, NewCourse};
use serde_json::{Map, Value};

pub const NAME_FIELD: &str = "name";
pub const DESCRIPTION_FIELD: &str = "description";
pub const MIN_NAME_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("\"value\" must be of type object")]
    NotAnObject,
    #[error("\"{0}\" is required")]
    Required(&'static str),
    #[error("\"{0}\" must be a string")]
    NotAString(&'static str),
    #[error("\"{0}\" is not allowed to be empty")]
    Empty(&'static str),
    #[error("\"{field}\" length must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },
    #[error("\"{0}\" is not allowed")]
    UnknownField(String),
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCourse {
    pub name: String,
    pub description: Option<String>,
}

impl ValidCourse {
    pub fn into_new_course(self) -> NewCourse {
        NewCourse::new(self.name, self.description)
    }

    pub fn into_update(self) -> CourseUpdate {
        CourseUpdate::new(self.name, self.description)
    }
}

pub fn validate(payload: &Value) -> Result<ValidCourse, ValidationError> {
    let Value::Object(fields) = payload else {
        return Err(ValidationError::NotAnObject);
    };

    let name = required_string(fields, NAME_FIELD)?;
    // counted in Unicode scalar values, not UTF-16 code units
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: NAME_FIELD,
            min: MIN_NAME_LENGTH,
        });
    }

    let description = optional_string(fields, DESCRIPTION_FIELD)?;

    if let Some(unknown) = fields
        .keys()
        .find(|k| k.as_str() != NAME_FIELD && k.as_str() != DESCRIPTION_FIELD)
    {
        return Err(ValidationError::UnknownField(unknown.clone()));
    }

    Ok(ValidCourse {
        name: name.to_string(),
        description: description.map(str::to_string),
    })
}

fn required_string<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    optional_string(fields, field)?.ok_or(ValidationError::Required(field))
}

fn optional_string<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, ValidationError> {
    match fields.get(field) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Empty(field)),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ValidationError::NotAString(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::missing(json!({}), "\"name\" is required")]
    #[case::missing_with_description(json!({"description": "intro"}), "\"name\" is required")]
    #[case::null(json!({"name": null}), "\"name\" must be a string")]
    #[case::number(json!({"name": 42}), "\"name\" must be a string")]
    #[case::empty(json!({"name": ""}), "\"name\" is not allowed to be empty")]
    #[case::one_char(json!({"name": "A"}), "\"name\" length must be at least 3 characters long")]
    #[case::two_chars(json!({"name": "Al", "description": "x"}), "\"name\" length must be at least 3 characters long")]
    #[case::two_chars_outside_bmp(json!({"name": "𝔸b"}), "\"name\" length must be at least 3 characters long")]
    fn invalid_names_are_rejected_with_name_message(#[case] payload: Value, #[case] message: &str) {
        let err = validate(&payload).unwrap_err();

        assert_eq!(message, err.to_string());
    }

    #[rstest]
    #[case::exactly_three(json!({"name": "Art"}))]
    #[case::with_description(json!({"name": "Algebra", "description": "intro"}))]
    #[case::without_description(json!({"name": "Algebra II"}))]
    #[case::multibyte(json!({"name": "Öko"}))]
    fn valid_names_are_accepted(#[case] payload: Value) {
        let valid = validate(&payload).expect("payload is valid");

        assert_eq!(payload["name"].as_str(), Some(valid.name.as_str()));
        assert_eq!(payload["description"].as_str(), valid.description.as_deref());
    }

    #[rstest]
    #[case::null(json!({"name": "Algebra", "description": null}), "\"description\" must be a string")]
    #[case::array(json!({"name": "Algebra", "description": ["a"]}), "\"description\" must be a string")]
    #[case::empty(json!({"name": "Algebra", "description": ""}), "\"description\" is not allowed to be empty")]
    fn invalid_descriptions_are_rejected(#[case] payload: Value, #[case] message: &str) {
        let err = validate(&payload).unwrap_err();

        assert_eq!(message, err.to_string());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = validate(&json!({"name": "Algebra", "credits": 5})).unwrap_err();

        assert_eq!(ValidationError::UnknownField("credits".into()), err);
        assert_eq!("\"credits\" is not allowed", err.to_string());
    }

    #[rstest]
    #[case::array(json!([]))]
    #[case::string(json!("Algebra"))]
    #[case::null(Value::Null)]
    fn non_objects_are_rejected(#[case] payload: Value) {
        assert_eq!(ValidationError::NotAnObject, validate(&payload).unwrap_err());
    }

    #[test]
    fn only_the_first_violation_is_reported() {
        let err = validate(&json!({"name": "Al", "description": 7, "extra": true})).unwrap_err();

        assert_eq!(
            ValidationError::TooShort {
                field: NAME_FIELD,
                min: MIN_NAME_LENGTH
            },
            err
        );
    }

    #[test]
    fn valid_course_converts_into_update_and_new_course() {
        let valid = validate(&json!({"name": "Algebra"})).unwrap();

        let update = valid.clone().into_update();
        assert_eq!("Algebra", update.name);
        assert!(update.description.is_none());

        let new_course = valid.into_new_course();
        assert_eq!("Algebra", new_course.name);
    }
}

//! Request input shapes and their validation
//!
//! Every handler turns its raw input into one of the typed inputs below
//! before doing anything else. Validation collects all failing fields so the
//! caller sees the whole violated shape at once.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use capsule_core::types::{CreateMemory, MemoryId, UpdateMemory, UserId};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field; empty for the whole input
    pub path: String,
    pub message: String,
}

/// Accumulated validation failures for a single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(path, message);
        errors
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|issue| {
                if issue.path.is_empty() {
                    issue.message.clone()
                } else {
                    format!("{}: {}", issue.path, issue.message)
                }
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

type Validated<T> = std::result::Result<T, ValidationErrors>;

/// Unwrap a JSON body, turning extractor rejections into validation errors
pub fn json_body(body: std::result::Result<Json<Value>, JsonRejection>) -> Validated<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ValidationErrors::single("", rejection.body_text()))
}

/// Body of `POST /register`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub code: String,
}

impl RegisterInput {
    pub fn from_json(value: &Value) -> Validated<Self> {
        let object = expect_object(value)?;
        let mut errors = ValidationErrors::new();

        let code = required_string(object, "code", &mut errors);
        if let Some(code) = &code {
            if code.trim().is_empty() {
                errors.push("code", "Must not be empty");
            }
        }

        match code {
            Some(code) if errors.is_empty() => Ok(Self { code }),
            _ => Err(errors),
        }
    }
}

/// Body of `POST /memories` and `PUT /memories/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryInput {
    pub content: String,
    pub cover_url: String,
    pub is_public: bool,
}

impl MemoryInput {
    pub fn from_json(value: &Value) -> Validated<Self> {
        let object = expect_object(value)?;
        let mut errors = ValidationErrors::new();

        let content = required_string(object, "content", &mut errors);
        let cover_url = required_string(object, "coverUrl", &mut errors);
        let is_public = match coerce_bool(object.get("isPublic")) {
            Ok(flag) => Some(flag),
            Err(message) => {
                errors.push("isPublic", message);
                None
            }
        };

        match (content, cover_url, is_public) {
            (Some(content), Some(cover_url), Some(is_public)) if errors.is_empty() => Ok(Self {
                content,
                cover_url,
                is_public,
            }),
            _ => Err(errors),
        }
    }

    pub fn into_create(self, owner: UserId) -> CreateMemory {
        CreateMemory {
            content: self.content,
            cover_url: self.cover_url,
            is_public: self.is_public,
            user_id: owner,
        }
    }

    pub fn into_update(self) -> UpdateMemory {
        UpdateMemory {
            content: self.content,
            cover_url: self.cover_url,
            is_public: self.is_public,
        }
    }
}

/// Path parameter `:id` of the memory routes
pub fn memory_id(raw: &str) -> Validated<MemoryId> {
    MemoryId::parse(raw).map_err(|_| ValidationErrors::single("id", "Invalid uuid"))
}

fn expect_object(value: &Value) -> Validated<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        ValidationErrors::single("", format!("Expected object, received {}", kind_of(value)))
    })
}

fn required_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(field, format!("Expected string, received {}", kind_of(other)));
            None
        }
        None => {
            errors.push(field, "Required");
            None
        }
    }
}

/// Visibility flag: absent or `null` is `false`, common spellings are accepted
fn coerce_bool(value: Option<&Value>) -> std::result::Result<bool, String> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            _ => Err(format!("Expected boolean, received \"{}\"", s)),
        },
        Some(other) => Err(format!("Expected boolean, received {}", kind_of(other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

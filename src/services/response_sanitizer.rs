use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Top-level JSON shape expected in a model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Array,
    Object,
}

impl PayloadShape {
    fn delimiters(self) -> (char, char) {
        match self {
            PayloadShape::Array => ('[', ']'),
            PayloadShape::Object => ('{', '}'),
        }
    }

    fn name(self) -> &'static str {
        match self {
            PayloadShape::Array => "array",
            PayloadShape::Object => "object",
        }
    }
}

/// Extracts the JSON payload wrapped in prose or markdown fences and parses it.
///
/// The slice runs from the first opening delimiter to the last closing one. No
/// repair is attempted beyond that trim; the returned value is untyped.
pub fn sanitize(raw: &str, shape: PayloadShape) -> AppResult<Value> {
    let (open, close) = shape.delimiters();

    let start = raw.find(open);
    let end = raw.rfind(close);

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(AppError::MalformedResponse(format!(
                "no JSON {} found in model reply",
                shape.name()
            )))
        }
    };

    let payload = &raw[start..=end];
    serde_json::from_str(payload).map_err(|e| {
        AppError::MalformedResponse(format!("invalid JSON {}: {}", shape.name(), e))
    })
}

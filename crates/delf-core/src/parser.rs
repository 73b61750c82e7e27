//! Structured result parser.
//!
//! Pulls one JSON document out of backend text that may carry commentary
//! before or after it.

use serde_json::Value;

use crate::error::EvaluationError;

const PREVIEW_CHARS: usize = 200;

/// Extract and parse the JSON payload of a backend reply.
///
/// 1. The whole text is parsed; an object or array is accepted as is.
/// 2. Otherwise the span from the first `{` to the last `}` (inclusive) is
///    parsed as an object.
/// 3. Otherwise [`EvaluationError::NoStructuredResultFound`] is returned.
///
/// The span in step 2 is greedy. Two objects in one reply therefore either
/// fail to parse together or, when the braces happen to balance, come back as
/// the single enclosing span.
pub fn parse_structured(text: &str) -> Result<Value, EvaluationError> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.is_object() || value.is_array() {
            return Ok(value);
        }
    }

    if let Some(span) = brace_span(text) {
        match serde_json::from_str::<Value>(span) {
            Ok(value) => {
                tracing::debug!("recovered JSON object from surrounding text");
                return Ok(value);
            }
            Err(e) => tracing::debug!("brace span is not valid JSON: {e}"),
        }
    }

    Err(EvaluationError::NoStructuredResultFound {
        preview: text.chars().take(PREVIEW_CHARS).collect(),
    })
}

/// The slice from the first `{` to the last `}`, if both exist in that order.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

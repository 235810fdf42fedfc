use super::model::Recommendation;

/// Accumulates streamed completion text until it forms a complete
/// recommendation object.
#[derive(Debug, Default)]
pub struct RecommendationAssembler {
    buffer: String,
}

impl RecommendationAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a delta and returns the recommendation once the buffered text
    /// parses as a JSON object.
    pub fn push(&mut self, delta: &str) -> Option<Recommendation> {
        self.buffer.push_str(delta);

        let candidate = strip_code_fence(&self.buffer);
        if !candidate.ends_with('}') {
            return None;
        }

        let value: serde_json::Value = serde_json::from_str(candidate).ok()?;
        if !value.is_object() {
            return None;
        }

        serde_json::from_value(value).ok()
    }

    pub fn buffered(&self) -> &str {
        &self.buffer
    }
}

/// Models sometimes wrap JSON in a markdown fence.
fn strip_code_fence(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    text.trim().trim_end_matches("```").trim_end()
}

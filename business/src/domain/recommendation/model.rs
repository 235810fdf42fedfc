use serde::{Deserialize, Serialize};

/// Sentence streamed when the model never produced a usable answer.
pub const FALLBACK_MESSAGE: &str = "질문을 잘 알아듣지 못했어요.\n";

/// What the user told us about their current subscription.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub birthdate: Option<String>,
    pub telecom_provider: Option<String>,
    pub plan_name: Option<String>,
    pub family_bundle: Option<String>,
    pub tong_result: Option<String>,
}

impl UserProfile {
    /// True when the client sent a profile object without any field.
    pub fn is_empty(&self) -> bool {
        self.birthdate.is_none()
            && self.telecom_provider.is_none()
            && self.plan_name.is_none()
            && self.family_bundle.is_none()
            && self.tong_result.is_none()
    }
}

/// A plan the model picked, with the catalogue link to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedPlan {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
}

/// The full answer the model is instructed to produce.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub item: Vec<RecommendedPlan>,
    #[serde(default)]
    pub message: String,
}

impl Recommendation {
    /// The first line sent to the client. `status` reflects whether any plan
    /// was actually picked, regardless of what the model claimed.
    pub fn summary(&self) -> RecommendationSummary {
        RecommendationSummary {
            status: !self.item.is_empty(),
            item: self.item.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationSummary {
    pub status: bool,
    pub item: Vec<RecommendedPlan>,
}

impl RecommendationSummary {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// A piece of the streamed recommendation body.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationChunk {
    Summary(RecommendationSummary),
    Text(String),
}

impl RecommendationChunk {
    /// Wire form: the summary as one JSON line, text verbatim.
    pub fn into_text(self) -> String {
        match self {
            RecommendationChunk::Summary(summary) => {
                let mut line = serde_json::to_string(&summary)
                    .unwrap_or_else(|_| r#"{"status":false,"item":[]}"#.to_string());
                line.push('\n');
                line
            }
            RecommendationChunk::Text(text) => text,
        }
    }
}

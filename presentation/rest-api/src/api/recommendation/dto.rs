use poem_openapi::Object;

use business::domain::recommendation::model::UserProfile;

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct UserProfileRequest {
    /// Birth date as YYYY-MM-DD
    pub birthdate: Option<String>,
    /// Current carrier
    pub telecom_provider: Option<String>,
    /// Name of the plan currently in use
    pub plan_name: Option<String>,
    pub family_bundle: Option<String>,
    /// Personality test result
    pub tong_result: Option<String>,
}

impl From<UserProfileRequest> for UserProfile {
    fn from(p: UserProfileRequest) -> Self {
        UserProfile {
            birthdate: p.birthdate,
            telecom_provider: p.telecom_provider,
            plan_name: p.plan_name,
            family_bundle: p.family_bundle,
            tong_result: p.tong_result,
        }
    }
}

/// Search request; `query` and `userProfile` are required
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct SearchRequest {
    /// The user's latest message
    pub query: Option<String>,
    pub user_profile: Option<UserProfileRequest>,
    /// How many of the user's recent messages were not understood
    pub ambiguous_count: Option<u32>,
    /// Previous turns of the conversation, any JSON shape
    pub history: Option<serde_json::Value>,
}

/// Renders conversation history for the prompt. Strings are used verbatim.
pub fn render_history(history: Option<serde_json::Value>) -> Option<String> {
    match history? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

use poem_openapi::Tags;

#[derive(Debug, Tags)]
pub enum ApiTags {
    /// Liveness probe
    Health,
    /// Plan catalogue ingestion
    Plans,
    /// Streamed plan recommendations
    Recommendations,
}

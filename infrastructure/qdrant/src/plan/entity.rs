use serde::{Deserialize, Serialize};

use business::domain::plan::model::{Plan, PlanPoint};

/// Point as written to `PUT /collections/{name}/points`.
#[derive(Debug, Serialize)]
pub struct PointEntity {
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: Plan,
}

impl From<PlanPoint> for PointEntity {
    fn from(point: PlanPoint) -> Self {
        Self {
            id: point.id,
            vector: point.vector,
            payload: point.plan,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpsertPointsRequest {
    pub points: Vec<PointEntity>,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub vector: Vec<f32>,
    pub limit: usize,
    pub with_payload: bool,
}

/// Envelope every Qdrant REST response is wrapped in.
#[derive(Debug, Deserialize)]
pub struct QdrantResponse<T> {
    pub result: T,
}

#[derive(Debug, Deserialize)]
pub struct ExistsResult {
    pub exists: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScoredPointEntity {
    pub id: serde_json::Value,
    pub score: f32,
    /// Kept loose so one malformed payload does not fail the whole search.
    pub payload: Option<serde_json::Value>,
}

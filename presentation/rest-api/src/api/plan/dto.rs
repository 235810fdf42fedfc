use poem_openapi::Object;

use business::domain::plan::model::Plan;

/// A telecom plan from the catalogue feed
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Catalogue identifier, reused as the vector point id
    pub plan_id: u64,
    pub name: String,
    /// Base data allowance in GB
    pub base_data_gb: String,
    /// Daily data allowance in GB
    pub daily_data_gb: String,
    /// Shareable data in GB
    pub sharing_data_gb: String,
    /// Monthly fee in KRW
    pub monthly_fee: i64,
    pub voice_call_price: String,
    pub sms: String,
    /// Speed after the allowance is used up
    pub throttle_speed_kbps: i64,
    /// Target bracket: ALL, KID, BOY, YOUTH or OLD
    pub eligibility: String,
    /// Network type, e.g. 5G or LTE
    pub mobile_type: String,
    pub is_online: i64,
    pub plan_url: String,
    pub telecom_provider: String,
    pub description: String,
}

impl From<PlanRequest> for Plan {
    fn from(p: PlanRequest) -> Self {
        Plan {
            plan_id: p.plan_id,
            name: p.name,
            base_data_gb: p.base_data_gb,
            daily_data_gb: p.daily_data_gb,
            sharing_data_gb: p.sharing_data_gb,
            monthly_fee: p.monthly_fee,
            voice_call_price: p.voice_call_price,
            sms: p.sms,
            throttle_speed_kbps: p.throttle_speed_kbps,
            eligibility: p.eligibility,
            mobile_type: p.mobile_type,
            is_online: p.is_online,
            plan_url: p.plan_url,
            telecom_provider: p.telecom_provider,
            description: p.description,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct VectorizeResponse {
    /// Always "ok" on success
    pub status: String,
    /// Number of plans written to the collection
    pub inserted: u64,
}

impl VectorizeResponse {
    pub fn ok(inserted: usize) -> Self {
        Self {
            status: "ok".to_string(),
            inserted: inserted as u64,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Dimension of every plan and query embedding stored in the collection.
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// A mobile plan offered by a telecom provider.
///
/// Serialized with the camelCase names the catalogue feed uses, which is also
/// the shape stored as the point payload and shown to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub plan_id: u64,
    pub name: String,
    pub base_data_gb: String,
    pub daily_data_gb: String,
    pub sharing_data_gb: String,
    pub monthly_fee: i64,
    pub voice_call_price: String,
    pub sms: String,
    pub throttle_speed_kbps: i64,
    pub eligibility: String,
    pub mobile_type: String,
    pub is_online: i64,
    pub plan_url: String,
    pub telecom_provider: String,
    pub description: String,
}

impl Plan {
    /// Renders the plan as the Korean sentence that gets embedded.
    pub fn describe(&self) -> String {
        format!(
            "{} 요금제, 기본 데이터 {}GB, 일일 {}GB, 공유 {}GB, 월 {}원, 통화 {}분, SMS {}건, \
             속도제한 {}Kbps, 대상 {}, 망 {}, 데이터 {}, 설명 {}",
            self.name,
            self.base_data_gb,
            self.daily_data_gb,
            self.sharing_data_gb,
            self.monthly_fee,
            self.voice_call_price,
            self.sms,
            self.throttle_speed_kbps,
            self.eligibility,
            self.mobile_type,
            self.is_online,
            self.description
        )
    }
}

/// An embedded plan ready to be written to the vector store.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanPoint {
    pub id: u64,
    pub vector: Vec<f32>,
    pub plan: Plan,
}

impl PlanPoint {
    pub fn new(plan: Plan, vector: Vec<f32>) -> Self {
        Self {
            id: plan.plan_id,
            vector,
            plan,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::plan;
    use super::*;

    #[test]
    fn should_describe_plan_with_every_catalogue_field() {
        let description = plan(7, "5G 청년 요금제").describe();

        assert!(description.starts_with("5G 청년 요금제 요금제, 기본 데이터 10GB"));
        assert!(description.contains("월 45000원"));
        assert!(description.contains("속도제한 1000Kbps"));
        assert!(description.contains("대상 YOUTH, 망 5G, 데이터 1"));
        assert!(description.ends_with("설명 청년 전용 혜택"));
    }

    #[test]
    fn should_use_plan_id_as_point_id() {
        let point = PlanPoint::new(plan(42, "Basic"), vec![0.1, 0.2]);

        assert_eq!(point.id, 42);
        assert_eq!(point.vector.len(), 2);
    }

    #[test]
    fn should_deserialize_catalogue_field_names() {
        let json = serde_json::json!({
            "planId": 3,
            "name": "Lite",
            "baseDataGb": "3",
            "dailyDataGb": "0",
            "sharingDataGb": "0",
            "monthlyFee": 19000,
            "voiceCallPrice": "100",
            "sms": "50",
            "throttleSpeedKbps": 400,
            "eligibility": "ALL",
            "mobileType": "LTE",
            "isOnline": 0,
            "planUrl": "https://example.com/lite",
            "telecomProvider": "LG U+",
            "description": "",
        });

        let parsed: Plan = serde_json::from_value(json).unwrap();

        assert_eq!(parsed.plan_id, 3);
        assert_eq!(parsed.throttle_speed_kbps, 400);
        assert_eq!(parsed.plan_url, "https://example.com/lite");
    }
}

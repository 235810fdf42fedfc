use super::eligibility::Eligibility;
use super::model::UserProfile;
use crate::domain::plan::model::Plan;

/// Consecutive unclear messages after which the user is handed to a human.
pub const HANDOFF_THRESHOLD: u32 = 3;

/// Everything the system prompt is built from.
pub struct PromptContext<'a> {
    pub query: &'a str,
    pub plans: &'a [Plan],
    pub eligibility: &'a [Eligibility],
    pub profile: &'a UserProfile,
    pub ambiguous_count: u32,
    pub history: Option<&'a str>,
}

pub fn build_system_prompt(ctx: &PromptContext<'_>) -> String {
    let plans_json = serde_json::to_string_pretty(ctx.plans).unwrap_or_else(|_| "[]".to_string());

    let unclear_message = if ctx.ambiguous_count >= HANDOFF_THRESHOLD {
        "\\n\\n질문을 잘 알아듣지 못했어요. 고객센터로 연결해드리겠습니다."
    } else {
        "\\n\\n질문을 잘 알아듣지 못했어요."
    };

    let eligibility = ctx
        .eligibility
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "정보 없음".to_string());

    format!(
        r#"당신은 LG U+ 통신 요금제 추천 전문가입니다.

아래 사용자 정보와 요금제 목록을 바탕으로, 사용자가 LG U+로 옮길 때 가장 알맞은 요금제 2~3개를 추천하세요.

추천 가능한 요금제 목록:
{plans_json}

규칙
1. 연령, 데이터 사용 패턴, 가족 결합 여부, 약정 상태, 이동 사유(요금/데이터/통화)를 고려합니다.
2. 연령 전용 요금제가 있으면 가장 먼저 고려합니다. 대상 코드: 12세 이하 "KID", 18세 이하 "BOY", 34세 이하 "YOUTH", 65세 이상 "OLD".
3. 인사("안녕", "hi", "ㅎㅇ"), 감탄사("헐", "ㅋㅋㅋ"), 요금제와 무관한 잡담("배고파요", "심심해"), 의미 없는 입력("fh", "rimeqwe")이거나 추천이 불가능하면 절대 요금제를 추천하지 말고 아래 JSON만 출력합니다.
{{"status": false, "item": [], "message": "{unclear_message}"}}
4. 추천이 가능하면 반드시 아래 JSON 형식으로만 출력합니다. link에는 목록에 있는 planUrl만 사용합니다.
{{"status": true, "item": [{{"name": "요금제명", "link": "https://..."}}], "message": "<설명>"}}
5. message는 시작과 끝에 줄바꿈 두 번(\n\n)을 붙이고, 요금제마다 다음 형식을 지킵니다.
   번호. 요금제 이름\n
   (월 요금 - 정확한 숫자 / 데이터 제공량 / 음성통화 / SMS / 주요 혜택)\n
   - 한 줄짜리 추천 사유\n
6. "유튜브를 자주 봐요", "게임 자주 해요"는 데이터 사용량이 많음을, "웹서핑만 해요", "영상을 조금만 봐요"는 적음을 뜻합니다.
7. 사용자가 지금 쓰는 요금제와 이름이 같은 요금제는 절대 추천하지 않습니다.
8. 아래 이전 대화를 바탕으로 답변합니다.
{history}

사용자 정보
- 대상: {eligibility}
- 현재 통신사: {provider}
- 현재 사용 요금제: {plan_name}
- 가족 결합 여부: {family_bundle}
- 통BTI 성향: {tong_result}
- 사용자의 입력 메시지: {query}
"#,
        plans_json = plans_json,
        unclear_message = unclear_message,
        history = ctx.history.unwrap_or("없음"),
        eligibility = eligibility,
        provider = field(&ctx.profile.telecom_provider),
        plan_name = field(&ctx.profile.plan_name),
        family_bundle = field(&ctx.profile.family_bundle),
        tong_result = field(&ctx.profile.tong_result),
        query = ctx.query,
    )
}

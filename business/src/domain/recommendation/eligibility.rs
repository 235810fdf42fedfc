use chrono::{Datelike, NaiveDate};

use super::errors::RecommendationError;

/// Age bracket a plan can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    All,
    Kid,
    Boy,
    Youth,
    Old,
}

impl std::fmt::Display for Eligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Eligibility::All => write!(f, "ALL"),
            Eligibility::Kid => write!(f, "KID"),
            Eligibility::Boy => write!(f, "BOY"),
            Eligibility::Youth => write!(f, "YOUTH"),
            Eligibility::Old => write!(f, "OLD"),
        }
    }
}

/// Whole years between `birthdate` and `today`.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }
    age
}

/// Brackets that apply to a user born on `birthdate` (`YYYY-MM-DD`).
///
/// `All` is always first. Ages 35 to 64 only get `All`.
pub fn eligibility_for(
    birthdate: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<Eligibility>, RecommendationError> {
    let mut brackets = vec![Eligibility::All];

    let Some(raw) = birthdate.filter(|b| !b.is_empty()) else {
        return Ok(brackets);
    };

    let birthdate = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| RecommendationError::InvalidBirthdate)?;

    match age_on(birthdate, today) {
        age if age <= 12 => brackets.push(Eligibility::Kid),
        age if age <= 18 => brackets.push(Eligibility::Boy),
        age if age <= 34 => brackets.push(Eligibility::Youth),
        age if age >= 65 => brackets.push(Eligibility::Old),
        _ => {}
    }

    Ok(brackets)
}

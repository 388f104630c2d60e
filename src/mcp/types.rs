use schemars::JsonSchema;
use serde::Deserialize;

use crate::neis::{MealCode, MealQuery, SchoolKind, SchoolQuery};

// Field names mirror the NEIS query parameters so tool callers can
// cross-reference the upstream open-data documentation directly.

/// Parameters for the `getMeal` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetMealParams {
    /// Education-office code, e.g. "B10" for Seoul. Blank falls back to the
    /// configured default.
    #[serde(rename = "ATPT_OFCDC_SC_CODE")]
    pub office_code: String,
    /// Standard school code. Blank falls back to the configured default.
    #[serde(rename = "SD_SCHUL_CODE")]
    pub school_code: String,
    /// Single meal date, YYYYMMDD.
    #[serde(rename = "MLSV_YMD", default)]
    pub date: Option<String>,
    /// Meal slot: "1" breakfast, "2" lunch, "3" dinner.
    #[serde(rename = "MMEAL_SC_CODE", default)]
    pub meal_code: Option<MealCode>,
    /// Range start date, YYYYMMDD.
    #[serde(rename = "MLSV_FROM_YMD", default)]
    pub from_date: Option<String>,
    /// Range end date, YYYYMMDD.
    #[serde(rename = "MLSV_TO_YMD", default)]
    pub to_date: Option<String>,
}

impl From<GetMealParams> for MealQuery {
    fn from(params: GetMealParams) -> Self {
        Self {
            office_code: Some(params.office_code),
            school_code: Some(params.school_code),
            meal_code: params.meal_code,
            date: params.date,
            from_date: params.from_date,
            to_date: params.to_date,
        }
    }
}

/// Parameters for the `getSchool` tool. All filters optional; an empty call
/// lists schools nationwide.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSchoolParams {
    /// Education-office code, e.g. "B10" for Seoul.
    #[serde(rename = "ATPT_OFCDC_SC_CODE", default)]
    pub office_code: Option<String>,
    /// Standard school code.
    #[serde(rename = "SD_SCHUL_CODE", default)]
    pub school_code: Option<String>,
    /// School name, full or partial.
    #[serde(rename = "SCHUL_NM", default)]
    pub school_name: Option<String>,
    /// School kind: 초등학교, 중학교, 고등학교 or 특수학교.
    #[serde(rename = "SCHUL_KND_SC_NM", default)]
    pub school_kind: Option<SchoolKind>,
    /// Province/city name, e.g. "서울특별시".
    #[serde(rename = "LCTN_SC_NM", default)]
    pub region: Option<String>,
    /// Founding kind, e.g. "공립" or "사립".
    #[serde(rename = "FOND_SC_NM", default)]
    pub founding_kind: Option<String>,
}

impl From<GetSchoolParams> for SchoolQuery {
    fn from(params: GetSchoolParams) -> Self {
        Self {
            office_code: params.office_code,
            school_code: params.school_code,
            school_name: params.school_name,
            school_kind: params.school_kind,
            region: params.region,
            founding_kind: params.founding_kind,
        }
    }
}

use reqwest::Client;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{NeisError, Result};

use super::{Block, check_result_code, fetch_json, http_client, number_or_string};

/// Meal-slot codes accepted by the `MMEAL_SC_CODE` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MealCode {
    #[serde(rename = "1")]
    Breakfast,
    #[serde(rename = "2")]
    Lunch,
    #[serde(rename = "3")]
    Dinner,
}

impl MealCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "1",
            Self::Lunch => "2",
            Self::Dinner => "3",
        }
    }
}

/// Caller-side query for a meal lookup.
///
/// Office and school codes fall back to the configured defaults when absent
/// or blank. Single date and date range may be combined; NEIS decides what
/// such a query means, the fields are passed through verbatim.
#[derive(Debug, Clone, Default)]
pub struct MealQuery {
    pub office_code: Option<String>,
    pub school_code: Option<String>,
    pub meal_code: Option<MealCode>,
    pub date: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl MealQuery {
    /// Format checks that must pass before any network I/O.
    pub fn validate(&self) -> Result<()> {
        let dates = [
            ("MLSV_YMD", &self.date),
            ("MLSV_FROM_YMD", &self.from_date),
            ("MLSV_TO_YMD", &self.to_date),
        ];
        for (field, value) in dates {
            if let Some(value) = value
                && !is_yyyymmdd(value)
            {
                return Err(NeisError::InvalidParam {
                    field,
                    expected: "an 8-digit date in YYYYMMDD form",
                });
            }
        }
        Ok(())
    }
}

fn is_yyyymmdd(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

/// A single meal record as published by `mealServiceDietInfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRow {
    #[serde(rename = "ATPT_OFCDC_SC_CODE")]
    pub office_code: String,
    #[serde(rename = "ATPT_OFCDC_SC_NM")]
    pub office_name: String,
    #[serde(rename = "SD_SCHUL_CODE")]
    pub school_code: String,
    #[serde(rename = "SCHUL_NM")]
    pub school_name: String,
    #[serde(rename = "MMEAL_SC_CODE")]
    pub meal_code: String,
    #[serde(rename = "MMEAL_SC_NM")]
    pub meal_name: String,
    #[serde(rename = "MLSV_YMD")]
    pub meal_date: String,
    /// Headcount served; arrives as number or numeric string.
    #[serde(rename = "MLSV_FGR", deserialize_with = "number_or_string")]
    pub served_count: u64,
    #[serde(rename = "DDISH_NM")]
    pub dish_names: String,
    #[serde(rename = "ORPLC_INFO")]
    pub origin_info: String,
    #[serde(rename = "CAL_INFO")]
    pub calorie_info: String,
    #[serde(rename = "NTR_INFO")]
    pub nutrition_info: String,
    #[serde(rename = "MLSV_FROM_YMD")]
    pub from_date: String,
    #[serde(rename = "MLSV_TO_YMD")]
    pub to_date: String,
    #[serde(rename = "LOAD_DTM")]
    pub load_datetime: String,
}

/// Validated meal-service response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealResponse {
    #[serde(
        rename = "mealServiceDietInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub meal_service_diet_info: Option<Vec<Block<MealRow>>>,
}

/// Client for the `mealServiceDietInfo` resource.
#[derive(Clone)]
pub struct MealService {
    config: Config,
    client: Client,
}

impl MealService {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            config,
        })
    }

    /// Query pairs for one lookup: always `KEY`, `Type=json`, and the
    /// resolved office/school codes; optional filters appended verbatim.
    pub fn build_query(&self, query: &MealQuery) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("KEY".to_string(), self.config.api_key.clone()),
            ("Type".to_string(), "json".to_string()),
            (
                "ATPT_OFCDC_SC_CODE".to_string(),
                or_default(query.office_code.as_deref(), &self.config.office_code),
            ),
            (
                "SD_SCHUL_CODE".to_string(),
                or_default(query.school_code.as_deref(), &self.config.school_code),
            ),
        ];

        if let Some(code) = query.meal_code {
            pairs.push(("MMEAL_SC_CODE".to_string(), code.as_str().to_string()));
        }
        if let Some(date) = &query.date {
            pairs.push(("MLSV_YMD".to_string(), date.clone()));
        }
        if let Some(from) = &query.from_date {
            pairs.push(("MLSV_FROM_YMD".to_string(), from.clone()));
        }
        if let Some(to) = &query.to_date {
            pairs.push(("MLSV_TO_YMD".to_string(), to.clone()));
        }

        pairs
    }

    /// Full lookup pipeline: validate params, fetch, validate shape, check
    /// the remote result code. Short-circuits on the first failure.
    pub async fn get_meal_info(&self, query: &MealQuery) -> Result<MealResponse> {
        query.validate()?;

        let pairs = self.build_query(query);
        debug!(?query, "meal lookup");

        let raw = fetch_json(&self.client, &self.config.api_url, &pairs).await?;
        let validated: MealResponse = serde_json::from_value(raw)?;

        if let Some(blocks) = &validated.meal_service_diet_info {
            check_result_code(blocks)?;
        }

        Ok(validated)
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

use reqwest::Client;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

use super::{Block, check_result_code, fetch_json, http_client};

/// School-kind labels accepted by the `SCHUL_KND_SC_NM` filter. NEIS only
/// understands the Korean labels, so they are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SchoolKind {
    #[serde(rename = "초등학교")]
    Elementary,
    #[serde(rename = "중학교")]
    Middle,
    #[serde(rename = "고등학교")]
    High,
    #[serde(rename = "특수학교")]
    Special,
}

impl SchoolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Elementary => "초등학교",
            Self::Middle => "중학교",
            Self::High => "고등학교",
            Self::Special => "특수학교",
        }
    }
}

/// Caller-side query for a school-directory lookup. Every filter is
/// optional; an empty query lists schools nationwide (paginated remotely).
#[derive(Debug, Clone, Default)]
pub struct SchoolQuery {
    pub office_code: Option<String>,
    pub school_code: Option<String>,
    pub school_name: Option<String>,
    pub school_kind: Option<SchoolKind>,
    pub region: Option<String>,
    pub founding_kind: Option<String>,
}

/// A single school record as published by `schoolInfo`.
///
/// The three high-school classification fields are null for non-high
/// schools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRow {
    #[serde(rename = "ATPT_OFCDC_SC_CODE")]
    pub office_code: String,
    #[serde(rename = "ATPT_OFCDC_SC_NM")]
    pub office_name: String,
    #[serde(rename = "SD_SCHUL_CODE")]
    pub school_code: String,
    #[serde(rename = "SCHUL_NM")]
    pub school_name: String,
    #[serde(rename = "ENG_SCHUL_NM")]
    pub english_name: String,
    #[serde(rename = "SCHUL_KND_SC_NM")]
    pub school_kind: String,
    #[serde(rename = "LCTN_SC_NM")]
    pub region: String,
    #[serde(rename = "JU_ORG_NM")]
    pub supervisor_org: String,
    #[serde(rename = "FOND_SC_NM")]
    pub founding_kind: String,
    #[serde(rename = "ORG_RDNZC")]
    pub postal_code: String,
    #[serde(rename = "ORG_RDNMA")]
    pub road_address: String,
    #[serde(rename = "ORG_RDNDA")]
    pub road_address_detail: String,
    #[serde(rename = "ORG_TELNO")]
    pub phone_number: String,
    #[serde(rename = "HMPG_ADRES")]
    pub homepage: String,
    #[serde(rename = "COEDU_SC_NM")]
    pub coeducation_kind: String,
    #[serde(rename = "ORG_FAXNO")]
    pub fax_number: String,
    #[serde(rename = "HS_SC_NM")]
    pub highschool_kind: Option<String>,
    #[serde(rename = "INDST_SPECL_CCCCL_EXST_YN")]
    pub industry_class_flag: String,
    #[serde(rename = "HS_GNRL_BUSNS_SC_NM")]
    pub highschool_track: Option<String>,
    #[serde(rename = "SPCLY_PURPS_HS_ORD_NM")]
    pub special_purpose_track: Option<String>,
    #[serde(rename = "ENE_BFE_SEHF_SC_NM")]
    pub admission_period: String,
    #[serde(rename = "DGHT_SC_NM")]
    pub day_night_kind: String,
    #[serde(rename = "FOND_YMD")]
    pub founding_date: String,
    #[serde(rename = "FOAS_MEMRD")]
    pub anniversary: String,
    #[serde(rename = "LOAD_DTM")]
    pub load_datetime: String,
}

/// Validated school-directory response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolResponse {
    #[serde(rename = "schoolInfo", default, skip_serializing_if = "Option::is_none")]
    pub school_info: Option<Vec<Block<SchoolRow>>>,
}

/// Client for the `schoolInfo` resource.
#[derive(Clone)]
pub struct SchoolService {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl SchoolService {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            endpoint: config.school_endpoint(),
            api_key: config.api_key,
            client: http_client()?,
        })
    }

    /// Query pairs for one lookup: always `KEY` and `Type=json`; every
    /// provided filter appended verbatim, absent ones omitted.
    pub fn build_query(&self, query: &SchoolQuery) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("KEY".to_string(), self.api_key.clone()),
            ("Type".to_string(), "json".to_string()),
        ];

        let filters = [
            ("ATPT_OFCDC_SC_CODE", query.office_code.as_deref()),
            ("SD_SCHUL_CODE", query.school_code.as_deref()),
            ("SCHUL_NM", query.school_name.as_deref()),
            ("SCHUL_KND_SC_NM", query.school_kind.map(SchoolKind::as_str)),
            ("LCTN_SC_NM", query.region.as_deref()),
            ("FOND_SC_NM", query.founding_kind.as_deref()),
        ];
        for (key, value) in filters {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.to_string()));
            }
        }

        pairs
    }

    /// Full lookup pipeline: fetch, validate shape, check the remote result
    /// code. Short-circuits on the first failure.
    pub async fn get_school_info(&self, query: &SchoolQuery) -> Result<SchoolResponse> {
        let pairs = self.build_query(query);
        debug!(?query, "school lookup");

        let raw = fetch_json(&self.client, &self.endpoint, &pairs).await?;
        let validated: SchoolResponse = serde_json::from_value(raw)?;

        if let Some(blocks) = &validated.school_info {
            check_result_code(blocks)?;
        }

        Ok(validated)
    }
}

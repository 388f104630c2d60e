//! NEIS open-data API clients.
//!
//! One service per remote resource, each owning its configuration and the
//! full request pipeline: build query pairs, issue a single GET, validate
//! the response shape, then check the remote result code. Every call is a
//! stateless round trip; there is no caching and no retry.
//!
//! ## Module Structure
//!
//! - `meal`: meal-service lookups (`mealServiceDietInfo`)
//! - `school`: school-directory lookups (`schoolInfo`)
//!
//! The shared head/row envelope model lives here: NEIS wraps every response
//! in an outer array keyed by resource name, whose blocks carry `head`
//! metadata (pagination count and/or result code) and `row` records.

mod meal;
mod school;

pub use meal::{MealCode, MealQuery, MealResponse, MealRow, MealService};
pub use school::{SchoolKind, SchoolQuery, SchoolResponse, SchoolRow, SchoolService};

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{NeisError, Result};

/// Remote-side success sentinel. Any other code in a `RESULT` head entry is
/// an application-level failure, regardless of HTTP status.
pub const SUCCESS_CODE: &str = "INFO-000";

/// The upstream default is unbounded; a stuck NEIS call must not hang a tool
/// invocation forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn http_client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// `(code, message)` pair reported by the endpoint in a `RESULT` head entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCode {
    #[serde(rename = "CODE")]
    pub code: String,
    #[serde(rename = "MESSAGE")]
    pub message: String,
}

/// Head entries are polymorphic: a pagination count or a result object,
/// distinguished by which key is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeadEntry {
    Count {
        #[serde(deserialize_with = "number_or_string")]
        list_total_count: u64,
    },
    Result {
        #[serde(rename = "RESULT")]
        result: ResultCode,
    },
}

/// One block of the outer response array: `head` metadata and/or `row`
/// records. NEIS splits the two across separate blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct Block<R> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Vec<HeadEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<Vec<R>>,
}

/// Scan head entries for a `RESULT` object and reject any non-success code.
///
/// The code and message are carried verbatim so callers can distinguish a
/// remote application error from a transport or validation failure.
pub(crate) fn check_result_code<R>(blocks: &[Block<R>]) -> Result<()> {
    for entry in blocks.iter().flat_map(|b| b.head.iter().flatten()) {
        if let HeadEntry::Result { result } = entry
            && result.code != SUCCESS_CODE
        {
            return Err(NeisError::Api {
                code: result.code.clone(),
                message: result.message.clone(),
            });
        }
    }
    Ok(())
}

/// One GET against `url`, returning the raw JSON body.
///
/// Non-2xx becomes a status error; network failure or a non-JSON body
/// becomes a transport error carrying the cause.
pub(crate) async fn fetch_json(client: &Client, url: &str, query: &[(String, String)]) -> Result<Value> {
    let response = client.get(url).query(query).send().await?;

    let status = response.status();
    debug!(url, status = status.as_u16(), "NEIS request");
    if !status.is_success() {
        return Err(NeisError::Status {
            status: status.as_u16(),
        });
    }

    let raw: Value = response.json().await?;
    debug!(body = %raw, "raw NEIS response");
    Ok(raw)
}

/// NEIS emits count fields as a number or a numeric string depending on the
/// resource; normalize to numeric. This is the only coercion performed
/// anywhere in response validation.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        String(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

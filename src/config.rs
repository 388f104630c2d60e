use crate::error::{NeisError, Result};

pub const ENV_API_KEY: &str = "NEIS_API_KEY";
pub const ENV_API_URL: &str = "NEIS_API_URL";
pub const ENV_OFFICE_CODE: &str = "DEFAULT_OFFICE_CODE";
pub const ENV_SCHOOL_CODE: &str = "DEFAULT_SCHOOL_CODE";

/// Process-wide NEIS access configuration, read once at startup and shared
/// read-only by both services.
#[derive(Debug, Clone)]
pub struct Config {
    /// Open-data access key appended to every request as `KEY`.
    pub api_key: String,
    /// Endpoint root. The meal service uses it directly, the school service
    /// appends `/schoolInfo`.
    pub api_url: String,
    /// Fallback education-office code for meal queries.
    pub office_code: String,
    /// Fallback school code for meal queries.
    pub school_code: String,
}

impl Config {
    /// Read the four required variables from the process environment.
    ///
    /// Fails fast with the first missing variable so a misconfigured server
    /// aborts before the MCP transport is connected.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary lookup. Blank values count as missing: NEIS
    /// answers a blank key with an opaque remote error, so rejecting it here
    /// names the actual problem.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(NeisError::Config { name }),
        };

        Ok(Self {
            api_key: require(ENV_API_KEY)?,
            api_url: require(ENV_API_URL)?,
            office_code: require(ENV_OFFICE_CODE)?,
            school_code: require(ENV_SCHOOL_CODE)?,
        })
    }

    /// Endpoint for the school-directory resource.
    pub fn school_endpoint(&self) -> String {
        format!("{}/schoolInfo", self.api_url)
    }
}

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::neis::{MealService, SchoolService};

use super::types::{GetMealParams, GetSchoolParams};

#[derive(Clone)]
pub struct NeisMcpServer {
    meal: MealService,
    school: SchoolService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl NeisMcpServer {
    /// Construct both services up front. A bad configuration fails here,
    /// before the transport is connected, never on the first tool call.
    pub fn new(config: Config) -> crate::error::Result<Self> {
        Ok(Self {
            meal: MealService::new(config.clone())?,
            school: SchoolService::new(config)?,
            tool_router: Self::tool_router(),
        })
    }

    /// Look up school meal-service information.
    #[tool(
        name = "getMeal",
        description = "Look up school meal information from NEIS. Requires an education-office code and a school code (blank values fall back to the configured defaults); optionally filter by meal slot, a single YYYYMMDD date, or a from/to date range."
    )]
    pub async fn get_meal(
        &self,
        params: Parameters<GetMealParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = params.0.into();
        match self.meal.get_meal_info(&query).await {
            Ok(response) => {
                let json_str = serde_json::to_string_pretty(&response).map_err(|e| {
                    McpError::internal_error(format!("JSON serialization failed: {}", e), None)
                })?;
                Ok(CallToolResult::success(vec![Content::text(json_str)]))
            }
            Err(err) => Ok(CallToolResult::error(vec![Content::text(format!(
                "meal information lookup failed: {}",
                err
            ))])),
        }
    }

    /// Look up school-directory information.
    #[tool(
        name = "getSchool",
        description = "Look up school directory information from NEIS. All filters are optional: education-office code, school code, school name, school kind (초등학교/중학교/고등학교/특수학교), region, founding kind."
    )]
    pub async fn get_school(
        &self,
        params: Parameters<GetSchoolParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = params.0.into();
        match self.school.get_school_info(&query).await {
            Ok(response) => {
                let json_str = serde_json::to_string_pretty(&response).map_err(|e| {
                    McpError::internal_error(format!("JSON serialization failed: {}", e), None)
                })?;
                Ok(CallToolResult::success(vec![Content::text(json_str)]))
            }
            Err(err) => Ok(CallToolResult::error(vec![Content::text(format!(
                "school information lookup failed: {}",
                err
            ))])),
        }
    }
}

#[tool_handler]
impl ServerHandler for NeisMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "NEIS MCP exposes Korean national education information lookups.\n\n\
                 Available tools:\n\
                 1. getMeal - School meal menus, origin, calorie and nutrition data. \
                 Scope with ATPT_OFCDC_SC_CODE + SD_SCHUL_CODE and narrow by MLSV_YMD \
                 or a MLSV_FROM_YMD/MLSV_TO_YMD range.\n\
                 2. getSchool - School directory (addresses, contacts, classification). \
                 All filters optional; combine SCHUL_NM with LCTN_SC_NM to disambiguate \
                 common school names.\n\n\
                 Dates are YYYYMMDD strings. Failures return an error-flagged text \
                 message carrying the remote NEIS code where one was reported."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for the MCP server: read configuration, build services, and
/// serve tools over stdio until the client disconnects.
pub fn run_server() -> Result<()> {
    let config = Config::from_env()?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = NeisMcpServer::new(config)?;
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}

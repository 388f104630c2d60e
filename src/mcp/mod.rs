//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the NEIS lookup services as MCP tools over the stdio transport.
//! The adapters here own the published parameter contracts and flatten every
//! pipeline failure into an error-flagged text envelope; nothing below this
//! boundary reaches the MCP client as a fault.
//!
//! ## Module Structure
//!
//! - `server`: tool router, server handler and stdio entry point
//! - `types`: tool parameter contracts (`getMeal` / `getSchool`)

mod server;
pub mod types;

pub use server::{NeisMcpServer, run_server};

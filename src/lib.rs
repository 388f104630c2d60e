//! NEIS MCP - Korean national education information lookups over MCP
//!
//! This crate serves two query tools, `getMeal` and `getSchool`, to MCP
//! clients and proxies them to the NEIS open-data API. Each tool call is one
//! stateless round trip: build a query string, issue a GET, validate the
//! JSON envelope, check the remote result code.
//!
//! ## Module Structure
//!
//! - `config`: environment configuration, read once and shared read-only
//! - `error`: the typed error kinds flowing through the pipeline
//! - `neis`: per-resource request services and the validated response model
//! - `mcp`: Model Context Protocol server and tool parameter contracts

pub mod config;
pub mod error;
pub mod mcp;
pub mod neis;

//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes import, export and the file/key catalog to AI assistants over
//! stdio. Every tool takes the project root and resolves the workspace the
//! same way the CLI does.
//!
//! ## Module Structure
//!
//! - `helpers`: Workspace loading and error/result conversion
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameters and result DTOs

mod helpers;
mod server;
pub mod types;

pub use server::{TransyncMcpServer, run_server};

// src/lib.rs
// Calculator - a catalog of stateless math operations served over MCP

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod format;
pub mod mcp;
pub mod ops;
pub mod registry;
pub mod response;

pub use error::{CalcError, DomainError, Result, ValidationError};
pub use registry::Registry;
pub use response::Response;

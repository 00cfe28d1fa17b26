//! Gitlet Observability Module
//!
//! Structured logging for the Gitlet command-line tool.
//!
//! # Features
//!
//! - **Multiple Output Formats**: Pretty, JSON, and compact output formats
//! - **Environment-based Filtering**: Log level control via `RUST_LOG`
//! - **Quiet by Default**: logs go to stderr at `warn`, so stdout carries only
//!   command output
//!
//! # Example
//!
//! ```no_run
//! use gitlet_observability::{init_tracing, LogFormat};
//!
//! init_tracing(LogFormat::Compact, Some("debug")).unwrap();
//! tracing::info!("Application started");
//! ```

pub mod config;
pub mod initialization;

pub use config::{LogConfig, LogError, LogFormat, LogOutput, DEFAULT_LOG_LEVEL};
pub use initialization::{init_tracing, init_tracing_with_config};

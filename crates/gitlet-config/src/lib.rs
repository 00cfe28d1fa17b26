// Copyright (C) 2026  Gitlet Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Configuration management for Gitlet repositories
//!
//! A repository may carry an optional `.gitlet/config.toml`. Every field has
//! a default, so a missing file or a missing section is never an error.
//!
//! # Features
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides with the `GITLET_` prefix
//! - Validation with field-level error messages
//!
//! # Example
//!
//! ```no_run
//! use gitlet_config::Config;
//!
//! let config = Config::load(".")?;
//! println!("log level: {}", config.observability.log_level);
//! # Ok::<(), gitlet_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, ENV_LOG_FORMAT, ENV_LOG_LEVEL};
pub use schema::{Config, ObservabilityConfig, CONFIG_FILE};
pub use validation::Validator;

// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::cli::LogArgs;
use crate::error::ConfigError;
use clap::ValueEnum;
use figment::Figment;
use figment::providers::Env;
use figment::providers::Serialized;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `TOUR_LOGGER_LEVEL=debug`.
pub const ENV_PREFIX: &str = "TOUR_LOGGER_";

/// How records are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  /// One JSON object per line.
  Json,
  /// Human readable lines.
  Console,
}

/// Where records are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
  Stdout,
  Stderr,
  File(PathBuf),
}

/// Fully resolved logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
  /// Any `EnvFilter` directive, e.g. `info` or `toolkit_tour=debug`.
  pub level: String,
  pub format: LogFormat,
  pub output: LogOutput,
}

impl LoggerConfig {
  /// JSON at `info` to stdout.
  pub fn production() -> Self {
    Self {
      level: "info".to_string(),
      format: LogFormat::Json,
      output: LogOutput::Stdout,
    }
  }

  /// Console lines at `debug` to stderr.
  pub fn development() -> Self {
    Self {
      level: "debug".to_string(),
      format: LogFormat::Console,
      output: LogOutput::Stderr,
    }
  }

  /// Layers the production preset, `TOUR_LOGGER_*` env vars and `overrides`,
  /// in that order. Unset override fields are skipped.
  pub fn load(overrides: &LoggerOverrides) -> Result<Self, ConfigError> {
    let config: Self = Figment::from(Serialized::defaults(Self::production()))
      .merge(Env::prefixed(ENV_PREFIX))
      .merge(Serialized::defaults(overrides))
      .extract()
      .map_err(Box::new)?;

    Ok(config)
  }
}

impl Default for LoggerConfig {
  fn default() -> Self {
    Self::production()
  }
}

/// Optional values that win over every other layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoggerOverrides {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub level: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub format: Option<LogFormat>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub output: Option<LogOutput>,
}

impl TryFrom<&LogArgs> for LoggerConfig {
  type Error = ConfigError;

  fn try_from(
    LogArgs {
      level,
      format,
      output,
      ..
    }: &LogArgs,
  ) -> Result<Self, Self::Error> {
    let overrides = LoggerOverrides {
      level: level.clone(),
      format: *format,
      output: output.clone().map(LogOutput::File),
    };

    Self::load(&overrides)
  }
}

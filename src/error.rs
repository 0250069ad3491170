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
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the `args::parse` dispatcher.
#[derive(Error, Debug)]
pub enum TourError {
  #[error(transparent)]
  Args(#[from] clap::Error),

  #[error("JSON serialization error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Errors related to logger configuration (src/config.rs).
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to resolve logger configuration: {0}")]
  Extract(#[from] Box<figment::Error>),
}

/// Errors related to building a logger (src/logger.rs).
#[derive(Error, Debug)]
pub enum LoggerError {
  #[error("Invalid log level '{level}'")]
  InvalidLevel {
    level: String,
    #[source]
    source: tracing::level_filters::ParseLevelFilterError,
  },

  #[error("Invalid log directive '{directive}'")]
  InvalidDirective {
    directive: String,
    #[source]
    source: tracing_subscriber::filter::ParseError,
  },

  #[error("Log output path has no file name: {0}")]
  OutputPath(PathBuf),
}

/// Errors raised while parsing a `KEY:INT` pair (src/args.rs).
#[derive(Error, Debug, PartialEq)]
pub enum KeyValueError {
  #[error("expected KEY:INT, no ':' found in '{0}'")]
  MissingSeparator(String),

  #[error("invalid integer '{value}' for key '{key}'")]
  InvalidValue {
    key: String,
    value: String,
    #[source]
    source: std::num::ParseIntError,
  },
}

/// Errors produced by a test double (src/mock.rs).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockError {
  #[error("{method}: unexpected call with arguments {args}")]
  UnexpectedCall { method: &'static str, args: String },

  #[error("{method}: call with arguments {args} exceeded the expected {times} call(s)")]
  ExhaustedExpectation {
    method: &'static str,
    args: String,
    times: usize,
  },

  #[error("{method}: expected {expected} call(s), got {actual}")]
  CallCountMismatch {
    method: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("{method}: expected a call with arguments {args}, recorded calls: {recorded}")]
  NotCalledWith {
    method: &'static str,
    args: String,
    recorded: String,
  },

  #[error("{method}: unmet expectations: {unmet}")]
  UnmetExpectations { method: &'static str, unmet: String },
}

/// Errors surfaced through the `Doer` interface (src/doer.rs).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DoerError {
  #[error("Rejected input '{0}'")]
  Rejected(String),

  #[error(transparent)]
  Mock(#[from] MockError),
}

/// Collected soft assertion failures (src/assert.rs).
#[derive(Error, Debug)]
#[error("{} assertion(s) failed:\n{}", .failures.len(), .failures.join("\n"))]
pub struct AssertionError {
  pub failures: Vec<String>,
}

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

//! Structured logging tour.
//!
//! A [`Logger`] owns its own subscriber instead of installing a global one,
//! so several loggers can live side by side in one process. Records are
//! written through a non-blocking worker; [`Logger::sync`] (or dropping the
//! logger) flushes whatever is still buffered.

use crate::config::LogFormat;
use crate::config::LogOutput;
use crate::config::LoggerConfig;
use crate::error::LoggerError;
use serde_json::Map;
use serde_json::Value;
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;
use tracing::Dispatch;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::DEFAULT_BUFFERED_LINES_LIMIT;
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::non_blocking::NonBlockingBuilder;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

/// A self-contained structured logger.
pub struct Logger {
  dispatch: Dispatch,
  guard: Option<WorkerGuard>,
}

impl Logger {
  /// JSON records at `info` and above, written to stdout.
  pub fn production() -> Result<Self, LoggerError> {
    Self::from_config(&LoggerConfig::production())
  }

  /// Console records at `debug` and above, written to stderr.
  pub fn development() -> Result<Self, LoggerError> {
    Self::from_config(&LoggerConfig::development())
  }

  /// Builds a logger writing to the configured output.
  pub fn from_config(config: &LoggerConfig) -> Result<Self, LoggerError> {
    match &config.output {
      LogOutput::Stdout => Self::with_writer(config, std::io::stdout()),
      LogOutput::Stderr => Self::with_writer(config, std::io::stderr()),
      LogOutput::File(path) => {
        let file_name = path
          .file_name()
          .ok_or_else(|| LoggerError::OutputPath(path.clone()))?;
        let dir = match path.parent() {
          Some(parent) if !parent.as_os_str().is_empty() => parent,
          _ => std::path::Path::new("."),
        };
        Self::with_writer(config, tracing_appender::rolling::never(dir, file_name))
      }
    }
  }

  /// Builds a logger writing to an arbitrary sink. Output format and level
  /// come from `config`; its `output` field is ignored.
  pub fn with_writer<W>(config: &LoggerConfig, writer: W) -> Result<Self, LoggerError>
  where
    W: Write + Send + 'static,
  {
    Self::build(config, writer, DEFAULT_BUFFERED_LINES_LIMIT)
  }

  /// Records never get dropped: once `buffered_lines` records are queued,
  /// emitting blocks until the worker catches up.
  fn build<W>(config: &LoggerConfig, writer: W, buffered_lines: usize) -> Result<Self, LoggerError>
  where
    W: Write + Send + 'static,
  {
    let filter = parse_filter(&config.level)?;
    let (writer, guard) = NonBlockingBuilder::default()
      .lossy(false)
      .buffered_lines_limit(buffered_lines)
      .finish(writer);

    Ok(Self {
      dispatch: build_dispatch(config.format, filter, writer),
      guard: Some(guard),
    })
  }

  /// Runs `f` with this logger as the active subscriber.
  pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
    tracing::dispatcher::with_default(&self.dispatch, f)
  }

  /// Emits the fetch-failure record with strongly typed fields.
  pub fn report_fetch_failure(&self, url: &str, attempt: u32, backoff: Duration) {
    self.in_scope(|| {
      tracing::info!(url, attempt, ?backoff, "failed to fetch URL");
    });
  }

  /// Loosely typed key/value interface on top of this logger.
  pub fn sugar(&self) -> SugaredLogger<'_> {
    SugaredLogger { logger: self }
  }

  /// Flushes buffered records and shuts the writer down.
  pub fn sync(mut self) {
    drop(self.guard.take());
  }
}

/// `EnvFilter` reads a bare word as a target name, so directives without
/// `=` must be plain level names.
fn parse_filter(level: &str) -> Result<EnvFilter, LoggerError> {
  for directive in level.split(',').map(str::trim).filter(|d| !d.is_empty()) {
    if !directive.contains('=') {
      LevelFilter::from_str(directive).map_err(|source| LoggerError::InvalidLevel {
        level: directive.to_string(),
        source,
      })?;
    }
  }

  EnvFilter::try_new(level).map_err(|source| LoggerError::InvalidDirective {
    directive: level.to_string(),
    source,
  })
}

fn build_dispatch(format: LogFormat, filter: EnvFilter, writer: NonBlocking) -> Dispatch {
  match format {
    LogFormat::Json => Dispatch::new(
      tracing_subscriber::registry().with(filter).with(
        fmt::layer()
          .json()
          .flatten_event(true)
          .with_writer(writer)
          .with_ansi(false),
      ),
    ),
    LogFormat::Console => Dispatch::new(
      tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false)),
    ),
  }
}

/// A loosely typed value for the sugared interface.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
  Str(String),
  Int(i64),
  Bool(bool),
  Duration(Duration),
}

impl From<&str> for FieldValue {
  fn from(value: &str) -> Self {
    FieldValue::Str(value.to_string())
  }
}

impl From<String> for FieldValue {
  fn from(value: String) -> Self {
    FieldValue::Str(value)
  }
}

impl From<i64> for FieldValue {
  fn from(value: i64) -> Self {
    FieldValue::Int(value)
  }
}

impl From<i32> for FieldValue {
  fn from(value: i32) -> Self {
    FieldValue::Int(i64::from(value))
  }
}

impl From<bool> for FieldValue {
  fn from(value: bool) -> Self {
    FieldValue::Bool(value)
  }
}

impl From<Duration> for FieldValue {
  fn from(value: Duration) -> Self {
    FieldValue::Duration(value)
  }
}

impl From<&FieldValue> for Value {
  fn from(value: &FieldValue) -> Self {
    match value {
      FieldValue::Str(s) => Value::from(s.as_str()),
      FieldValue::Int(i) => Value::from(*i),
      FieldValue::Bool(b) => Value::from(*b),
      FieldValue::Duration(d) => Value::from(format!("{d:?}")),
    }
  }
}

/// Key/value logging with run-time field names.
///
/// tracing fixes field names at the call site, so the pairs are rendered
/// into a single `context` field holding a JSON object.
pub struct SugaredLogger<'a> {
  logger: &'a Logger,
}

impl SugaredLogger<'_> {
  pub fn debugw(&self, message: &str, fields: &[(&str, FieldValue)]) {
    self.log(Level::DEBUG, message, fields);
  }

  pub fn infow(&self, message: &str, fields: &[(&str, FieldValue)]) {
    self.log(Level::INFO, message, fields);
  }

  pub fn warnw(&self, message: &str, fields: &[(&str, FieldValue)]) {
    self.log(Level::WARN, message, fields);
  }

  pub fn errorw(&self, message: &str, fields: &[(&str, FieldValue)]) {
    self.log(Level::ERROR, message, fields);
  }

  fn log(&self, level: Level, message: &str, fields: &[(&str, FieldValue)]) {
    let context = Value::Object(
      fields
        .iter()
        .map(|(key, value)| (key.to_string(), Value::from(value)))
        .collect::<Map<_, _>>(),
    );

    self.logger.in_scope(|| match level {
      Level::ERROR => tracing::error!(%context, "{}", message),
      Level::WARN => tracing::warn!(%context, "{}", message),
      Level::INFO => tracing::info!(%context, "{}", message),
      Level::DEBUG => tracing::debug!(%context, "{}", message),
      _ => tracing::trace!(%context, "{}", message),
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;
  use std::sync::Mutex;

  #[derive(Clone, Default)]
  struct SharedBuf(Arc<Mutex<Vec<u8>>>);

  impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  impl SharedBuf {
    fn lines(&self) -> Vec<serde_json::Value> {
      let bytes = self.0.lock().unwrap().clone();
      String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
    }
  }

  #[test]
  fn test_typed_logger_writes_json_after_sync() {
    let buf = SharedBuf::default();
    let logger = Logger::with_writer(&LoggerConfig::production(), buf.clone()).unwrap();

    logger.report_fetch_failure("http://locallhost:oooo/", 3, Duration::from_secs(1));
    logger.sync();

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    let record = &lines[0];
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["message"], "failed to fetch URL");
    assert_eq!(record["url"], "http://locallhost:oooo/");
    assert_eq!(record["attempt"], 3);
    assert_eq!(record["backoff"], "1s");
  }

  #[test]
  fn test_sugared_logger_renders_context() {
    let buf = SharedBuf::default();
    let logger = Logger::with_writer(&LoggerConfig::production(), buf.clone()).unwrap();

    logger.sugar().infow(
      "failed to fetch URL",
      &[
        ("url", "http://locallhost:oooo/".into()),
        ("attempt", 3.into()),
        ("backoff", Duration::from_secs(1).into()),
      ],
    );
    drop(logger);

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    let context: serde_json::Value =
      serde_json::from_str(lines[0]["context"].as_str().unwrap()).unwrap();
    assert_eq!(
      context,
      serde_json::json!({"url": "http://locallhost:oooo/", "attempt": 3, "backoff": "1s"})
    );
  }

  #[test]
  fn test_level_filter_drops_debug_in_production() {
    let buf = SharedBuf::default();
    let logger = Logger::with_writer(&LoggerConfig::production(), buf.clone()).unwrap();

    let sugar = logger.sugar();
    sugar.debugw("hidden", &[]);
    sugar.warnw("shown", &[("retry", true.into())]);
    logger.sync();

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "WARN");
    assert_eq!(lines[0]["message"], "shown");
  }

  #[test]
  fn test_console_format_is_plain_text() {
    let buf = SharedBuf::default();
    let logger = Logger::with_writer(&LoggerConfig::development(), buf.clone()).unwrap();

    logger.sugar().debugw("warming up", &[("step", 1.into())]);
    logger.sync();

    let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("DEBUG"));
    assert!(text.contains("warming up"));
  }

  fn build_err(level: &str) -> LoggerError {
    let config = LoggerConfig {
      level: level.to_string(),
      ..LoggerConfig::production()
    };
    Logger::with_writer(&config, std::io::sink()).err().unwrap()
  }

  #[test]
  fn test_plain_word_that_is_not_a_level_is_rejected() {
    for level in ["verbose", "loud", "infoo"] {
      let err = build_err(level);
      assert!(
        matches!(err, LoggerError::InvalidLevel { level: ref l, .. } if l == level),
        "{level}: {err:?}"
      );
    }
  }

  #[test]
  fn test_bad_level_inside_directive_list_is_rejected() {
    assert!(matches!(
      build_err("toolkit_tour=debug, verbose"),
      LoggerError::InvalidLevel { ref level, .. } if level == "verbose"
    ));
  }

  #[test]
  fn test_malformed_target_directive_is_rejected() {
    assert!(matches!(
      build_err("toolkit_tour=loud"),
      LoggerError::InvalidDirective { .. }
    ));
  }

  #[test]
  fn test_level_names_and_target_directives_are_accepted() {
    for level in ["info", "WARN", "off", "toolkit_tour=debug", "warn,toolkit_tour=trace"] {
      let config = LoggerConfig {
        level: level.to_string(),
        ..LoggerConfig::production()
      };
      assert!(Logger::with_writer(&config, std::io::sink()).is_ok(), "{level}");
    }
  }

  #[derive(Clone, Default)]
  struct SlowLineCounter(Arc<Mutex<usize>>);

  impl Write for SlowLineCounter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      std::thread::sleep(Duration::from_micros(200));
      *self.0.lock().unwrap() += buf.iter().filter(|&&b| b == b'\n').count();
      Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn test_sync_flushes_every_record_past_the_buffer_limit() {
    let counter = SlowLineCounter::default();
    let logger = Logger::build(&LoggerConfig::production(), counter.clone(), 16).unwrap();

    let emitted = 500;
    for attempt in 0..emitted {
      logger.report_fetch_failure("http://locallhost:oooo/", attempt, Duration::from_secs(1));
    }
    logger.sync();

    assert_eq!(*counter.0.lock().unwrap(), emitted as usize);
  }

  #[test]
  fn test_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tour.log");
    let config = LoggerConfig {
      output: LogOutput::File(path.clone()),
      ..LoggerConfig::production()
    };

    let logger = Logger::from_config(&config).unwrap();
    logger.report_fetch_failure("http://example.invalid/", 1, Duration::from_millis(250));
    logger.sync();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"attempt\":1"));
    assert!(content.contains("250ms"));
  }
}

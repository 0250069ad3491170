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

//! Option schemas for the flag parsing tour.
//!
//! Every schema parses an argument list *without* a leading binary name,
//! so `BasicOpts::try_parse_from(["-vv", "arg1"])` is a complete invocation.

use crate::error::KeyValueError;
use crate::error::TourError;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap::Parser;
use clap::ValueEnum;
use parking_lot::Mutex;
use serde::Serialize;
use serde::Serializer;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

/// A repeatable boolean flag plus positional arguments.
#[derive(Debug, Parser, Serialize)]
#[command(name = "basic", no_binary_name = true)]
pub struct BasicOpts {
  /// Show verbose debug information
  #[arg(
    short,
    long,
    action = ArgAction::Append,
    num_args = 0..=1,
    require_equals = true,
    default_missing_value = "true"
  )]
  pub verbose: Vec<bool>,

  /// Arguments not consumed by any option, in their original order.
  pub remaining: Vec<String>,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "default", no_binary_name = true)]
pub struct DefaultOpts {
  /// Show default
  #[arg(short, long, default_value = "default-value")]
  pub default: String,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "env", no_binary_name = true)]
pub struct EnvOpts {
  /// Possible to override by env
  #[arg(short, long, env = "ENV", default_value = "dev")]
  pub env: String,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "offset", no_binary_name = true)]
pub struct OffsetOpts {
  /// Offset
  #[arg(long, default_value_t = 0)]
  pub offset: u32,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "required", no_binary_name = true)]
pub struct RequiredOpts {
  /// A name
  #[arg(short, long, required = true)]
  pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Animal {
  Cat,
  Dog,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "choice", no_binary_name = true)]
pub struct ChoiceOpts {
  #[arg(long, value_enum)]
  pub animal: Option<Animal>,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "value-name", no_binary_name = true)]
pub struct ValueNameOpts {
  /// A file
  #[arg(short, long, value_name = "FILE")]
  pub file: Option<PathBuf>,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "pointer", no_binary_name = true)]
pub struct PointerOpts {
  /// An optional integer
  #[arg(short = 'p')]
  pub ptr: Option<i64>,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "ptr-slice", no_binary_name = true)]
pub struct PtrSliceOpts {
  /// A list of strings, one per occurrence
  #[arg(long = "ptrslice")]
  pub string_slice: Vec<String>,
}

#[derive(Debug, Parser, Serialize)]
#[command(name = "str-int-map", no_binary_name = true)]
pub struct StrIntMapOpts {
  /// A map from string to int, given as KEY:INT
  #[arg(long = "strintmap", value_name = "KEY:INT", value_parser = parse_key_val)]
  #[serde(serialize_with = "pairs_as_map")]
  pub str_int_map: Vec<(String, i64)>,
}

impl StrIntMapOpts {
  /// Collapses the pairs into a map. A repeated key keeps its last value.
  pub fn to_map(&self) -> BTreeMap<String, i64> {
    self.str_int_map.iter().cloned().collect()
  }
}

fn pairs_as_map<S: Serializer>(pairs: &[(String, i64)], serializer: S) -> Result<S::Ok, S::Error> {
  serializer.collect_map(pairs.iter().cloned().collect::<BTreeMap<_, _>>())
}

/// Parses a single `KEY:INT` pair.
pub fn parse_key_val(s: &str) -> Result<(String, i64), KeyValueError> {
  let (key, value) = s
    .split_once(':')
    .ok_or_else(|| KeyValueError::MissingSeparator(s.to_string()))?;

  let parsed = value
    .parse::<i64>()
    .map_err(|source| KeyValueError::InvalidValue {
      key: key.to_string(),
      value: value.to_string(),
      source,
    })?;

  Ok((key.to_string(), parsed))
}

/// Result of the callback schema.
#[derive(Debug, Default, Serialize)]
pub struct CallOpts {
  /// Log line written by the callback, if it ran.
  pub call_log: Option<String>,
}

/// Builds the callback schema. `on_call` runs once per `-c` occurrence,
/// while the argument list is being parsed.
pub fn call_command<F>(on_call: F) -> Command
where
  F: Fn(&str) + Clone + Send + Sync + 'static,
{
  Command::new("call").no_binary_name(true).arg(
    Arg::new("call")
      .short('c')
      .value_name("NUMBER")
      .help("Call phone number")
      .action(ArgAction::Append)
      .value_parser(move |number: &str| -> Result<String, std::convert::Infallible> {
        on_call(number);
        Ok(number.to_string())
      }),
  )
}

/// Parses the callback schema with a callback that records `call...<number>`.
pub fn parse_call<I, T>(args: I) -> Result<CallOpts, clap::Error>
where
  I: IntoIterator<Item = T>,
  T: Into<OsString> + Clone,
{
  let log = Arc::new(Mutex::new(None));
  let sink = Arc::clone(&log);

  call_command(move |number| {
    tracing::debug!(number, "call option invoked");
    *sink.lock() = Some(format!("call...{number}"));
  })
  .try_get_matches_from(args)?;

  let call_log = log.lock().take();
  Ok(CallOpts { call_log })
}

/// Every schema the `tour parse` command knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Schema {
  Basic,
  Default,
  Env,
  Offset,
  Call,
  Required,
  Choice,
  ValueName,
  Pointer,
  PtrSlice,
  StrIntMap,
}

/// Parses `args` against `schema` and renders the result as JSON.
pub fn parse<I, T>(schema: Schema, args: I) -> Result<serde_json::Value, TourError>
where
  I: IntoIterator<Item = T>,
  T: Into<OsString> + Clone,
{
  tracing::debug!(?schema, "parsing arguments");

  let value = match schema {
    Schema::Basic => serde_json::to_value(BasicOpts::try_parse_from(args)?)?,
    Schema::Default => serde_json::to_value(DefaultOpts::try_parse_from(args)?)?,
    Schema::Env => serde_json::to_value(EnvOpts::try_parse_from(args)?)?,
    Schema::Offset => serde_json::to_value(OffsetOpts::try_parse_from(args)?)?,
    Schema::Call => serde_json::to_value(parse_call(args)?)?,
    Schema::Required => serde_json::to_value(RequiredOpts::try_parse_from(args)?)?,
    Schema::Choice => serde_json::to_value(ChoiceOpts::try_parse_from(args)?)?,
    Schema::ValueName => serde_json::to_value(ValueNameOpts::try_parse_from(args)?)?,
    Schema::Pointer => serde_json::to_value(PointerOpts::try_parse_from(args)?)?,
    Schema::PtrSlice => serde_json::to_value(PtrSliceOpts::try_parse_from(args)?)?,
    Schema::StrIntMap => serde_json::to_value(StrIntMapOpts::try_parse_from(args)?)?,
  };

  Ok(value)
}

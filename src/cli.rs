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
use crate::args::Schema;
use crate::config::LogFormat;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "A runnable tour of argument parsing, structured logging and test doubles")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Parse arguments against one of the demo option schemas and print the result as JSON.
  Parse {
    /// The option schema to parse against.
    #[arg(value_enum)]
    schema: Schema,

    /// Arguments handed to the schema, unchanged.
    /// Example: `tour parse basic -vv arg1 arg2`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
  },

  /// Emit the "failed to fetch URL" record through a configured logger.
  Log(LogArgs),

  /// Run inputs through the doubling `Doer` and print one result per line.
  Double {
    #[arg(required = true)]
    inputs: Vec<String>,
  },
}

#[derive(Debug, Args)]
pub struct LogArgs {
  /// Use the loosely typed key/value interface.
  #[arg(long)]
  pub sugared: bool,

  /// How many records to emit.
  #[arg(long, default_value_t = 1)]
  pub repeat: u32,

  /// Filter directive, e.g. `info` or `toolkit_tour=debug`. Overrides TOUR_LOGGER_LEVEL.
  #[arg(long)]
  pub level: Option<String>,

  /// Record encoding. Overrides TOUR_LOGGER_FORMAT.
  #[arg(long, value_enum)]
  pub format: Option<LogFormat>,

  /// Write records to this file instead of stdout.
  #[arg(long)]
  pub output: Option<PathBuf>,
}

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
use Commands::Double;
use Commands::Log;
use Commands::Parse;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use toolkit_tour::args::parse;
use toolkit_tour::cli::Cli;
use toolkit_tour::cli::Commands;
use toolkit_tour::config::LoggerConfig;
use toolkit_tour::doer::Doubler;
use toolkit_tour::doer::process_all;
use toolkit_tour::logger::Logger;
use toolkit_tour::logging::setup_tracing;

const FETCH_URL: &str = "http://locallhost:oooo/";

fn main() -> Result<()> {
  let _guard = setup_tracing()?;

  let Cli { command } = Cli::parse();
  let main_span = tracing::info_span!("tour");
  let _enter = main_span.enter();

  match command {
    Parse { schema, args } => {
      let value = parse(schema, &args)?;
      println!("{}", serde_json::to_string(&value)?);
    }
    Log(log_args) => {
      let config = LoggerConfig::try_from(&log_args).context("Failed to load logger configuration")?;
      tracing::debug!(?config, "Resolved logger configuration");

      let logger = Logger::from_config(&config)?;
      let backoff = Duration::from_secs(1);
      for attempt in 1..=log_args.repeat {
        if log_args.sugared {
          logger.sugar().infow(
            "failed to fetch URL",
            &[
              ("url", FETCH_URL.into()),
              ("attempt", i64::from(attempt).into()),
              ("backoff", backoff.into()),
            ],
          );
        } else {
          logger.report_fetch_failure(FETCH_URL, attempt, backoff);
        }
      }
      logger.sync();
    }
    Double { inputs } => {
      let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
      for output in process_all(&Doubler, &inputs)? {
        println!("{output}");
      }
    }
  }

  Ok(())
}

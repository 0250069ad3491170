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
use assert_cmd::cargo;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

use serde_json::Value;

fn tour() -> Command {
  let mut cmd = Command::new(cargo::cargo_bin!("tour"));
  cmd
    .env("CLICOLOR", "0")
    .env_remove("ENV")
    .env_remove("RUST_LOG")
    .env_remove("TOUR_TRACE_FILE")
    .env_remove("TOUR_LOGGER_LEVEL")
    .env_remove("TOUR_LOGGER_FORMAT")
    .env_remove("TOUR_LOGGER_OUTPUT");
  cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
  let output = cmd.output().unwrap();
  assert!(
    output.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_parse_basic() {
  let value = stdout_json(tour().args(["parse", "basic", "-vv", "arg1", "arg2", "arg3"]));

  assert_eq!(value["verbose"], serde_json::json!([true, true]));
  assert_eq!(value["remaining"], serde_json::json!(["arg1", "arg2", "arg3"]));
}

#[test]
fn test_parse_basic_many_flags() {
  let cluster = format!("-{}", "v".repeat(300));
  let value = stdout_json(tour().args(["parse", "basic", cluster.as_str()]));

  assert_eq!(value["verbose"].as_array().unwrap().len(), 300);
}

#[test]
fn test_parse_env_uses_default_when_unset() {
  let value = stdout_json(tour().args(["parse", "env"]));
  assert_eq!(value["env"], "dev");
}

#[test]
fn test_parse_env_var_overrides_default() {
  let value = stdout_json(tour().args(["parse", "env"]).env("ENV", "prod"));
  assert_eq!(value["env"], "prod");
}

#[test]
fn test_parse_flag_overrides_env_var() {
  let value = stdout_json(tour().args(["parse", "env", "-e", "stg"]).env("ENV", "prod"));
  assert_eq!(value["env"], "stg");
}

#[test]
fn test_parse_required_missing() {
  tour()
    .args(["parse", "required"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("required arguments were not provided"))
    .stderr(predicate::str::contains("--name <NAME>"));
}

#[test]
fn test_parse_invalid_choice() {
  tour()
    .args(["parse", "choice", "--animal", "pig"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid value 'pig'"))
    .stderr(predicate::str::contains("[possible values: cat, dog]"));
}

#[test]
fn test_parse_call_runs_callback() {
  tour()
    .args(["parse", "call", "-c", "000-0000-0000"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r#"{"call_log":"call...000-0000-0000"}"#));
}

#[test]
fn test_parse_str_int_map() {
  let value = stdout_json(tour().args(["parse", "str-int-map", "--strintmap", "a:1", "--strintmap", "b:2"]));
  assert_eq!(value["str_int_map"], serde_json::json!({"a": 1, "b": 2}));
}

#[test]
fn test_log_production_json() {
  let output = tour().args(["log", "--repeat", "2"]).output().unwrap();
  assert!(output.status.success());

  let stdout = String::from_utf8(output.stdout).unwrap();
  let records: Vec<Value> = stdout
    .lines()
    .map(|line| serde_json::from_str(line).unwrap())
    .collect();

  assert_eq!(records.len(), 2);
  assert_eq!(records[0]["message"], "failed to fetch URL");
  assert_eq!(records[0]["attempt"], 1);
  assert_eq!(records[1]["attempt"], 2);
  assert_eq!(records[1]["backoff"], "1s");
}

#[test]
fn test_log_sugared_to_file() {
  let temp = tempdir().unwrap();
  let path = temp.path().join("sugared.log");

  tour()
    .args(["log", "--sugared"])
    .arg("--output")
    .arg(&path)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let content = fs::read_to_string(&path).unwrap();
  let record: Value = serde_json::from_str(content.trim()).unwrap();
  let context: Value = serde_json::from_str(record["context"].as_str().unwrap()).unwrap();
  assert_eq!(context["attempt"], 1);
  assert_eq!(context["url"], "http://locallhost:oooo/");
}

#[test]
fn test_log_level_from_env_filters_records() {
  tour()
    .args(["log"])
    .env("TOUR_LOGGER_LEVEL", "error")
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[test]
fn test_log_unknown_level_word() {
  tour()
    .args(["log", "--level", "verbose"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid log level 'verbose'"))
    .stdout(predicate::str::is_empty());
}

#[test]
fn test_log_unknown_level_word_from_env() {
  tour()
    .args(["log"])
    .env("TOUR_LOGGER_LEVEL", "infoo")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid log level 'infoo'"));
}

#[test]
fn test_log_malformed_directive() {
  tour()
    .args(["log", "--level", "toolkit_tour=loud"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid log directive"));
}

#[test]
fn test_double() {
  tour()
    .args(["double", "ab", "xy"])
    .assert()
    .success()
    .stdout("abab\nxyxy\n");
}

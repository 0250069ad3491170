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

//! Soft assertions.
//!
//! `assert_eq!` aborts the test at the first mismatch. [`SoftAssert`] keeps
//! going: each check returns `bool`, failures pile up, and
//! [`SoftAssert::finish`] reports all of them at once.
//!
//! ```
//! use toolkit_tour::assert::SoftAssert;
//!
//! let mut a = SoftAssert::new();
//! a.equal(1, 1);
//! a.equal(2, 2);
//! a.equal(3, 3);
//! assert!(a.finish().is_ok());
//! ```

use crate::error::AssertionError;
use std::fmt::Debug;
use std::fmt::Display;
use std::panic::Location;

#[derive(Debug, Default)]
pub struct SoftAssert {
  failures: Vec<String>,
}

impl SoftAssert {
  pub fn new() -> Self {
    Self::default()
  }

  #[track_caller]
  pub fn equal<T: PartialEq + Debug>(&mut self, expected: T, actual: T) -> bool {
    let ok = expected == actual;
    if !ok {
      self.fail(format!("not equal:\n  expected: {expected:?}\n  actual:   {actual:?}"));
    }
    ok
  }

  #[track_caller]
  pub fn not_equal<T: PartialEq + Debug>(&mut self, unexpected: T, actual: T) -> bool {
    let ok = unexpected != actual;
    if !ok {
      self.fail(format!("should not be: {actual:?}"));
    }
    ok
  }

  #[track_caller]
  pub fn is_true(&mut self, value: bool) -> bool {
    if !value {
      self.fail("should be true".to_string());
    }
    value
  }

  #[track_caller]
  pub fn is_false(&mut self, value: bool) -> bool {
    if value {
      self.fail("should be false".to_string());
    }
    !value
  }

  #[track_caller]
  pub fn is_ok<T, E: Display>(&mut self, result: &Result<T, E>) -> bool {
    match result {
      Ok(_) => true,
      Err(e) => {
        self.fail(format!("unexpected error: {e}"));
        false
      }
    }
  }

  #[track_caller]
  pub fn is_err<T: Debug, E>(&mut self, result: &Result<T, E>) -> bool {
    match result {
      Ok(value) => {
        self.fail(format!("expected an error, got Ok({value:?})"));
        false
      }
      Err(_) => true,
    }
  }

  #[track_caller]
  pub fn contains(&mut self, haystack: &str, needle: &str) -> bool {
    let ok = haystack.contains(needle);
    if !ok {
      self.fail(format!("{haystack:?} does not contain {needle:?}"));
    }
    ok
  }

  pub fn failures(&self) -> &[String] {
    &self.failures
  }

  pub fn is_clean(&self) -> bool {
    self.failures.is_empty()
  }

  pub fn finish(self) -> Result<(), AssertionError> {
    if self.failures.is_empty() {
      return Ok(());
    }
    Err(AssertionError {
      failures: self.failures,
    })
  }

  #[track_caller]
  fn fail(&mut self, message: String) {
    let location = Location::caller();
    self
      .failures
      .push(format!("{}:{}: {}", location.file(), location.line(), message));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_checks_return_bool_and_keep_going() {
    let mut a = SoftAssert::new();

    assert!(a.equal(1, 1));
    assert!(!a.equal("x", "y"));
    assert!(a.not_equal(1, 2));
    assert!(!a.is_true(false));
    assert!(a.is_false(false));

    assert_eq!(a.failures().len(), 2);
    assert!(!a.is_clean());
  }

  #[test]
  fn test_failure_points_at_caller() {
    let mut a = SoftAssert::new();
    let line = line!() + 1;
    a.equal(1, 2);

    let failure = &a.failures()[0];
    assert!(failure.starts_with(&format!("{}:{}:", file!(), line)), "{failure}");
    assert!(failure.contains("expected: 1"));
    assert!(failure.contains("actual:   2"));
  }

  #[test]
  fn test_result_checks() {
    let mut a = SoftAssert::new();
    let ok: Result<u8, String> = Ok(1);
    let err: Result<u8, String> = Err("boom".to_string());

    assert!(a.is_ok(&ok));
    assert!(a.is_err(&err));
    assert!(!a.is_ok(&err));
    assert!(!a.is_err(&ok));

    let report = a.finish().unwrap_err();
    assert_eq!(report.failures.len(), 2);
    assert!(report.to_string().starts_with("2 assertion(s) failed:"));
    assert!(report.to_string().contains("unexpected error: boom"));
  }

  #[test]
  fn test_contains() {
    let mut a = SoftAssert::new();
    assert!(a.contains("failed to fetch URL", "fetch"));
    assert!(!a.contains("failed to fetch URL", "store"));
  }
}

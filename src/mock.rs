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

//! Per-method test doubles.
//!
//! A [`MethodMock`] stands in for one method of an interface. Expectations
//! map an argument value to a canned return value; every invocation is
//! recorded so it can be asserted on afterwards.
//!
//! ```
//! use toolkit_tour::mock::MethodMock;
//!
//! let mock: MethodMock<String, usize> = MethodMock::new("len");
//! mock.on("abc".to_string()).returns(3);
//!
//! assert_eq!(mock.call("abc".to_string()), Ok(3));
//! assert!(mock.call("zz".to_string()).is_err());
//! assert_eq!(mock.call_count(), 2);
//! ```

use crate::error::MockError;
use parking_lot::RwLock;
use std::fmt::Debug;

struct Expectation<A, R> {
  args: A,
  returns: R,
  times: Option<usize>,
  hits: usize,
}

impl<A, R> Expectation<A, R> {
  fn exhausted(&self) -> bool {
    self.times.is_some_and(|times| self.hits >= times)
  }

  fn unmet(&self) -> bool {
    match self.times {
      Some(times) => self.hits < times,
      None => self.hits == 0,
    }
  }
}

/// Test double for a single method taking `A` and returning `R`.
pub struct MethodMock<A, R> {
  method: &'static str,
  expectations: RwLock<Vec<Expectation<A, R>>>,
  calls: RwLock<Vec<A>>,
}

impl<A, R> MethodMock<A, R>
where
  A: PartialEq + Clone + Debug,
  R: Clone,
{
  pub fn new(method: &'static str) -> Self {
    Self {
      method,
      expectations: RwLock::new(Vec::new()),
      calls: RwLock::new(Vec::new()),
    }
  }

  /// Starts an expectation for calls with exactly `args`.
  pub fn on(&self, args: A) -> ExpectationBuilder<'_, A, R> {
    ExpectationBuilder {
      mock: self,
      args,
      times: None,
    }
  }

  /// Records the call and answers from the first matching expectation that
  /// still has calls left.
  pub fn call(&self, args: A) -> Result<R, MockError> {
    self.calls.write().push(args.clone());

    let mut expectations = self.expectations.write();
    let mut matched_times = None;

    for expectation in expectations.iter_mut().filter(|e| e.args == args) {
      if expectation.exhausted() {
        matched_times = expectation.times;
        continue;
      }
      expectation.hits += 1;
      return Ok(expectation.returns.clone());
    }

    let err = match matched_times {
      Some(times) => MockError::ExhaustedExpectation {
        method: self.method,
        args: format!("{args:?}"),
        times,
      },
      None => MockError::UnexpectedCall {
        method: self.method,
        args: format!("{args:?}"),
      },
    };
    tracing::debug!(error = %err, "mock call rejected");
    Err(err)
  }

  /// Every recorded call, in order.
  pub fn calls(&self) -> Vec<A> {
    self.calls.read().clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.read().len()
  }

  pub fn was_called_with(&self, args: &A) -> bool {
    self.calls.read().iter().any(|call| call == args)
  }

  pub fn assert_number_of_calls(&self, expected: usize) -> Result<(), MockError> {
    let actual = self.call_count();
    if actual != expected {
      return Err(MockError::CallCountMismatch {
        method: self.method,
        expected,
        actual,
      });
    }
    Ok(())
  }

  pub fn assert_not_called(&self) -> Result<(), MockError> {
    self.assert_number_of_calls(0)
  }

  pub fn assert_called_with(&self, args: &A) -> Result<(), MockError> {
    if self.was_called_with(args) {
      return Ok(());
    }
    Err(MockError::NotCalledWith {
      method: self.method,
      args: format!("{args:?}"),
      recorded: format!("{:?}", *self.calls.read()),
    })
  }

  /// Checks that every expectation was used: at least once, or exactly its
  /// `times` budget when one was set.
  pub fn assert_expectations(&self) -> Result<(), MockError> {
    let unmet: Vec<String> = self
      .expectations
      .read()
      .iter()
      .filter(|e| e.unmet())
      .map(|e| match e.times {
        Some(times) => format!("{:?} ({} of {} call(s))", e.args, e.hits, times),
        None => format!("{:?} (never called)", e.args),
      })
      .collect();

    if unmet.is_empty() {
      return Ok(());
    }
    Err(MockError::UnmetExpectations {
      method: self.method,
      unmet: unmet.join(", "),
    })
  }

  /// Forgets recorded calls and expectation hits; expectations stay.
  pub fn reset_calls(&self) {
    self.calls.write().clear();
    for expectation in self.expectations.write().iter_mut() {
      expectation.hits = 0;
    }
  }
}

/// Pending expectation; finished by [`ExpectationBuilder::returns`].
pub struct ExpectationBuilder<'a, A, R> {
  mock: &'a MethodMock<A, R>,
  args: A,
  times: Option<usize>,
}

impl<A, R> ExpectationBuilder<'_, A, R> {
  /// Limits the expectation to `n` calls.
  pub fn times(mut self, n: usize) -> Self {
    self.times = Some(n);
    self
  }

  pub fn once(self) -> Self {
    self.times(1)
  }

  pub fn returns(self, value: R) {
    self.mock.expectations.write().push(Expectation {
      args: self.args,
      returns: value,
      times: self.times,
      hits: 0,
    });
  }
}

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
use crate::error::DoerError;
use crate::mock::MethodMock;

/// The two-method interface that the mocking tour stubs out.
pub trait Doer {
  fn do_something(&self, input: &str) -> Result<String, DoerError>;

  fn close(&self) -> Result<(), DoerError>;
}

/// Real implementation: repeats its input twice.
#[derive(Debug, Default, Clone, Copy)]
pub struct Doubler;

impl Doer for Doubler {
  fn do_something(&self, input: &str) -> Result<String, DoerError> {
    Ok(format!("{input}{input}"))
  }

  fn close(&self) -> Result<(), DoerError> {
    Ok(())
  }
}

/// Mock implementation. Configure each method through its public field.
pub struct MockDoer {
  pub do_something: MethodMock<String, Result<String, DoerError>>,
  pub close: MethodMock<(), Result<(), DoerError>>,
}

impl MockDoer {
  pub fn new() -> Self {
    Self {
      do_something: MethodMock::new("do_something"),
      close: MethodMock::new("close"),
    }
  }
}

impl Default for MockDoer {
  fn default() -> Self {
    Self::new()
  }
}

impl Doer for MockDoer {
  fn do_something(&self, input: &str) -> Result<String, DoerError> {
    self.do_something.call(input.to_string())?
  }

  fn close(&self) -> Result<(), DoerError> {
    self.close.call(())?
  }
}

/// Runs every input through `doer` in order, then closes it once.
/// Stops at the first error without closing.
pub fn process_all(doer: &dyn Doer, inputs: &[&str]) -> Result<Vec<String>, DoerError> {
  let outputs = inputs
    .iter()
    .map(|input| doer.do_something(input))
    .collect::<Result<Vec<_>, _>>()?;

  doer.close()?;
  tracing::debug!(count = outputs.len(), "processed inputs");

  Ok(outputs)
}

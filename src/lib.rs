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

//! # Toolkit Tour
//!
//! `toolkit-tour` is a set of small, independent demonstrations of three
//! everyday concerns: parsing command-line options, emitting structured
//! logs, and testing against doubles. None of the demonstrations depend on
//! each other.
//!
//! ## Modules
//!
//! * [`args`]: Option schemas (defaults, env overrides, repeatable flags,
//!   callbacks, required options, enumerated choices, maps) and `parse`.
//! * [`logger`]: A self-contained JSON/console `Logger` with a typed and a
//!   sugared key/value interface.
//! * [`config`]: `LoggerConfig`, layered from presets, env vars and CLI flags.
//! * [`mock`]: `MethodMock`, a recording per-method test double.
//! * [`doer`]: The two-method `Doer` interface, its real and mock versions.
//! * [`assert`]: `SoftAssert`, assertions that return `bool` and report later.
//! * [`cli`]: Defines the `clap`-based command-line interface of `tour`.
//! * [`error`]: Defines the custom error types for the library.
//! * [`logging`]: Provides the `setup_tracing` utility.

pub mod args;
pub mod assert;
pub mod cli;
pub mod config;
pub mod doer;
pub mod error;
pub mod logger;
pub mod logging;
pub mod mock;

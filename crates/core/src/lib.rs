// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notice transitions for each actor.
//!
//! The [`server`], [`kitchen`] and [`diner`] modules expose one function
//! per action. Each takes the current notice by reference and returns a
//! new one; a refused action returns an error and produces nothing.
//! [`apply`] dispatches a [`Command`] to the right function.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
pub mod diner;
mod error;
pub mod kitchen;
pub mod server;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::TransitionResult;

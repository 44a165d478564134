//! Testing infrastructure for jobinfo tests.
//!
//! This crate provides utilities for writing robust tests:
//! - `ScriptedRunner`: in-memory command runner with canned scheduler output
//! - `fixtures`: accounting and live-statistics lines for common job shapes
//! - `TestWorld`: fake scheduler commands on disk for end-to-end CLI runs
//! - `assertions`: report-level assertions

pub mod assertions;
pub mod fixtures;
pub mod runner;
pub mod world;

pub use runner::{Invocation, ScriptedRunner};
pub use world::{CliResult, TestWorld};

//! Mediaprep - static site media preparation
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod engine;
pub mod jobs;

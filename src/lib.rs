//! stepline - keyboard-driven stepper widget for ratatui
//!
//! The library exports the stepper controller and its demo plumbing
//! (configuration, logging, steps files) for the `stepline` binary.

pub mod app;
pub mod config;
pub mod logging;
pub mod steps;
pub mod ui;

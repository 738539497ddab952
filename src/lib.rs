//! Campies
//!
//! Finds the Apple BootCamp Windows driver package for a Mac model and
//! turns a downloaded package into a plain ZIP of the driver tree.
//!
//! This crate provides the core implementation for the `campies` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! campies find
//! campies build ~/Downloads/BootCampESD.pkg
//! ```

pub mod catalog;
pub mod commands;
pub mod hardware;
pub mod output;
pub mod package;
pub mod runner;
pub mod utils;

//! Core types, configuration, and errors for roledoc.
//!
//! This crate provides the foundational types shared by the role
//! introspector, the document renderer, and the command-line driver.
//!
//! # Architecture
//!
//! The core consists of:
//! - Error taxonomy with recoverable [`Diagnostic`]s
//! - Strong domain types ([`RoleName`])
//! - CLI-facing types ([`cli::DocFormat`], [`cli::ExitCode`])
//! - Run configuration ([`GenerateConfig`])

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;

pub use config::GenerateConfig;
pub use error::{Diagnostic, Error, Result};
pub use types::RoleName;

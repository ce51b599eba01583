//! Role document rendering.
//!
//! Turns the output of `roledoc-introspector` into a Markdown or plain-text
//! document using Handlebars templates compiled into the crate.
//!
//! Documents always have the same section order: title, description, general
//! information, default variables, variables, tasks, other task files,
//! handlers, templates, role structure, and dependencies. Sections with
//! nothing to show are omitted; sections whose source file is malformed read
//! `(unavailable)`.
//!
//! # Examples
//!
//! ```no_run
//! use roledoc_core::cli::DocFormat;
//! use roledoc_introspector::inspect_role;
//! use roledoc_render::DocumentRenderer;
//!
//! let role = inspect_role("roles/msxml")?;
//! let document = DocumentRenderer::new()?.render_inspection(&role, DocFormat::Text)?;
//! println!("{document}");
//! # Ok::<(), roledoc_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod context;
pub mod renderer;
pub mod template_engine;
pub mod tree;

pub use context::DocumentContext;
pub use renderer::{DocumentRenderer, RenderedDocument};
pub use template_engine::TemplateEngine;
pub use tree::render_tree;

//! # boardhub
//!
//! A small JSON API for managing boards.
//!
//! Every endpoint returns a `{status, ...}` envelope; create and update run
//! the submitted fields through a Laravel-style ruleset and report every
//! violation at once. The CRUD surface itself is generic: a record type
//! implements [`resource::Resource`] (envelope names, rulesets, id plumbing)
//! and gets the five handlers and an in-memory store for free.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use boardhub::modules::board::Board;
//! use boardhub::resource::{self, InMemoryRepository, Repository};
//! use axum::Router;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let repo: Arc<dyn Repository<Board>> = Arc::new(InMemoryRepository::new());
//!     let app = Router::new().nest("/boards", resource::router::<Board>(repo));
//!
//!     // Serve your app...
//! }
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod modules;
pub mod resource;
pub mod validation;

// Re-export core types
pub use common::Envelope;
pub use error::{ApiError, Result};

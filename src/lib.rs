//! Bootstrap and discovery for git repositories stored on the local file system.
//!
//! This crate finds an existing repository by walking upward from a
//! directory, validates its `config`, and creates the on-disk skeleton of
//! a new, empty repository. Everything else (objects, refs, the index)
//! is expected to locate its files through the [`repo::Repository`]
//! handle produced here.

pub mod config;
pub mod repo;

pub use config::Config;
pub use repo::{Error, Repository, Result};

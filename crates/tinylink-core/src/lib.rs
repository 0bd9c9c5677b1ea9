//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the error taxonomy and the data-access contract
//! shared by the storage backends and the process entry point.

pub mod error;
pub mod repository;

pub use error::{Result, StorageError};
pub use repository::UrlRepository;

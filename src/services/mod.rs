//! External service interactions
//!
//! This module contains services for interacting with systems outside the
//! UI:
//! - Task list persistence on disk

pub mod store;

pub use store::Store;

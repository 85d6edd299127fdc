//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Scripted models standing in for trained recognizers
//! - Sample documents
//! - Custom assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;

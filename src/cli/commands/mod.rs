//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod init;
pub mod status;
pub mod sync;
pub mod validate;

//! Figma REST API adapter
//!
//! This module provides access to the Figma REST API through the [`FigmaApi`]
//! trait and its production implementation [`FigmaClient`].
//!
//! Three operations cover everything the sync pipeline needs:
//! - resolving a node and its children ([`FigmaApi::get_document`])
//! - requesting rendered PNG URLs for a batch of nodes
//!   ([`FigmaApi::get_image_urls`])
//! - downloading rendered bytes ([`FigmaApi::download_image`])

pub mod client;
pub mod models;
mod r#trait;

pub use client::FigmaClient;
pub use r#trait::FigmaApi;

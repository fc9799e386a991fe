//! State management module
//!
//! This module handles all application state, including:
//! - Project descriptors and filters (data.rs)
//! - Loading the project catalog from the site directory (catalog.rs)
//! - The project detail panel (detail.rs)
//! - The image lightbox state machine (lightbox.rs)

pub mod catalog;
pub mod data;
pub mod detail;
pub mod lightbox;

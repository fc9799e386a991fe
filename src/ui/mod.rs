//! View layer: one module per screen region
pub mod detail;
pub mod gallery;
pub mod lightbox;

/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Projector site construction
//!
//! Builds the sparse real-space representation of every atom's projector
//! functions on the global FFT grid.

pub mod errors;
pub mod site;

pub use errors::{ProjectorError, Result};
pub use site::{
    build_projector_sites, tightened_cutoff, ProjectorMode, ProjectorSite, SiteProjector,
};

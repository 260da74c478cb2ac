/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Pseudo-wavefunction data model consumed by the PAW core

pub mod errors;
pub mod states;

pub use errors::{Result, WavefunctionError};
pub use states::{AtomSite, Band, KPoint, PseudoWavefunction, StateIndex};

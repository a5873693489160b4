//! # Asteroid Rules
//!
//! The rules crate for the asteroid mining simulation - entities, hazards,
//! construction, and the command registry that drives them.
//! This crate is the single source of truth for simulation state and does not
//! contain any rendering or input parsing.

pub mod commands;
pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod world_state;

pub use commands::*;
pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use world_state::*;

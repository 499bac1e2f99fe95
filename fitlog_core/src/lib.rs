#![forbid(unsafe_code)]

//! Core domain model and engine for the fitlog workout tracker.
//!
//! This crate provides:
//! - Domain types (workouts, exercises, reminders, weekly goal)
//! - Calorie estimation
//! - Persistence gateway over JSON documents
//! - Workout and reminder stores with id assignment
//! - Statistics and weekly progress rollups
//! - CSV export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod timestamp;
pub mod calories;
pub mod collection;
pub mod gateway;
pub mod workouts;
pub mod reminders;
pub mod goals;
pub mod stats;
pub mod tracker;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use collection::{Collection, IdStrategy};
pub use gateway::{Gateway, JsonFileGateway, MemoryGateway};
pub use calories::estimate as estimate_calories;
pub use export::export_workouts;
pub use tracker::Tracker;

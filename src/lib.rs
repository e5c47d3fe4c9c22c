//! Library exports for the tutorials service
//!
//! The binary in `main.rs` wires these together; tests use them directly.

pub mod category;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handler;
pub mod migrate;
pub mod model;
pub mod route;
pub mod seed;
pub mod state;
pub mod weather;

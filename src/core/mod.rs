//! The sampling-and-decision engine

pub mod config;
pub mod memory;
pub mod monitor;
pub mod process;
pub mod selector;

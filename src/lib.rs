pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Domain data shapes shared across layers
pub mod domain;

pub mod pipeline;

// Application use cases and their infrastructure adapters
pub mod app;
pub mod infra;

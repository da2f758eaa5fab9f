pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod web;

pub use error::{Error, Result};

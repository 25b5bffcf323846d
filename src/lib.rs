// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;

pub mod record;
pub mod table;

pub mod extract;
pub mod file;
pub mod pipeline;
pub mod progress;
pub mod transform;

pub mod chart;
pub mod chart_png;
pub mod board;
pub mod query;
pub mod series;
pub mod stats;
pub mod store;

pub mod gui;

pub use error::{Error, Result, Stage};

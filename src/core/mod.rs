// src/core/mod.rs

pub mod dates;
pub mod numbers;
pub mod sanitize;
pub mod wildcard;

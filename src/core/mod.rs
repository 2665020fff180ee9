// src/core/mod.rs

pub mod encoding;
pub mod engine;
pub mod queue;
pub mod sanitizer;
pub mod types;

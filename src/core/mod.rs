// src/core/mod.rs

pub mod clock;
pub mod sanitize;

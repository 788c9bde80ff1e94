// src/lib.rs

pub mod api;
pub mod classifier;
pub mod config;
pub mod llm;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod state;

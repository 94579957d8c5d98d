// src/lib.rs
pub mod checks;
pub mod config;
pub mod runner;

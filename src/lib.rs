// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;

pub mod arrival;
pub mod browser;
pub mod csv;
pub mod fetch;
pub mod file;
pub mod finalize;
pub mod janitor;
pub mod period;
pub mod progress;
pub mod runner;

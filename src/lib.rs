// src/lib.rs

//! gol.gg Match Crawler Library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

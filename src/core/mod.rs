//! Configuration and shared response models

pub mod config;
pub mod models;

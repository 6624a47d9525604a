//! Request-level orchestration: configuration, template selection and the entry point.

pub mod config;
pub mod emotion;
pub mod sketchbook;

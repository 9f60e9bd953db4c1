// Multi-condition comparison: independent runs reduced to shared keywords.

pub mod common;
pub mod engine;

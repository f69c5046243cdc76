//! seo-outline: SEO content brief generation
//!
//! Turns keyword research and competitive-analysis inputs into a structured
//! content brief. A model call generates the brief, a schema validator enforces
//! its shape, and fallback recovery guarantees that every run ends with a
//! usable outline.

pub mod brief;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod provider;
pub mod research;
pub mod state;
pub mod strategy;

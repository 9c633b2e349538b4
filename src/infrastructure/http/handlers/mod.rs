//! HTTP Handlers

mod demo;
mod health;

pub use demo::*;
pub use health::*;

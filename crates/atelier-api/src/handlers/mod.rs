//! HTTP request handlers.

pub mod describe;

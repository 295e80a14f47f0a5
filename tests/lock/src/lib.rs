//! Shared fixtures for the Permafrost acceptance tests.

#![forbid(unsafe_code)]

pub mod graph_fixtures;

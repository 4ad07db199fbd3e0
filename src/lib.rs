// Drill engine library. The terminal front-end in main.rs is one consumer;
// benches and integration tests are the others.

pub mod config;
pub mod data;
pub mod engine;
pub mod logging;
pub mod session;

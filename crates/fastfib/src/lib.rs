//! FastFib library: the public facade and the command-line application logic.

pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod output;

pub use api::{
    digit_count, fibonacci, fibonacci_pair, fibonacci_range, fibonacci_range_with,
    set_worker_count, staircase_ways, worker_count,
};

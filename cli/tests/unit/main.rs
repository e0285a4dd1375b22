//! Unit tests for modelhub CLI
//!
//! These tests use hand-written port doubles and run fast without external
//! I/O. Polling tests pause the tokio clock.

mod architecture;
mod job_poller;
mod mocks;

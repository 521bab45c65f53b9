//! Common test utilities and helpers
//!
//! Integration tests never touch the network: npm and node are replaced by
//! small shell scripts written into a temporary directory and passed to the
//! binary through `--npm` and `--node`.

pub mod fixtures;

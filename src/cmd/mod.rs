//! Command handlers for the modclean-benchmark CLI
//!
//! Presentation only: progress spinners, the banner and the printed report.
//! The benchmark itself lives in [`crate::runner`].

/// The benchmark command
pub mod benchmark;
/// Spinner progress display
pub mod spinner;

pub use benchmark::cmd_benchmark;
pub use spinner::SpinnerObserver;

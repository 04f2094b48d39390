//! Test-support utilities for `rb-forest`.

pub mod fuzzer;

pub use fuzzer::Fuzzer;

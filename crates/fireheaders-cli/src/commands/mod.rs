//! Command implementations for fireheaders-cli

pub mod convert;

pub use convert::run_convert;

//! Command implementations

pub mod init;
pub mod run;
pub mod run_once;
pub mod validate;

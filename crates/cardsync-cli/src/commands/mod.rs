pub mod checksum;
pub mod common;
pub mod compare;
pub mod completions;
pub mod config;
pub mod queue;
pub mod resolve;
pub mod status;

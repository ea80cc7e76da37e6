pub mod components;
pub mod config;
pub mod execution;
pub mod memory;
pub mod pointer;
pub mod types;

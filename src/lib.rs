#![forbid(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod logging;
pub mod policy;
pub mod version;

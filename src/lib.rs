pub mod catalog;
pub mod generator;
pub mod record;
pub mod weighted;

pub mod error;
pub mod sink;
pub mod kafka;
pub mod noop_sink;
pub mod stdout_sink;

pub mod cli;
pub mod config;
pub mod env;
pub mod init;
pub mod producer;

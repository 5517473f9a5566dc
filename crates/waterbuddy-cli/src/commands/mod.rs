pub mod catalog;
pub mod config;
pub mod render;
pub mod shell;
pub mod tip;

//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - joke: fetch a joke, or save/list/delete saved jokes
//! - config init/path/get/set: manage the key-value config file
pub mod config;
pub mod joke;

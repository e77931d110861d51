//! Input reading for the CLI.
//!
//! Files below 1MB are read directly; larger ones are memory-mapped.
//! Standard input is used when no file is given.

pub mod reader;

pub use reader::{FileReader, read_file, read_input};

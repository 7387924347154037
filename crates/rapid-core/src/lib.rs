pub mod config;
pub mod detect;
pub mod error;
pub mod io;
pub mod paths;
pub mod scripts;
pub mod types;
pub mod workflow;

pub use error::{RapidError, Result};

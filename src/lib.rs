pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod reporting;
pub mod utils;

pub use error::{ProcessingError, Rejection, RejectionKind, RejectionReason, Result};

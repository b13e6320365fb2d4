// Library interface for the binary and integration tests

pub mod config;
pub mod context;
pub mod document;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod types;

pub use config::Config;
pub use document::Document;
pub use report::{build, Pass, Report};
pub use types::{BalanceExtreme, BracketPair, Position, UnmatchedBracket};

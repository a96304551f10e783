//! autoposter adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `llm`: Content generators (Gemini, stub)
//! - `blogger`: Blogger API publisher
//! - `reddit`: Reddit API publisher
//! - `posted_log`: JSON file posted log

pub mod blogger;
pub mod llm;
mod posted_log;
pub mod reddit;

/// Re-exports for posted log adapters
pub mod state {
    pub use crate::posted_log::JsonFilePostedLog;
}

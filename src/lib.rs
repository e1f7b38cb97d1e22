//! TWD Exchange-Rate Bot
//!
//! A LINE webhook responder that:
//! - Interprets inbound text as currency-exchange queries against TWD
//! - Parses free-form amount + currency input (both orderings, Chinese
//!   names and ISO-style codes)
//! - Fetches live rates from an external API and replies with a formatted
//!   conversion
//! - Provisions a fixed 6-cell rich menu at startup
//!
//! FLOW:
//! WEBHOOK → VERIFY SIGNATURE → PARSE TEXT → FETCH RATES → REPLY

pub mod api;
pub mod config;
pub mod currency;
pub mod error;
pub mod line;
pub mod parser;
pub mod rates;
pub mod reply;

pub use error::Result;

// Re-export common types
pub use parser::{parse, ParseResult};
pub use rates::{RateClient, RateTable};

//! Portfolio Recommendation Fulfillment
//!
//! Dialog management and fulfillment callback for a bot intent that
//! recommends a bond/equity split from the user's age, investment amount
//! and risk tolerance.
//!
//! FLOW:
//! DISPATCH → DIALOG → {VALIDATE, RECOMMEND} → RESPOND

pub mod config;
pub mod dialog;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod recommendation;
pub mod response;
pub mod validation;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use dispatcher::{create_default_dispatcher, dispatch, Dispatcher, IntentHandler};

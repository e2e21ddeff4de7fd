//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the bot. Handler
//! decisions are factored into plain functions over a database connection,
//! so integration tests can exercise the command flows without Telegram I/O.

pub mod callbacks;
pub mod commands;
mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};

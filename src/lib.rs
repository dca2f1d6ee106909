//! Daily logging for money, work hours, and stress, with streaks, trends, and summaries.
//!
//! A user records one entry per calendar day. The statistics engine turns a
//! user's entries into three views:
//!
//! | View | Input | Output |
//! |------|-------|--------|
//! | **Summary** | Entries in a date range | Totals, net income, averages |
//! | **Trends** | Entries in a range + metric name | Date-ordered `(date, value)` points |
//! | **Streak** | Full history + today | Current and longest consecutive-day runs |
//!
//! The engine is pure: it never reads the clock or the database. Callers fetch
//! entries through [`entries::EntrySource`] and pass `today` in.
//!
//! # Architecture
//!
//! - **Storage**: SQLite via `rusqlite`, amounts kept as exact decimal text
//! - **Transport**: JSON over HTTP (`axum`) behind HS256 bearer tokens, plus a CLI
//! - **Feedback**: a motivational note per saved entry, from a local rule set or
//!   an OpenAI-compatible endpoint
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite database initialization, schema, and health checks
//! - [`entries`]: Entry record, validation, and the entry store
//! - [`stats`]: Summary, trend, and streak computation
//! - [`range`]: Date parsing and inclusive date ranges
//! - [`auth`]: Users and JWT bearer tokens
//! - [`feedback`]: Feedback providers
//! - [`api`] / [`server`]: HTTP handlers and server startup
//! - [`cli`]: Terminal commands

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod entries;
pub mod error;
pub mod feedback;
pub mod range;
pub mod server;
pub mod stats;

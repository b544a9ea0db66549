//! Terminal SQL client for SQLite and PostgreSQL.
//!
//! [`db::Registry`] owns every open session by name and is the only way the
//! UI reaches a database.

pub mod app;
pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod ui;
pub mod vim;

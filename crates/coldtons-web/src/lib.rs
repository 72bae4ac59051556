//! coldtons-web: HTTP API for the ColDToNs frontend.
//! Provides:
//!   - Health check and static menu configuration
//!   - ATNF pulsar catalogue queries and file downloads
//!   - NICER observation availability and lookups

pub mod router;
pub mod handlers;
pub mod state;
pub mod error;

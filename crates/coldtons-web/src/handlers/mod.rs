//! HTTP handlers for all API routes.

pub mod system;
pub mod menu;
pub mod atnf;
pub mod nicer;

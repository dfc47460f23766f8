//! Domain layer for the Kakehashi backend.
//!
//! This crate contains:
//! - Domain models (Profile, SiteSetting, ContentBlock, ThemeVar, ...)
//! - Pure domain services (route access table, theme scope merge)
//! - Domain error types

pub mod models;
pub mod services;

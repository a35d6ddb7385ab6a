//! Casting Bot — talent registration over a Telegram webhook, plus the
//! agency job posting API.

pub mod channels;
pub mod config;
pub mod error;
pub mod jobs;
pub mod registration;
pub mod store;

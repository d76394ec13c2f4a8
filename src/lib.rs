//! An unofficial interface to the Canvas LMS REST API.
//!
//! Create a [`Client`] with an OAuth2 access token (see the [`auth`] module
//! for how to get one), then use its methods to fetch [`Course`]s, [`User`]s
//! and [`Assignment`]s.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod auth;
mod client;
pub mod endpoints;
mod error;
mod loose;
mod resources;

pub use client::Client;
pub use error::{ApiError, ErrorEnvelope, ErrorMessage};
pub use loose::Loose;
pub use resources::*;

/// The default user agent to use when communicating with the Canvas server.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

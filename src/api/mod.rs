//! Gateway console API: login state, wire types, and the HTTP client.

mod auth;
mod client;
mod types;

pub(crate) use auth::AuthState;
pub(crate) use client::ConsoleClient;
pub(crate) use types::{PricingPayload, UserInfo};

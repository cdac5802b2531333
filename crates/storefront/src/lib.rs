//! Shreck storefront library.
//!
//! This crate provides the static storefront server and the client-side
//! cart/catalog controller as a library, allowing both to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assets;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

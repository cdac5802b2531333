//! Shreck Core - Storefront domain library.
//!
//! This crate holds the logic shared by every Shreck component:
//! - `storefront` - Static asset server and the storefront client controller
//! - `cli` - Command-line tools for inspecting carts and the catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! storage backends. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, categories, and prices
//! - [`cart`] - Cart state machine and its persistence codec
//! - [`catalog`] - Product catalog and the filter/sort pipeline

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartLine, CartProduct, CartTotals};
pub use catalog::{Catalog, CategoryFilter, FilterState, ProductCard, SortMode};
pub use types::*;

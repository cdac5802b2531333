//! Client-side storefront behavior.
//!
//! The page script is modeled as a single-threaded controller: user actions
//! arrive as [`Command`]s, [`Storefront::dispatch`] applies them to the cart,
//! filters, drawer, notification, and wishlist, and returns the [`Effect`]s the
//! UI must reflect. Persistence goes through [`Storage`] and time through
//! [`Clock`] so both can be swapped out in tests.

pub mod clock;
pub mod command;
pub mod controller;
pub mod countdown;
pub mod drawer;
pub mod notification;
pub mod storage;
pub mod view;
pub mod wishlist;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, Effect};
pub use controller::{ClientError, Storefront};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use view::{CartView, ProductGridView};

//! # Order
//!
//! Everything the ordering page knows about, minus the HTTP.
//!
//!
//!
//! ## Flow
//!
//! - Page loads, a [`MenuHandle`] starts loading the menu (static table or microCMS)
//! - User adds/removes items, each action produces a new [`Cart`] value
//! - User opens the checkout modal, total is shown
//! - Confirm clears the cart and hides the modal, close only hides it
//!
//!
//!
//! ## Notes
//!
//! - Cart and checkout live in a [`Session`], one per page. Never shared between pages
//! - Menu items are behind `Arc` so cart lines point at the exact item the menu handed out
//! - Remote menu failures never reach the user, the menu is just empty

pub mod cart;
pub mod checkout;
pub mod loader;
pub mod menu;
pub mod remote;
pub mod session;

pub use cart::{Cart, CartLine};
pub use checkout::Checkout;
pub use loader::{MenuHandle, MenuSource, MenuState};
pub use menu::{Menu, MenuImage, MenuItem, static_menu};
pub use remote::{CmsClient, CmsCredentials};
pub use session::Session;

//! # palisade-identity
//!
//! Identity-and-access data layer for palisade.
//!
//! The [`Manager`] owns two embedded key-value stores: the system store
//! for users, groups, and their membership relation, and the token store
//! for short-lived session tokens. It also runs the one-time
//! [`Manager::system_bootstrap`] that provisions the initial administrator
//! account and group on an empty store.

#![warn(clippy::all)]

pub mod credentials;
pub mod errors;
pub mod manager;
pub mod types;

pub use errors::{ManagerError, Result};
pub use manager::{
    BootstrapError, BootstrapOutcome, Manager, ADMIN_GROUP_NAME, ADMIN_USER_NAME,
};
pub use types::{current_timestamp, Group, Token, User, SYSTEM_USER_NAME};

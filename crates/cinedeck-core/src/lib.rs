// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Cinedeck.
//!
//! Provides the shared error type, catalog domain types, and the
//! [`CatalogStore`] trait seam used by the conversation engine, the SQLite
//! storage crate, and the HTTP gateway.

pub mod error;
pub mod traits;
pub mod types;

pub use error::CinedeckError;
pub use traits::CatalogStore;
pub use types::{ContentKind, ContentRecord, Episode, NewContent, UserId};

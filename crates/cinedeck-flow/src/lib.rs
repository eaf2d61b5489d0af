// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation state machine for catalog data collection.
//!
//! The machine itself ([`machine::handle_event`]) is a pure function;
//! sessions live in a concurrent [`store::SessionStore`] and effects are
//! executed by the [`engine::Engine`] against a [`cinedeck_core::CatalogStore`].

pub mod engine;
pub mod event;
pub mod machine;
pub mod messages;
pub mod session;
pub mod store;

pub use engine::{Engine, main_menu};
pub use event::{EditField, Event, MenuChoice, TERMINATOR};
pub use machine::{Effect, Reply, ReplyOption, Transition, handle_event};
pub use session::{Session, Step};
pub use store::SessionStore;

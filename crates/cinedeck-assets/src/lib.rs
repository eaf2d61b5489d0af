// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thumbnail asset storage for the Cinedeck catalog.

pub mod store;

pub use store::AssetStore;

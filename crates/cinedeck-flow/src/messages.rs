// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing prompt and confirmation text.
//!
//! Centralized so the machine and engine stay free of literals and tests
//! can assert on behavior without string matching.

use cinedeck_core::ContentKind;

use crate::event::TERMINATOR;

pub const MENU_TEXT: &str = "What would you like to do?";

pub const THUMBNAIL_PROMPT: &str = "Now send a thumbnail image for it.";
pub const THUMBNAIL_REPROMPT: &str =
    "That doesn't look like an image. Please send a thumbnail photo.";
pub const THUMBNAIL_FETCH_FAILED: &str =
    "I couldn't save that image. Please send the thumbnail again.";

pub const TITLE_REPROMPT: &str = "Please send the title as a text message.";

pub const EPISODE_COUNT_PROMPT: &str = "How many episodes does it have? Send a number.";
pub const EPISODE_COUNT_REPROMPT: &str = "Please send a positive whole number of episodes.";

pub const SAVE_FAILED: &str =
    "Something went wrong while saving. Please start over from the menu.";
pub const BROWSE_FAILED: &str = "Something went wrong. Please try again.";

pub const EDIT_PICK_PROMPT: &str = "Pick the content you want to edit:";
pub const EDIT_STUB: &str = "Editing isn't available yet.";
pub const EDIT_TARGET_GONE: &str = "That content no longer exists.";
pub const LIST_EMPTY: &str = "The catalog is empty.";

pub fn title_prompt(kind: ContentKind) -> String {
    match kind {
        ContentKind::Movie => "Send the title of the movie.".to_string(),
        ContentKind::Series => "Send the title of the web series.".to_string(),
    }
}

pub fn movie_links_prompt() -> String {
    format!("Send a streaming link. Send {TERMINATOR} when you have added them all.")
}

pub fn link_added(count: usize) -> String {
    format!("Link added ({count} so far). Send another or {TERMINATOR}.")
}

pub fn no_links_yet() -> String {
    format!("Add at least one streaming link before {TERMINATOR}.")
}

pub fn link_reprompt() -> String {
    format!("Please send a streaming link as text, or {TERMINATOR} to finish.")
}

pub fn episode_title_prompt(index: u32) -> String {
    format!("Send the title for episode {index}.")
}

pub fn episode_link_prompt(index: u32) -> String {
    format!("Send the streaming link for episode {index}.")
}

pub fn episode_link_reprompt(index: u32) -> String {
    format!("Please send the link for episode {index} as a text message.")
}

pub fn saved(kind: ContentKind, title: &str) -> String {
    match kind {
        ContentKind::Movie => format!("Saved movie \"{title}\"."),
        ContentKind::Series => format!("Saved web series \"{title}\"."),
    }
}

pub fn edit_submenu(title: &str) -> String {
    format!("What do you want to change on \"{title}\"?")
}

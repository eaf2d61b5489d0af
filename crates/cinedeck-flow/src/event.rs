// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound conversation events, decoupled from any chat transport.
//!
//! The transport adapter maps raw messages and callback payloads into these
//! variants; the engine never sees transport types.

/// Text command that ends movie link collection.
pub const TERMINATOR: &str = "/done";

/// One inbound chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A menu or inline-keyboard selection.
    Menu(MenuChoice),
    /// A free-text message.
    Text(String),
    /// An image attachment, already resolved to a stored asset reference
    /// by the transport adapter.
    Image { thumbnail_ref: String },
}

/// The fixed menu surface plus the browse/edit selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    AddMovie,
    AddSeries,
    EditContent,
    ListContent,
    /// A record picked from the edit selection menu.
    EditTarget(String),
    /// An edit category picked from a record's submenu.
    EditField(EditField),
}

/// Edit categories offered for a selected record. Selecting one is a
/// dead end; no edit flow continues past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Thumbnail,
    Links,
}

impl MenuChoice {
    /// Whether this choice belongs to the read-only browse/edit flow,
    /// which runs beside the collection machine and never touches sessions.
    pub fn is_browse(&self) -> bool {
        matches!(
            self,
            MenuChoice::EditContent
                | MenuChoice::ListContent
                | MenuChoice::EditTarget(_)
                | MenuChoice::EditField(_)
        )
    }

    /// Callback payload carried by an inline-keyboard button.
    pub fn encode(&self) -> String {
        match self {
            MenuChoice::AddMovie => "menu:add_movie".to_string(),
            MenuChoice::AddSeries => "menu:add_series".to_string(),
            MenuChoice::EditContent => "menu:edit".to_string(),
            MenuChoice::ListContent => "menu:list".to_string(),
            MenuChoice::EditTarget(id) => format!("edit:{id}"),
            MenuChoice::EditField(EditField::Title) => "editfield:title".to_string(),
            MenuChoice::EditField(EditField::Thumbnail) => "editfield:thumbnail".to_string(),
            MenuChoice::EditField(EditField::Links) => "editfield:links".to_string(),
        }
    }

    /// Parse a callback payload. Unknown payloads yield `None` and are
    /// dropped by the transport adapter.
    pub fn decode(data: &str) -> Option<Self> {
        match data {
            "menu:add_movie" => Some(MenuChoice::AddMovie),
            "menu:add_series" => Some(MenuChoice::AddSeries),
            "menu:edit" => Some(MenuChoice::EditContent),
            "menu:list" => Some(MenuChoice::ListContent),
            "editfield:title" => Some(MenuChoice::EditField(EditField::Title)),
            "editfield:thumbnail" => Some(MenuChoice::EditField(EditField::Thumbnail)),
            "editfield:links" => Some(MenuChoice::EditField(EditField::Links)),
            _ => data
                .strip_prefix("edit:")
                .filter(|id| !id.is_empty())
                .map(|id| MenuChoice::EditTarget(id.to_string())),
        }
    }
}

// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation state.
//!
//! Each variant carries only the fields meaningful at that step, so a
//! half-collected record cannot exist in an inconsistent shape. A session
//! exists for a user iff that user has an unfinished collection flow.

use cinedeck_core::{ContentKind, Episode};

/// Conversation state for one user, one variant per collection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// Waiting for the record title.
    Title { kind: ContentKind },
    /// Waiting for a thumbnail image.
    Thumbnail { kind: ContentKind, title: String },
    /// Movie path: collecting streaming links until the terminator.
    MovieLinks {
        title: String,
        thumbnail_ref: String,
        streaming_links: Vec<String>,
    },
    /// Series path: waiting for the episode count.
    EpisodeCount { title: String, thumbnail_ref: String },
    /// Series path: waiting for the title of episode `current_index`.
    EpisodeTitle {
        title: String,
        thumbnail_ref: String,
        episode_count: u32,
        current_index: u32,
        episodes: Vec<Episode>,
    },
    /// Series path: waiting for the link of episode `current_index`,
    /// whose title is already collected.
    EpisodeLink {
        title: String,
        thumbnail_ref: String,
        episode_count: u32,
        current_index: u32,
        pending_episode_title: String,
        episodes: Vec<Episode>,
    },
}

/// Step tags, for logging and transition assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Title,
    Thumbnail,
    MovieLinks,
    EpisodeCount,
    EpisodeTitle,
    EpisodeLink,
}

impl Session {
    pub fn step(&self) -> Step {
        match self {
            Session::Title { .. } => Step::Title,
            Session::Thumbnail { .. } => Step::Thumbnail,
            Session::MovieLinks { .. } => Step::MovieLinks,
            Session::EpisodeCount { .. } => Step::EpisodeCount,
            Session::EpisodeTitle { .. } => Step::EpisodeTitle,
            Session::EpisodeLink { .. } => Step::EpisodeLink,
        }
    }

    /// The record shape this flow is collecting.
    pub fn kind(&self) -> ContentKind {
        match self {
            Session::Title { kind } | Session::Thumbnail { kind, .. } => *kind,
            Session::MovieLinks { .. } => ContentKind::Movie,
            Session::EpisodeCount { .. }
            | Session::EpisodeTitle { .. }
            | Session::EpisodeLink { .. } => ContentKind::Series,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Step::Title => "title",
            Step::Thumbnail => "thumbnail",
            Step::MovieLinks => "movie_links",
            Step::EpisodeCount => "episode_count",
            Step::EpisodeTitle => "episode_title",
            Step::EpisodeLink => "episode_link",
        };
        f.write_str(s)
    }
}

// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types for the media catalog.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CinedeckError;

/// Identifies the chat user driving a conversation. Stringly typed so the
/// engine stays independent of any one channel's id scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The two record shapes the catalog holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Movie,
    Series,
}

/// One episode of a web series.
///
/// Episode numbers are contiguous from 1; the conversation engine guarantees
/// this ordering before a record ever reaches the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub number: u32,
    pub title: String,
    pub streaming_link: String,
}

/// A fully collected record, ready for insertion. The catalog store assigns
/// the id and creation timestamp at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContent {
    pub kind: ContentKind,
    pub title: String,
    pub thumbnail_ref: String,
    /// Populated iff `kind == Movie`, non-empty.
    #[serde(default)]
    pub streaming_links: Vec<String>,
    /// Populated iff `kind == Series`, non-empty.
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl NewContent {
    /// Checks the shape invariant: exactly one of `streaming_links` /
    /// `episodes` is populated, matching `kind`.
    pub fn validate(&self) -> Result<(), CinedeckError> {
        if self.title.trim().is_empty() {
            return Err(CinedeckError::Validation("title must not be empty".into()));
        }
        match self.kind {
            ContentKind::Movie => {
                if self.streaming_links.is_empty() {
                    return Err(CinedeckError::Validation(
                        "movie requires at least one streaming link".into(),
                    ));
                }
                if !self.episodes.is_empty() {
                    return Err(CinedeckError::Validation(
                        "movie must not carry episodes".into(),
                    ));
                }
            }
            ContentKind::Series => {
                if self.episodes.is_empty() {
                    return Err(CinedeckError::Validation(
                        "series requires at least one episode".into(),
                    ));
                }
                if !self.streaming_links.is_empty() {
                    return Err(CinedeckError::Validation(
                        "series must not carry top-level streaming links".into(),
                    ));
                }
                for (i, ep) in self.episodes.iter().enumerate() {
                    if ep.number as usize != i + 1 {
                        return Err(CinedeckError::Validation(format!(
                            "episode numbers must run 1..{}, found {} at position {}",
                            self.episodes.len(),
                            ep.number,
                            i + 1
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A persisted catalog entry. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    pub thumbnail_ref: String,
    #[serde(default)]
    pub streaming_links: Vec<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    /// RFC 3339, set at insert, immutable.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn movie() -> NewContent {
        NewContent {
            kind: ContentKind::Movie,
            title: "Test".into(),
            thumbnail_ref: "/assets/a.jpg".into(),
            streaming_links: vec!["http://a".into()],
            episodes: vec![],
        }
    }

    fn series() -> NewContent {
        NewContent {
            kind: ContentKind::Series,
            title: "S1".into(),
            thumbnail_ref: "/assets/b.jpg".into(),
            streaming_links: vec![],
            episodes: vec![
                Episode {
                    number: 1,
                    title: "Ep1".into(),
                    streaming_link: "linkA".into(),
                },
                Episode {
                    number: 2,
                    title: "Ep2".into(),
                    streaming_link: "linkB".into(),
                },
            ],
        }
    }

    #[test]
    fn content_kind_round_trips_through_strings() {
        for kind in [ContentKind::Movie, ContentKind::Series] {
            let s = kind.to_string();
            assert_eq!(ContentKind::from_str(&s).unwrap(), kind);
        }
        assert_eq!(ContentKind::Movie.to_string(), "movie");
        assert_eq!(ContentKind::Series.to_string(), "series");
    }

    #[test]
    fn content_kind_serde_matches_strum() {
        let json = serde_json::to_string(&ContentKind::Series).unwrap();
        assert_eq!(json, "\"series\"");
        let parsed: ContentKind = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(parsed, ContentKind::Movie);
    }

    #[test]
    fn valid_movie_and_series_pass() {
        assert!(movie().validate().is_ok());
        assert!(series().validate().is_ok());
    }

    #[test]
    fn movie_without_links_fails() {
        let mut m = movie();
        m.streaming_links.clear();
        assert!(m.validate().is_err());
    }

    #[test]
    fn series_without_episodes_fails() {
        let mut s = series();
        s.episodes.clear();
        assert!(s.validate().is_err());
    }

    #[test]
    fn empty_title_fails() {
        let mut m = movie();
        m.title = "   ".into();
        assert!(m.validate().is_err());
    }

    #[test]
    fn gapped_episode_numbers_fail() {
        let mut s = series();
        s.episodes[1].number = 3;
        assert!(s.validate().is_err());
    }

    #[test]
    fn cross_populated_shapes_fail() {
        let mut m = movie();
        m.episodes = series().episodes;
        assert!(m.validate().is_err());

        let mut s = series();
        s.streaming_links = vec!["http://x".into()];
        assert!(s.validate().is_err());
    }
}

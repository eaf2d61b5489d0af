// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The collection state machine.
//!
//! [`handle_event`] is a pure function from (current session, event) to a
//! [`Transition`]: the next session state plus effects to execute. No I/O
//! happens here; persistence and message delivery are carried out by the
//! engine after the transition is computed. This keeps every path through
//! the flow testable without a transport or a database.

use cinedeck_core::{ContentKind, Episode, NewContent};

use crate::event::{Event, MenuChoice, TERMINATOR};
use crate::messages;
use crate::session::Session;

/// An outbound message, optionally carrying inline selection options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub options: Vec<ReplyOption>,
}

/// One inline-keyboard button: a label shown to the user and the callback
/// payload the transport sends back when it is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOption {
    pub label: String,
    pub data: String,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }
}

/// Side effects requested by a transition, executed in order by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reply(Reply),
    /// Commit a finished record to the catalog. The session is already gone
    /// by the time this runs; a failed insert loses the collected data.
    Persist(NewContent),
}

/// Result of one event: the session to store (or `None` to delete/keep
/// absent) and the effects to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Option<Session>,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(session: Session, effects: Vec<Effect>) -> Self {
        Self {
            next: Some(session),
            effects,
        }
    }

    fn end(effects: Vec<Effect>) -> Self {
        Self {
            next: None,
            effects,
        }
    }

    fn noop() -> Self {
        Self {
            next: None,
            effects: Vec::new(),
        }
    }
}

/// Advance one user's conversation by one event.
///
/// Events arriving with no session are no-ops unless they start a flow;
/// conversations are opt-in and stateless between sessions.
pub fn handle_event(current: Option<Session>, event: Event) -> Transition {
    match current {
        None => start_flow(event),
        Some(session) => advance(session, event),
    }
}

fn start_flow(event: Event) -> Transition {
    let kind = match event {
        Event::Menu(MenuChoice::AddMovie) => ContentKind::Movie,
        Event::Menu(MenuChoice::AddSeries) => ContentKind::Series,
        _ => return Transition::noop(),
    };
    Transition::stay(
        Session::Title { kind },
        vec![Effect::Reply(Reply::text(messages::title_prompt(kind)))],
    )
}

fn advance(session: Session, event: Event) -> Transition {
    match session {
        Session::Title { kind } => on_title(kind, event),
        Session::Thumbnail { kind, title } => on_thumbnail(kind, title, event),
        Session::MovieLinks {
            title,
            thumbnail_ref,
            streaming_links,
        } => on_movie_links(title, thumbnail_ref, streaming_links, event),
        Session::EpisodeCount {
            title,
            thumbnail_ref,
        } => on_episode_count(title, thumbnail_ref, event),
        Session::EpisodeTitle {
            title,
            thumbnail_ref,
            episode_count,
            current_index,
            episodes,
        } => on_episode_title(title, thumbnail_ref, episode_count, current_index, episodes, event),
        Session::EpisodeLink {
            title,
            thumbnail_ref,
            episode_count,
            current_index,
            pending_episode_title,
            episodes,
        } => on_episode_link(
            title,
            thumbnail_ref,
            episode_count,
            current_index,
            pending_episode_title,
            episodes,
            event,
        ),
    }
}

fn on_title(kind: ContentKind, event: Event) -> Transition {
    match event {
        Event::Text(text) if !text.trim().is_empty() => Transition::stay(
            Session::Thumbnail {
                kind,
                title: text.trim().to_string(),
            },
            vec![Effect::Reply(Reply::text(messages::THUMBNAIL_PROMPT))],
        ),
        _ => Transition::stay(
            Session::Title { kind },
            vec![Effect::Reply(Reply::text(messages::TITLE_REPROMPT))],
        ),
    }
}

fn on_thumbnail(kind: ContentKind, title: String, event: Event) -> Transition {
    match event {
        Event::Image { thumbnail_ref } => match kind {
            ContentKind::Movie => Transition::stay(
                Session::MovieLinks {
                    title,
                    thumbnail_ref,
                    streaming_links: Vec::new(),
                },
                vec![Effect::Reply(Reply::text(messages::movie_links_prompt()))],
            ),
            ContentKind::Series => Transition::stay(
                Session::EpisodeCount {
                    title,
                    thumbnail_ref,
                },
                vec![Effect::Reply(Reply::text(messages::EPISODE_COUNT_PROMPT))],
            ),
        },
        _ => Transition::stay(
            Session::Thumbnail { kind, title },
            vec![Effect::Reply(Reply::text(messages::THUMBNAIL_REPROMPT))],
        ),
    }
}

fn on_movie_links(
    title: String,
    thumbnail_ref: String,
    mut streaming_links: Vec<String>,
    event: Event,
) -> Transition {
    let text = match event {
        Event::Text(text) => text,
        _ => {
            return Transition::stay(
                Session::MovieLinks {
                    title,
                    thumbnail_ref,
                    streaming_links,
                },
                vec![Effect::Reply(Reply::text(messages::link_reprompt()))],
            );
        }
    };
    let trimmed = text.trim();

    if trimmed == TERMINATOR {
        if streaming_links.is_empty() {
            return Transition::stay(
                Session::MovieLinks {
                    title,
                    thumbnail_ref,
                    streaming_links,
                },
                vec![Effect::Reply(Reply::text(messages::no_links_yet()))],
            );
        }
        return Transition::end(vec![Effect::Persist(NewContent {
            kind: ContentKind::Movie,
            title,
            thumbnail_ref,
            streaming_links,
            episodes: Vec::new(),
        })]);
    }

    if trimmed.is_empty() {
        return Transition::stay(
            Session::MovieLinks {
                title,
                thumbnail_ref,
                streaming_links,
            },
            vec![Effect::Reply(Reply::text(messages::link_reprompt()))],
        );
    }

    streaming_links.push(trimmed.to_string());
    let count = streaming_links.len();
    Transition::stay(
        Session::MovieLinks {
            title,
            thumbnail_ref,
            streaming_links,
        },
        vec![Effect::Reply(Reply::text(messages::link_added(count)))],
    )
}

fn on_episode_count(title: String, thumbnail_ref: String, event: Event) -> Transition {
    let parsed = match &event {
        Event::Text(text) => text.trim().parse::<u32>().ok().filter(|n| *n > 0),
        _ => None,
    };
    match parsed {
        Some(episode_count) => Transition::stay(
            Session::EpisodeTitle {
                title,
                thumbnail_ref,
                episode_count,
                current_index: 1,
                episodes: Vec::new(),
            },
            vec![Effect::Reply(Reply::text(messages::episode_title_prompt(1)))],
        ),
        None => Transition::stay(
            Session::EpisodeCount {
                title,
                thumbnail_ref,
            },
            vec![Effect::Reply(Reply::text(messages::EPISODE_COUNT_REPROMPT))],
        ),
    }
}

fn on_episode_title(
    title: String,
    thumbnail_ref: String,
    episode_count: u32,
    current_index: u32,
    episodes: Vec<Episode>,
    event: Event,
) -> Transition {
    match event {
        Event::Text(text) if !text.trim().is_empty() => Transition::stay(
            Session::EpisodeLink {
                title,
                thumbnail_ref,
                episode_count,
                current_index,
                pending_episode_title: text.trim().to_string(),
                episodes,
            },
            vec![Effect::Reply(Reply::text(messages::episode_link_prompt(
                current_index,
            )))],
        ),
        // Anything else falls through silently; the step is not consumed.
        _ => Transition::stay(
            Session::EpisodeTitle {
                title,
                thumbnail_ref,
                episode_count,
                current_index,
                episodes,
            },
            Vec::new(),
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn on_episode_link(
    title: String,
    thumbnail_ref: String,
    episode_count: u32,
    current_index: u32,
    pending_episode_title: String,
    mut episodes: Vec<Episode>,
    event: Event,
) -> Transition {
    let link = match &event {
        Event::Text(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => {
            return Transition::stay(
                Session::EpisodeLink {
                    title,
                    thumbnail_ref,
                    episode_count,
                    current_index,
                    pending_episode_title,
                    episodes,
                },
                vec![Effect::Reply(Reply::text(messages::episode_link_reprompt(
                    current_index,
                )))],
            );
        }
    };

    episodes.push(Episode {
        number: current_index,
        title: pending_episode_title,
        streaming_link: link,
    });

    if current_index == episode_count {
        return Transition::end(vec![Effect::Persist(NewContent {
            kind: ContentKind::Series,
            title,
            thumbnail_ref,
            streaming_links: Vec::new(),
            episodes,
        })]);
    }

    let next_index = current_index + 1;
    Transition::stay(
        Session::EpisodeTitle {
            title,
            thumbnail_ref,
            episode_count,
            current_index: next_index,
            episodes,
        },
        vec![Effect::Reply(Reply::text(messages::episode_title_prompt(
            next_index,
        )))],
    )
}

// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatch: runs the pure machine, then executes its effects.
//!
//! The engine owns the session store and a handle to the catalog. Transport
//! adapters hand it decoded events and deliver the replies it returns; it
//! is the only place collection effects touch I/O. The read-only browse and
//! edit menus live here too, beside the machine rather than inside it, since
//! they query the catalog but never hold conversation state.

use std::sync::Arc;

use tracing::{error, info};

use cinedeck_core::{CatalogStore, CinedeckError, ContentRecord, UserId};

use crate::event::{Event, MenuChoice};
use crate::machine::{Effect, Reply, ReplyOption};
use crate::messages;
use crate::store::SessionStore;

/// Drives conversations against a catalog.
pub struct Engine {
    sessions: SessionStore,
    catalog: Arc<dyn CatalogStore>,
}

/// The fixed four-option menu shown on the start command.
pub fn main_menu() -> Reply {
    Reply {
        text: messages::MENU_TEXT.to_string(),
        options: vec![
            ReplyOption {
                label: "Add Movie".to_string(),
                data: MenuChoice::AddMovie.encode(),
            },
            ReplyOption {
                label: "Add Web Series".to_string(),
                data: MenuChoice::AddSeries.encode(),
            },
            ReplyOption {
                label: "Edit Content".to_string(),
                data: MenuChoice::EditContent.encode(),
            },
            ReplyOption {
                label: "List Content".to_string(),
                data: MenuChoice::ListContent.encode(),
            },
        ],
    }
}

impl Engine {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            sessions: SessionStore::new(),
            catalog,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Process one inbound event for `user` and return the replies to send.
    pub async fn dispatch(
        &self,
        user: &UserId,
        event: Event,
    ) -> Result<Vec<Reply>, CinedeckError> {
        if let Event::Menu(choice) = &event
            && choice.is_browse()
        {
            return self.browse(choice.clone()).await;
        }

        let effects = self.sessions.apply(user, event);
        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::Reply(reply) => replies.push(reply),
                Effect::Persist(content) => {
                    let kind = content.kind;
                    let title = content.title.clone();
                    match self.catalog.insert(content).await {
                        Ok(id) => {
                            info!(%user, %kind, id, "record persisted");
                            replies.push(Reply::text(messages::saved(kind, &title)));
                        }
                        Err(e) => {
                            // The session was removed when the transition
                            // ended, so the collected data is gone. Known
                            // failure policy, kept as observed.
                            error!(%user, %kind, error = %e, "insert failed, collected data lost");
                            replies.push(Reply::text(messages::SAVE_FAILED));
                        }
                    }
                }
            }
        }
        Ok(replies)
    }

    async fn browse(&self, choice: MenuChoice) -> Result<Vec<Reply>, CinedeckError> {
        match choice {
            MenuChoice::ListContent => {
                let records = self.catalog.list_recent(None).await?;
                if records.is_empty() {
                    return Ok(vec![Reply::text(messages::LIST_EMPTY)]);
                }
                Ok(vec![Reply::text(render_listing(&records))])
            }
            MenuChoice::EditContent => {
                let records = self.catalog.list_recent(None).await?;
                if records.is_empty() {
                    return Ok(vec![Reply::text(messages::LIST_EMPTY)]);
                }
                let options = records
                    .iter()
                    .map(|record| ReplyOption {
                        label: record.title.clone(),
                        data: MenuChoice::EditTarget(record.id.clone()).encode(),
                    })
                    .collect();
                Ok(vec![Reply {
                    text: messages::EDIT_PICK_PROMPT.to_string(),
                    options,
                }])
            }
            MenuChoice::EditTarget(id) => {
                let Some(record) = self.catalog.get_by_id(&id).await? else {
                    return Ok(vec![Reply::text(messages::EDIT_TARGET_GONE)]);
                };
                Ok(vec![edit_submenu_reply(&record)])
            }
            // Edit categories are a dead end; acknowledge and stop.
            MenuChoice::EditField(_) => Ok(vec![Reply::text(messages::EDIT_STUB)]),
            _ => Ok(Vec::new()),
        }
    }
}

fn render_listing(records: &[ContentRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}. {} ({})", i + 1, record.title, record.kind));
    }
    out
}

fn edit_submenu_reply(record: &ContentRecord) -> Reply {
    use crate::event::EditField;
    Reply {
        text: messages::edit_submenu(&record.title),
        options: vec![
            ReplyOption {
                label: "Title".to_string(),
                data: MenuChoice::EditField(EditField::Title).encode(),
            },
            ReplyOption {
                label: "Thumbnail".to_string(),
                data: MenuChoice::EditField(EditField::Thumbnail).encode(),
            },
            ReplyOption {
                label: "Streaming Links".to_string(),
                data: MenuChoice::EditField(EditField::Links).encode(),
            },
        ],
    }
}

// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message routing, authorization filtering, and event mapping.
//!
//! Decides whether an incoming Telegram update should be processed, maps
//! it into a transport-agnostic [`Event`], runs it through the engine, and
//! delivers the resulting replies.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatId, ChatKind, InlineKeyboardButton, InlineKeyboardMarkup, User};
use tracing::{debug, error, warn};

use cinedeck_assets::AssetStore;
use cinedeck_core::UserId;
use cinedeck_flow::{Engine, Event, MenuChoice, Reply, Step, main_menu, messages};

/// Shared handler context, cloned into each dispatch closure.
pub struct Context {
    pub engine: Arc<Engine>,
    pub assets: Arc<AssetStore>,
    pub allowed_users: Vec<String>,
}

/// Checks whether a Telegram user is authorized.
///
/// Authorization passes if the user's ID (as string) or username matches
/// any entry in `allowed_users`. An empty list rejects everyone.
pub fn user_allowed(user: &User, allowed_users: &[String]) -> bool {
    if allowed_users.is_empty() {
        return false;
    }

    let user_id_str = user.id.to_string();
    for allowed in allowed_users {
        if *allowed == user_id_str {
            return true;
        }
        if let Some(ref username) = user.username {
            let allowed_clean = allowed.strip_prefix('@').unwrap_or(allowed);
            if username.eq_ignore_ascii_case(allowed_clean) {
                return true;
            }
        }
    }
    false
}

/// Checks whether the message sender is authorized.
///
/// Messages without a sender (e.g., channel posts) always return `false`.
pub fn is_authorized(msg: &Message, allowed_users: &[String]) -> bool {
    msg.from
        .as_ref()
        .is_some_and(|user| user_allowed(user, allowed_users))
}

/// Checks whether the message is from a private (DM) chat.
///
/// Group, supergroup, and channel messages return `false`.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Handle one inbound message.
pub async fn on_message(bot: &Bot, msg: &Message, ctx: &Context) {
    if !is_dm(msg) {
        debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
        return;
    }
    if !is_authorized(msg, &ctx.allowed_users) {
        debug!(chat_id = msg.chat.id.0, "ignoring unauthorized user");
        return;
    }

    let Some(user) = msg.from.as_ref().map(|u| UserId(u.id.to_string())) else {
        return;
    };
    let chat = msg.chat.id;

    if let Some(text) = msg.text() {
        if text.trim() == "/start" {
            send_reply(bot, chat, &main_menu()).await;
            return;
        }
        dispatch_and_reply(bot, chat, ctx, &user, Event::Text(text.to_string())).await;
        return;
    }

    if let Some(photos) = msg.photo() {
        // Only download when the flow is actually waiting for a thumbnail;
        // otherwise an empty-ref image event drives the step's reprompt.
        let awaiting_thumbnail = ctx
            .engine
            .sessions()
            .get(&user)
            .is_some_and(|session| session.step() == Step::Thumbnail);

        let event = if awaiting_thumbnail {
            match store_photo(bot, ctx, photos).await {
                Ok(thumbnail_ref) => Event::Image { thumbnail_ref },
                Err(e) => {
                    // Session unchanged; the user can retry the same step.
                    warn!(%user, error = %e, "thumbnail store failed");
                    send_text(bot, chat, messages::THUMBNAIL_FETCH_FAILED).await;
                    return;
                }
            }
        } else {
            Event::Image {
                thumbnail_ref: String::new(),
            }
        };
        dispatch_and_reply(bot, chat, ctx, &user, event).await;
        return;
    }

    debug!(msg_id = msg.id.0, "ignoring unsupported message type");
}

/// Handle one inline-keyboard callback.
pub async fn on_callback(bot: &Bot, query: &CallbackQuery, ctx: &Context) {
    if !user_allowed(&query.from, &ctx.allowed_users) {
        debug!(user_id = %query.from.id, "ignoring unauthorized callback");
        return;
    }

    // Stop the client-side spinner regardless of what the payload decodes to.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        return;
    };
    let Some(choice) = MenuChoice::decode(data) else {
        debug!(data, "ignoring unknown callback payload");
        return;
    };

    let Some(chat) = callback_chat(query) else {
        warn!(user_id = %query.from.id, "callback carries no addressable chat");
        return;
    };
    let user = UserId(query.from.id.to_string());

    dispatch_and_reply(bot, chat, ctx, &user, Event::Menu(choice)).await;
}

/// Resolve the chat a callback reply should go to.
///
/// Telegram omits the originating message on old callbacks; fall back to the
/// sender's DM chat. A user id outside the signed chat id range has no
/// addressable chat.
fn callback_chat(query: &CallbackQuery) -> Option<ChatId> {
    if let Some(message) = query.message.as_ref() {
        return Some(message.chat().id);
    }
    i64::try_from(query.from.id.0).ok().map(ChatId)
}

async fn store_photo(
    bot: &Bot,
    ctx: &Context,
    photos: &[teloxide::types::PhotoSize],
) -> Result<String, cinedeck_core::CinedeckError> {
    let bytes = crate::media::download_largest_photo(bot, photos).await?;
    // Telegram photo messages are always served as JPEG.
    ctx.assets.store_bytes(&bytes, "jpg").await
}

async fn dispatch_and_reply(
    bot: &Bot,
    chat: ChatId,
    ctx: &Context,
    user: &UserId,
    event: Event,
) {
    match ctx.engine.dispatch(user, event).await {
        Ok(replies) => {
            for reply in &replies {
                send_reply(bot, chat, reply).await;
            }
        }
        Err(e) => {
            error!(%user, error = %e, "dispatch failed");
            send_text(bot, chat, messages::BROWSE_FAILED).await;
        }
    }
}

/// Turn reply options into a one-button-per-row inline keyboard.
pub fn keyboard(reply: &Reply) -> Option<InlineKeyboardMarkup> {
    if reply.options.is_empty() {
        return None;
    }
    Some(InlineKeyboardMarkup::new(reply.options.iter().map(
        |option| {
            vec![InlineKeyboardButton::callback(
                option.label.clone(),
                option.data.clone(),
            )]
        },
    )))
}

async fn send_reply(bot: &Bot, chat: ChatId, reply: &Reply) {
    let result = match keyboard(reply) {
        Some(markup) => {
            bot.send_message(chat, &reply.text)
                .reply_markup(markup)
                .await
        }
        None => bot.send_message(chat, &reply.text).await,
    };
    if let Err(e) = result {
        warn!(chat_id = chat.0, error = %e, "failed to send reply");
    }
}

async fn send_text(bot: &Bot, chat: ChatId, text: &str) {
    if let Err(e) = bot.send_message(chat, text).await {
        warn!(chat_id = chat.0, error = %e, "failed to send reply");
    }
}

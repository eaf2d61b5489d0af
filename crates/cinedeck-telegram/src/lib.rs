// SPDX-FileCopyrightText: 2026 Cinedeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram chat adapter for Cinedeck.
//!
//! Connects to the Telegram Bot API via teloxide long polling, filters
//! updates by authorization and chat type, and feeds decoded events into
//! the conversation engine.

pub mod handler;
pub mod media;

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;

use cinedeck_assets::AssetStore;
use cinedeck_config::model::TelegramConfig;
use cinedeck_core::CinedeckError;
use cinedeck_flow::Engine;

use crate::handler::Context;

/// Telegram chat adapter. Owns the bot handle and the handler context.
pub struct TelegramChannel {
    bot: Bot,
    context: Arc<Context>,
}

impl TelegramChannel {
    /// Creates a new Telegram adapter.
    ///
    /// Requires `config.bot_token` to be set and non-empty.
    pub fn new(
        config: TelegramConfig,
        engine: Arc<Engine>,
        assets: Arc<AssetStore>,
    ) -> Result<Self, CinedeckError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            CinedeckError::Config("telegram.bot_token is required for the Telegram adapter".into())
        })?;
        if token.is_empty() {
            return Err(CinedeckError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        Ok(Self {
            bot,
            context: Arc::new(Context {
                engine,
                assets,
                allowed_users: config.allowed_users,
            }),
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Run long polling until the dispatcher stops (ctrl-c).
    pub async fn run(self) {
        info!("starting Telegram long polling");

        let message_ctx = self.context.clone();
        let callback_ctx = self.context.clone();

        let tree = dptree::entry()
            .branch(Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                let ctx = message_ctx.clone();
                async move {
                    handler::on_message(&bot, &msg, &ctx).await;
                    respond(())
                }
            }))
            .branch(
                Update::filter_callback_query().endpoint(move |bot: Bot, query: CallbackQuery| {
                    let ctx = callback_ctx.clone();
                    async move {
                        handler::on_callback(&bot, &query, &ctx).await;
                        respond(())
                    }
                }),
            );

        Dispatcher::builder(self.bot, tree)
            .default_handler(|_| async {}) // Silently ignore other update kinds.
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

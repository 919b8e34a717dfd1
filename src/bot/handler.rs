// Discord event handler.
// Forwards message text to the dispatcher and posts the reply in the same channel.

use std::sync::Arc;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;

use super::dispatcher::{Dispatcher, Requester};
use super::reply::{DISCORD_MESSAGE_LIMIT, split_message};

/// Gateway events this bot needs.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES | GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

pub struct Handler {
    dispatcher: Arc<Dispatcher>,
}

impl Handler {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!("Logged in as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let requester = Requester::new(msg.author.id.to_string()).in_channel(msg.channel_id.get());
        let Some(reply) = self.dispatcher.handle_command(&msg.content, &requester).await else {
            return;
        };

        for chunk in split_message(&reply, DISCORD_MESSAGE_LIMIT) {
            if let Err(why) = msg.channel_id.say(&ctx.http, chunk).await {
                tracing::error!(channel = %msg.channel_id, "Failed to send reply: {}", why);
                break;
            }
        }
    }
}

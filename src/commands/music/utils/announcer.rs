use serenity::async_trait;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use tracing::warn;

#[cfg(test)]
use mockall::automock;

/// Posts playback announcements (now playing, failures) to a text channel
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, message: String);
}

/// Announces into the text channel a command was issued from
pub struct ChannelAnnouncer {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelAnnouncer {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl Announcer for ChannelAnnouncer {
    async fn announce(&self, message: String) {
        if let Err(e) = self.channel_id.say(&self.http, message).await {
            warn!(
                "Failed to send announcement to channel {}: {}",
                self.channel_id, e
            );
        }
    }
}

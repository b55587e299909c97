use serenity::model::id::ChannelId;
use tracing::{debug, warn};

use super::voice::{Player, VoiceConnection};

/// The voice connection and player currently in use by a guild.
///
/// At most one of each exists. A new connection is only recorded after the
/// previous one has been destroyed.
#[derive(Default)]
pub struct PlaybackSession {
    channel_id: Option<ChannelId>,
    player: Option<Box<dyn Player>>,
    connection: Option<Box<dyn VoiceConnection>>,
}

/// Read-only view of a session
pub struct SessionView<'a> {
    pub channel_id: Option<ChannelId>,
    pub player: Option<&'a dyn Player>,
    pub is_active: bool,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly started player, tearing down whatever was active first
    pub async fn start(
        &mut self,
        channel_id: ChannelId,
        player: Box<dyn Player>,
        connection: Box<dyn VoiceConnection>,
    ) {
        if self.is_active() {
            debug!("Replacing active session in channel {:?}", self.channel_id);
            self.stop().await;
        }

        self.channel_id = Some(channel_id);
        self.player = Some(player);
        self.connection = Some(connection);
    }

    /// Stop the player and leave the channel. Safe to call when already stopped.
    pub async fn stop(&mut self) {
        if let Some(player) = self.player.take() {
            if let Err(e) = player.stop() {
                warn!("Failed to stop player: {}", e);
            }
        }

        if let Some(mut connection) = self.connection.take() {
            connection.destroy().await;
        }

        self.channel_id = None;
    }

    pub fn current(&self) -> SessionView<'_> {
        SessionView {
            channel_id: self.channel_id,
            player: self.player(),
            is_active: self.is_active(),
        }
    }

    fn player(&self) -> Option<&dyn Player> {
        self.player.as_deref()
    }

    fn is_active(&self) -> bool {
        self.connection.is_some()
    }
}

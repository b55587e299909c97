use dashmap::DashMap;
use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use super::catalog::TrackCatalog;
use super::guild_player::{GuildPlayer, PlayerSettings};
use super::voice::VoiceTransport;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Playback error: {0}")]
    PlaybackError(String),

    #[error("Track catalog error: {0}")]
    CatalogError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Owns the track catalog and one [`GuildPlayer`] per guild
pub struct MusicManager {
    catalog: Arc<TrackCatalog>,
    transport: Arc<dyn VoiceTransport>,
    settings: PlayerSettings,
    players: DashMap<GuildId, Arc<GuildPlayer>>,
}

impl MusicManager {
    pub fn new(
        catalog: Arc<TrackCatalog>,
        transport: Arc<dyn VoiceTransport>,
        settings: PlayerSettings,
    ) -> Self {
        Self {
            catalog,
            transport,
            settings,
            players: DashMap::new(),
        }
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    /// Get the player for this guild, creating it and its signal loop on first use
    pub fn player(&self, guild_id: GuildId) -> Arc<GuildPlayer> {
        self.players
            .entry(guild_id)
            .or_insert_with(|| {
                info!("Creating player for guild {}", guild_id);
                let (player, signals) = GuildPlayer::new(
                    guild_id,
                    self.catalog.clone(),
                    self.transport.clone(),
                    self.settings.clone(),
                );
                tokio::spawn(GuildPlayer::run(Arc::downgrade(&player), signals));
                player
            })
            .value()
            .clone()
    }

    /// Get the voice channel ID that the user is currently in
    pub fn get_user_voice_channel(
        ctx: &Context,
        guild_id: GuildId,
        user_id: UserId,
    ) -> MusicResult<ChannelId> {
        let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

        let voice_state = guild
            .voice_states
            .get(&user_id)
            .ok_or(MusicError::UserNotInVoiceChannel)?;

        voice_state
            .channel_id
            .ok_or(MusicError::UserNotInVoiceChannel)
    }
}

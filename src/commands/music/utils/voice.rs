//! Seams to the voice transport and playback engine.
//!
//! The orchestrator only talks to these traits. The songbird implementations
//! below are what the bot runs with; tests substitute their own.

use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::Mutex as SerenityMutex;
use songbird::error::JoinError;
use songbird::input::{File, Input};
use songbird::tracks::{PlayMode, TrackHandle};
use songbird::{Call, Event, Songbird, TrackEvent};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

#[cfg(test)]
use mockall::automock;

use super::catalog::Track;
use super::event_handlers::{TrackEndNotifier, TrackErrorNotifier, TrackEvents};
use super::music_manager::{MusicError, MusicResult};

/// Status reported by the playback engine for the active player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlaybackStatus::Idle => "idle",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
        };
        f.write_str(label)
    }
}

/// Joins voice channels
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VoiceTransport: Send + Sync {
    async fn connect(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Box<dyn VoiceConnection>>;
}

/// A live voice connection that can play one track at a time
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VoiceConnection: Send + Sync {
    /// Start playing `track`, reporting its end or failure through `events`
    async fn play(&mut self, track: &Track, events: TrackEvents) -> MusicResult<Box<dyn Player>>;

    /// Leave the channel. Calling this on a closed connection does nothing.
    async fn destroy(&mut self);
}

/// Control surface of a started track
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Player: Send + Sync {
    async fn status(&self) -> MusicResult<PlaybackStatus>;
    fn pause(&self) -> MusicResult<()>;
    fn resume(&self) -> MusicResult<()>;
    fn stop(&self) -> MusicResult<()>;
}

/// Voice transport backed by the songbird instance registered on the client
pub struct SongbirdTransport {
    manager: Arc<Songbird>,
}

impl SongbirdTransport {
    pub fn new(manager: Arc<Songbird>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl VoiceTransport for SongbirdTransport {
    async fn connect(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Box<dyn VoiceConnection>> {
        let call = self
            .manager
            .join(guild_id, channel_id)
            .await
            .map_err(|e| MusicError::JoinError(e.to_string()))?;

        debug!("Joined voice channel {} in guild {}", channel_id, guild_id);

        Ok(Box::new(SongbirdConnection {
            manager: self.manager.clone(),
            guild_id,
            call: Some(call),
        }))
    }
}

struct SongbirdConnection {
    manager: Arc<Songbird>,
    guild_id: GuildId,
    call: Option<Arc<SerenityMutex<Call>>>,
}

#[async_trait]
impl VoiceConnection for SongbirdConnection {
    async fn play(&mut self, track: &Track, events: TrackEvents) -> MusicResult<Box<dyn Player>> {
        let call = self.call.as_ref().ok_or(MusicError::NotConnected)?;

        let input: Input = File::new(track.path.clone()).into();
        let handle = call.lock().await.play_input(input);

        handle
            .add_event(
                Event::Track(TrackEvent::End),
                TrackEndNotifier::new(events.clone()),
            )
            .map_err(|e| MusicError::PlaybackError(e.to_string()))?;
        handle
            .add_event(Event::Track(TrackEvent::Error), TrackErrorNotifier::new(events))
            .map_err(|e| MusicError::PlaybackError(e.to_string()))?;

        Ok(Box::new(SongbirdPlayer { handle }))
    }

    async fn destroy(&mut self) {
        if self.call.take().is_none() {
            return;
        }

        match self.manager.remove(self.guild_id).await {
            Ok(()) | Err(JoinError::NoCall) => {
                debug!("Left voice channel in guild {}", self.guild_id);
            }
            Err(e) => warn!(
                "Failed to leave voice channel in guild {}: {}",
                self.guild_id, e
            ),
        }
    }
}

struct SongbirdPlayer {
    handle: TrackHandle,
}

#[async_trait]
impl Player for SongbirdPlayer {
    async fn status(&self) -> MusicResult<PlaybackStatus> {
        let info = self
            .handle
            .get_info()
            .await
            .map_err(|e| MusicError::PlaybackError(e.to_string()))?;

        Ok(match info.playing {
            PlayMode::Play => PlaybackStatus::Playing,
            PlayMode::Pause => PlaybackStatus::Paused,
            _ => PlaybackStatus::Idle,
        })
    }

    fn pause(&self) -> MusicResult<()> {
        self.handle
            .pause()
            .map_err(|e| MusicError::PlaybackError(e.to_string()))
    }

    fn resume(&self) -> MusicResult<()> {
        self.handle
            .play()
            .map_err(|e| MusicError::PlaybackError(e.to_string()))
    }

    fn stop(&self) -> MusicResult<()> {
        self.handle
            .stop()
            .map_err(|e| MusicError::PlaybackError(e.to_string()))
    }
}

//! Per-guild playback orchestration.
//!
//! A [`GuildPlayer`] owns the queue and the voice session of one guild. Commands
//! call into it directly. Track end and failure reports arrive as
//! [`PlayerSignal`]s on a channel drained by [`GuildPlayer::run`], which takes
//! the same state lock, so commands and signals never interleave.
//!
//! Every started track is stamped with a new generation. Stopping or skipping
//! bumps the generation, and any signal still in flight from an older track is
//! dropped when it arrives.

use serenity::model::id::{ChannelId, GuildId};
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, warn};

use super::announcer::Announcer;
use super::catalog::{Track, TrackCatalog};
use super::embedded_messages;
use super::event_handlers::{PlayerSignal, PlayerSignals, SignalSender, TrackEvents, TrackOutcome};
use super::music_manager::{MusicError, MusicResult};
use super::queue_manager::PlaybackQueue;
use super::session::PlaybackSession;
use super::voice::{PlaybackStatus, Player, VoiceConnection, VoiceTransport};

#[derive(Debug, Clone)]
pub struct PlayerSettings {
    /// Go idle after this many tracks fail in a row. Zero never gives up.
    pub max_consecutive_failures: usize,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            max_consecutive_failures: crate::config::DEFAULT_MAX_CONSECUTIVE_FAILURES,
        }
    }
}

/// Result of asking for the next track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Playing(Track),
    /// Queue and catalog were both empty; the player is now idle
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued(Track),
    QueuedCatalog(usize),
    NotFound { name: String, available: Vec<String> },
    CatalogEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    AlreadyPlaying,
    Started(Advance),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipOutcome {
    NothingPlaying,
    Skipped(Advance),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    NothingPlaying,
    Paused,
    AlreadyPaused,
    Resumed,
    AlreadyPlaying,
    Stopped,
    Left,
    NotConnected,
}

#[derive(Default)]
struct PlayerState {
    queue: PlaybackQueue,
    session: PlaybackSession,
    is_playing: bool,
    generation: u64,
    failures: usize,
    voice_channel: Option<ChannelId>,
    announcer: Option<Arc<dyn Announcer>>,
}

impl PlayerState {
    fn active_player(&self) -> Option<&dyn Player> {
        let session = self.session.current();
        if self.is_playing { session.player } else { None }
    }

    async fn announce(&self, message: String) {
        match &self.announcer {
            Some(announcer) => announcer.announce(message).await,
            None => debug!("No announcement channel, dropping: {}", message),
        }
    }
}

pub struct GuildPlayer {
    guild_id: GuildId,
    catalog: Arc<TrackCatalog>,
    transport: Arc<dyn VoiceTransport>,
    settings: PlayerSettings,
    signals: SignalSender,
    state: Mutex<PlayerState>,
}

impl GuildPlayer {
    /// Create a player along with the receiving end of its signal channel.
    ///
    /// The receiver must be handed to [`GuildPlayer::run`] (or drained by hand)
    /// for tracks to advance on their own.
    pub fn new(
        guild_id: GuildId,
        catalog: Arc<TrackCatalog>,
        transport: Arc<dyn VoiceTransport>,
        settings: PlayerSettings,
    ) -> (Arc<Self>, PlayerSignals) {
        let (signals, receiver) = mpsc::unbounded_channel();
        let player = Arc::new(Self {
            guild_id,
            catalog,
            transport,
            settings,
            signals,
            state: Mutex::new(PlayerState::default()),
        });
        (player, receiver)
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// Drain track signals until the player is dropped
    pub async fn run(player: Weak<Self>, mut signals: PlayerSignals) {
        while let Some(signal) = signals.recv().await {
            let Some(player) = player.upgrade() else {
                break;
            };
            player.handle_signal(signal).await;
        }
        debug!("Player signal loop finished");
    }

    /// Add the named track, or the whole catalog when `name` is `None`, to the queue
    pub async fn enqueue_request(&self, name: Option<&str>) -> MusicResult<EnqueueOutcome> {
        let mut state = self.state.lock().await;

        match name {
            Some(name) => match self.catalog.resolve(name) {
                Some(track) => {
                    info!("Queued {} in guild {}", track.name, self.guild_id);
                    state.queue.enqueue(track.clone());
                    Ok(EnqueueOutcome::Queued(track))
                }
                None => {
                    debug!("Track {:?} not found in catalog", name);
                    Ok(EnqueueOutcome::NotFound {
                        name: name.to_string(),
                        available: self.catalog.list_available()?,
                    })
                }
            },
            None => {
                let tracks = self.catalog.list_available_paths()?;
                if tracks.is_empty() {
                    return Ok(EnqueueOutcome::CatalogEmpty);
                }
                let count = tracks.len();
                state.queue.enqueue_all(tracks);
                info!("Queued {} catalog tracks in guild {}", count, self.guild_id);
                Ok(EnqueueOutcome::QueuedCatalog(count))
            }
        }
    }

    /// Start playing in `channel_id` unless something is already playing
    pub async fn start(
        &self,
        channel_id: ChannelId,
        announcer: Arc<dyn Announcer>,
    ) -> MusicResult<StartOutcome> {
        let mut state = self.state.lock().await;

        if state.is_playing {
            return Ok(StartOutcome::AlreadyPlaying);
        }

        state.voice_channel = Some(channel_id);
        state.announcer = Some(announcer);
        state.failures = 0;

        let advance = self.advance_or_idle(&mut state).await?;
        Ok(StartOutcome::Started(advance))
    }

    /// Drop the current track and play the next one
    pub async fn skip(&self, announcer: Arc<dyn Announcer>) -> MusicResult<SkipOutcome> {
        let mut state = self.state.lock().await;

        if !state.is_playing {
            return Ok(SkipOutcome::NothingPlaying);
        }

        info!("Skipping track in guild {}", self.guild_id);
        state.announcer = Some(announcer);
        state.failures = 0;

        let advance = self.advance_or_idle(&mut state).await?;
        Ok(SkipOutcome::Skipped(advance))
    }

    pub async fn pause(&self) -> MusicResult<ControlOutcome> {
        let state = self.state.lock().await;
        let Some(player) = state.active_player() else {
            return Ok(ControlOutcome::NothingPlaying);
        };

        match player.status().await? {
            PlaybackStatus::Playing => {
                player.pause()?;
                info!("Paused playback in guild {}", self.guild_id);
                Ok(ControlOutcome::Paused)
            }
            status => {
                debug!("Not pausing, player is {} in guild {}", status, self.guild_id);
                Ok(ControlOutcome::AlreadyPaused)
            }
        }
    }

    pub async fn resume(&self) -> MusicResult<ControlOutcome> {
        let state = self.state.lock().await;
        let Some(player) = state.active_player() else {
            return Ok(ControlOutcome::NothingPlaying);
        };

        match player.status().await? {
            PlaybackStatus::Paused => {
                player.resume()?;
                info!("Resumed playback in guild {}", self.guild_id);
                Ok(ControlOutcome::Resumed)
            }
            status => {
                debug!("Not resuming, player is {} in guild {}", status, self.guild_id);
                Ok(ControlOutcome::AlreadyPlaying)
            }
        }
    }

    /// Stop playback and leave the channel. The queue is emptied either way.
    pub async fn stop(&self) -> ControlOutcome {
        let mut state = self.state.lock().await;
        state.queue.clear();

        if state.active_player().is_none() {
            return ControlOutcome::NothingPlaying;
        }

        self.go_idle(&mut state).await;
        info!("Stopped playback in guild {}", self.guild_id);
        ControlOutcome::Stopped
    }

    /// Leave the voice channel and empty the queue
    pub async fn leave(&self) -> ControlOutcome {
        let mut state = self.state.lock().await;
        state.queue.clear();

        if !state.session.current().is_active {
            return ControlOutcome::NotConnected;
        }

        self.go_idle(&mut state).await;
        info!("Left voice channel in guild {}", self.guild_id);
        ControlOutcome::Left
    }

    /// Pending tracks in play order
    pub async fn queue(&self) -> Vec<Track> {
        self.state.lock().await.queue.peek_all()
    }

    pub async fn is_playing(&self) -> bool {
        self.state.lock().await.is_playing
    }

    pub async fn status(&self) -> PlaybackStatus {
        let state = self.state.lock().await;
        match state.active_player() {
            Some(player) => player.status().await.unwrap_or_else(|e| {
                warn!("Could not read player status: {}", e);
                PlaybackStatus::Idle
            }),
            None => PlaybackStatus::Idle,
        }
    }

    /// React to a track ending or failing
    pub async fn handle_signal(&self, signal: PlayerSignal) {
        let mut state = self.state.lock().await;

        if !state.is_playing || signal.generation != state.generation {
            debug!(
                "Ignoring stale signal for generation {} (current {})",
                signal.generation, state.generation
            );
            return;
        }

        match signal.outcome {
            TrackOutcome::Finished => {
                debug!("Track ended in guild {}", self.guild_id);
                state.failures = 0;
            }
            TrackOutcome::Failed(reason) => {
                error!("Error playing track in guild {}: {}", self.guild_id, reason);
                state
                    .announce(embedded_messages::playback_failed_text())
                    .await;

                state.failures += 1;
                let limit = self.settings.max_consecutive_failures;
                if limit > 0 && state.failures >= limit {
                    warn!(
                        "{} consecutive failures in guild {}, going idle",
                        state.failures, self.guild_id
                    );
                    let failures = state.failures;
                    self.go_idle(&mut state).await;
                    state
                        .announce(embedded_messages::too_many_failures_text(failures))
                        .await;
                    return;
                }
            }
        }

        if let Err(e) = self.advance_or_idle(&mut state).await {
            error!("Failed to play next track in guild {}: {}", self.guild_id, e);
            state
                .announce(embedded_messages::playback_interrupted_text(&e))
                .await;
        }
    }

    async fn advance_or_idle(&self, state: &mut PlayerState) -> MusicResult<Advance> {
        match self.advance(state).await {
            Ok(advance) => Ok(advance),
            Err(e) => {
                self.go_idle(state).await;
                Err(e)
            }
        }
    }

    /// Dequeue the next track (refilling from the catalog when the queue is
    /// empty) and play it on a fresh connection.
    async fn advance(&self, state: &mut PlayerState) -> MusicResult<Advance> {
        if state.queue.is_empty() {
            let tracks = self.catalog.list_available_paths()?;
            if tracks.is_empty() {
                info!(
                    "Queue and catalog are empty in guild {}, going idle",
                    self.guild_id
                );
                self.go_idle(state).await;
                state
                    .announce(embedded_messages::nothing_to_play_text())
                    .await;
                return Ok(Advance::Exhausted);
            }
            debug!("Refilling queue with {} catalog tracks", tracks.len());
            state.queue.enqueue_all(tracks);
        }

        let channel_id = state
            .voice_channel
            .ok_or(MusicError::UserNotInVoiceChannel)?;
        let Some(track) = state.queue.dequeue() else {
            return Ok(Advance::Exhausted);
        };

        state.generation += 1;
        state.session.stop().await;

        let (connection, player) = match self.open(channel_id, &track, state.generation).await {
            Ok(opened) => opened,
            Err(e) => {
                // Keep the track so the next play picks it up again
                state.queue.requeue_front(track);
                return Err(e);
            }
        };
        state.session.start(channel_id, player, connection).await;
        state.is_playing = true;

        info!(
            "Now playing {} in guild {} (generation {})",
            track.name, self.guild_id, state.generation
        );
        state
            .announce(embedded_messages::now_playing_text(&track))
            .await;

        Ok(Advance::Playing(track))
    }

    async fn open(
        &self,
        channel_id: ChannelId,
        track: &Track,
        generation: u64,
    ) -> MusicResult<(Box<dyn VoiceConnection>, Box<dyn Player>)> {
        let mut connection = self.transport.connect(self.guild_id, channel_id).await?;
        let events = TrackEvents::new(generation, self.signals.clone());

        match connection.play(track, events).await {
            Ok(player) => Ok((connection, player)),
            Err(e) => {
                connection.destroy().await;
                Err(e)
            }
        }
    }

    async fn go_idle(&self, state: &mut PlayerState) {
        state.session.stop().await;
        state.is_playing = false;
        state.generation += 1;
        state.failures = 0;
    }
}

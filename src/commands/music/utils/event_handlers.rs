use serenity::async_trait;
use songbird::tracks::PlayMode;
use tokio::sync::mpsc;
use tracing::debug;

/// How a started track finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The track played to its natural end (or was stopped)
    Finished,
    /// The playback engine failed mid-track
    Failed(String),
}

/// A track outcome tagged with the generation of the player that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSignal {
    pub generation: u64,
    pub outcome: TrackOutcome,
}

pub type SignalSender = mpsc::UnboundedSender<PlayerSignal>;
pub type PlayerSignals = mpsc::UnboundedReceiver<PlayerSignal>;

/// Where a single started track reports its end or failure.
///
/// Every track gets its own generation, so signals from a replaced player can
/// be told apart from the current one.
#[derive(Debug, Clone)]
pub struct TrackEvents {
    generation: u64,
    sender: SignalSender,
}

impl TrackEvents {
    pub fn new(generation: u64, sender: SignalSender) -> Self {
        Self { generation, sender }
    }

    pub fn finished(&self) {
        self.send(TrackOutcome::Finished);
    }

    pub fn failed(&self, reason: impl Into<String>) {
        self.send(TrackOutcome::Failed(reason.into()));
    }

    fn send(&self, outcome: TrackOutcome) {
        // The receiver only goes away with its guild player
        if self
            .sender
            .send(PlayerSignal {
                generation: self.generation,
                outcome,
            })
            .is_err()
        {
            debug!(
                "Dropping signal for generation {}, player is gone",
                self.generation
            );
        }
    }
}

/// Event handler for when a track ends
pub struct TrackEndNotifier {
    events: TrackEvents,
}

impl TrackEndNotifier {
    pub fn new(events: TrackEvents) -> Self {
        Self { events }
    }
}

#[async_trait]
impl songbird::EventHandler for TrackEndNotifier {
    async fn act(&self, ctx: &songbird::EventContext<'_>) -> Option<songbird::Event> {
        if let songbird::EventContext::Track(_) = ctx {
            self.events.finished();
        }
        None
    }
}

/// Event handler for when the engine fails to play a track
pub struct TrackErrorNotifier {
    events: TrackEvents,
}

impl TrackErrorNotifier {
    pub fn new(events: TrackEvents) -> Self {
        Self { events }
    }
}

#[async_trait]
impl songbird::EventHandler for TrackErrorNotifier {
    async fn act(&self, ctx: &songbird::EventContext<'_>) -> Option<songbird::Event> {
        if let songbird::EventContext::Track(tracks) = ctx {
            let reason = tracks
                .iter()
                .find_map(|(state, _)| match &state.playing {
                    PlayMode::Errored(e) => Some(format!("{:?}", e)),
                    _ => None,
                })
                .unwrap_or_else(|| "unknown playback error".to_string());

            self.events.failed(reason);
        }
        None
    }
}

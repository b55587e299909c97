// Music playback building blocks
pub mod announcer;
pub mod catalog;
pub mod embedded_messages;
pub mod event_handlers;
pub mod guild_player;
pub mod music_manager;
pub mod queue_manager;
pub mod session;
pub mod voice;

/// Collapse runs of whitespace in a track name typed after a command
pub fn normalize_track_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

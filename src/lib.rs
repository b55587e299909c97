//! A voice-channel jukebox that plays tracks from a local directory.
//!
//! Commands are plain prefix commands handled by poise; playback state lives in
//! one [`GuildPlayer`](commands::music::utils::guild_player::GuildPlayer) per guild.

use std::sync::Arc;

pub mod commands;
pub mod config;

use commands::music::utils::music_manager::MusicManager;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data, which is stored and accessible in all command invocations
pub struct Data {
    pub music: Arc<MusicManager>,
    /// Command prefix, used when rendering the command reference
    pub prefix: String,
}

pub mod leave;
pub mod list;
pub mod pause;
pub mod play;
pub mod queue;
pub mod resume;
pub mod skip;
pub mod stop;

pub mod utils;

use crate::{CommandResult, Context};

use std::sync::Arc;

use utils::announcer::{Announcer, ChannelAnnouncer};
use utils::embedded_messages;
use utils::guild_player::GuildPlayer;
use utils::music_manager::MusicError;

/// The calling guild's player
fn guild_player(ctx: &Context<'_>) -> Result<Arc<GuildPlayer>, MusicError> {
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;
    Ok(ctx.data().music.player(guild_id))
}

/// Announcer bound to the channel the command came from
fn channel_announcer(ctx: &Context<'_>) -> Arc<dyn Announcer> {
    let http: Arc<serenity::http::Http> = ctx.serenity_context().http.clone();
    Arc::new(ChannelAnnouncer::new(http, ctx.channel_id()))
}

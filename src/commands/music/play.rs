use super::*;
use crate::commands::music::utils::{
    guild_player::{EnqueueOutcome, StartOutcome},
    music_manager::MusicManager,
    normalize_track_name,
};
use tracing::{error, info};

/// Play a track by name, or every available track when no name is given
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[rest]
    #[description = "Name of the track, without extension"]
    track: Option<String>,
) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;
    let name = track
        .as_deref()
        .map(normalize_track_name)
        .filter(|name| !name.is_empty());
    info!("Received play command with track: {:?}", name);

    // Get the user's voice channel
    let channel_id = match MusicManager::get_user_voice_channel(
        ctx.serenity_context(),
        guild_id,
        ctx.author().id,
    ) {
        Ok(channel_id) => channel_id,
        Err(err) => {
            ctx.send(embedded_messages::not_in_voice_channel(err))
                .await?;
            return Ok(());
        }
    };

    let player = guild_player(&ctx)?;

    match player.enqueue_request(name.as_deref()).await? {
        EnqueueOutcome::Queued(track) => {
            ctx.send(embedded_messages::added_to_queue(&track)).await?;
        }
        EnqueueOutcome::QueuedCatalog(count) => {
            ctx.send(embedded_messages::added_catalog(count)).await?;
        }
        EnqueueOutcome::NotFound { name, available } => {
            ctx.send(embedded_messages::track_not_found(&name, &available))
                .await?;
            return Ok(());
        }
        EnqueueOutcome::CatalogEmpty => {
            ctx.send(embedded_messages::catalog_empty()).await?;
            return Ok(());
        }
    }

    // Now-playing is announced by the player itself
    match player.start(channel_id, channel_announcer(&ctx)).await {
        Ok(StartOutcome::AlreadyPlaying) | Ok(StartOutcome::Started(_)) => {}
        Err(err) => {
            error!("Failed to start playback in guild {}: {}", guild_id, err);
            ctx.send(embedded_messages::playback_error(err)).await?;
        }
    }

    Ok(())
}

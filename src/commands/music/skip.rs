use super::*;
use crate::commands::music::utils::guild_player::SkipOutcome;
use tracing::error;

/// Skip the current track
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    let player = guild_player(&ctx)?;

    match player.skip(channel_announcer(&ctx)).await {
        Ok(SkipOutcome::NothingPlaying) => {
            ctx.send(embedded_messages::nothing_playing()).await?;
        }
        Ok(SkipOutcome::Skipped(advance)) => {
            ctx.send(embedded_messages::skipped(&advance)).await?;
        }
        Err(err) => {
            error!("Failed to skip in guild {}: {}", player.guild_id(), err);
            ctx.send(embedded_messages::playback_error(err)).await?;
        }
    }

    Ok(())
}

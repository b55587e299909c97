use super::*;
use crate::commands::music::utils::guild_player::ControlOutcome;

/// Pause the current track
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    let player = guild_player(&ctx)?;

    let reply = match player.pause().await? {
        ControlOutcome::Paused => embedded_messages::paused(),
        ControlOutcome::NothingPlaying => embedded_messages::nothing_playing(),
        _ => embedded_messages::already_paused(),
    };
    ctx.send(reply).await?;

    Ok(())
}

use super::*;
use crate::commands::music::utils::guild_player::ControlOutcome;

/// Resume a paused track
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    let player = guild_player(&ctx)?;

    let reply = match player.resume().await? {
        ControlOutcome::Resumed => embedded_messages::resumed(),
        ControlOutcome::NothingPlaying => embedded_messages::nothing_playing(),
        _ => embedded_messages::already_playing(),
    };
    ctx.send(reply).await?;

    Ok(())
}

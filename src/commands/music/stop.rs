use super::*;
use crate::commands::music::utils::guild_player::ControlOutcome;

/// Stop the music, clear the queue, and leave the voice channel
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let player = guild_player(&ctx)?;

    let reply = match player.stop().await {
        ControlOutcome::Stopped => embedded_messages::stopped(),
        _ => embedded_messages::nothing_playing(),
    };
    ctx.send(reply).await?;

    Ok(())
}

use super::*;
use crate::commands::music::utils::guild_player::ControlOutcome;

/// Leave the voice channel
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn leave(ctx: Context<'_>) -> CommandResult {
    let player = guild_player(&ctx)?;

    let reply = match player.leave().await {
        ControlOutcome::Left => embedded_messages::left_voice_channel(),
        _ => embedded_messages::bot_not_in_voice_channel(),
    };
    ctx.send(reply).await?;

    Ok(())
}

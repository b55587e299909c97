use super::*;

/// View the tracks waiting in the queue
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn queue(ctx: Context<'_>) -> CommandResult {
    let tracks = guild_player(&ctx)?.queue().await;
    ctx.send(embedded_messages::queue(&tracks)).await?;

    Ok(())
}

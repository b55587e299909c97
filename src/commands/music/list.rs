use super::*;

/// List every track available to play
#[poise::command(prefix_command, category = "Music")]
pub async fn list(ctx: Context<'_>) -> CommandResult {
    let names = ctx.data().music.catalog().list_available()?;
    ctx.send(embedded_messages::catalog(&names)).await?;

    Ok(())
}

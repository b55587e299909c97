use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::{SerenityInit, Songbird};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jukebox::commands::{
    self,
    music::utils::{catalog::TrackCatalog, music_manager::MusicManager, voice::SongbirdTransport},
};
use jukebox::config::Config;
use jukebox::{Data, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jukebox=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Config::from_env()?;

    let catalog = TrackCatalog::open(&config.songs_dir, &config.extension)?;
    info!(
        "Serving {} tracks from {}",
        catalog.list_available()?.len(),
        catalog.dir().display()
    );

    let songbird = Songbird::serenity();
    let music = Arc::new(MusicManager::new(
        Arc::new(catalog),
        Arc::new(SongbirdTransport::new(songbird.clone())),
        config.player_settings(),
    ));

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let prefix = config.prefix.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                case_insensitive_commands: true,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                Ok(Data { music, prefix })
            })
        })
        .build();

    let mut client = ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .register_songbird_with(songbird)
        .await?;

    client.start().await.map_err(Into::into)
}

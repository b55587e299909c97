use poise::CreateReply;
use serenity::all::CreateEmbed;

use super::{catalog::Track, guild_player::Advance, music_manager::MusicError};

/// Discord rejects embed descriptions longer than this many characters
const MAX_DESCRIPTION_LENGTH: usize = 4096;

/// Longest user-supplied track name echoed back in a reply
const MAX_ECHOED_NAME_LENGTH: usize = 100;

const SUCCESS_COLOR: u32 = 0x00ff00;
const ERROR_COLOR: u32 = 0xff0000;

fn success(title: &str, description: impl Into<String>) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title(title)
            .description(description)
            .color(SUCCESS_COLOR),
    )
}

fn error(description: impl Into<String>) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description(description)
            .color(ERROR_COLOR),
    )
}

fn more_suffix(count: usize) -> String {
    format!("… and {} more", count)
}

/// One name per line, at most `budget` characters long. Names that do not fit
/// are replaced by a count of what was left out.
pub fn format_track_list<S: AsRef<str>>(names: &[S], budget: usize) -> String {
    let lines: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(index, name)| format!("{}. {}", index + 1, name.as_ref()))
        .collect();

    let full = lines.join("\n");
    if full.chars().count() <= budget {
        return full;
    }

    // Every kept line must leave room for the count of the lines after it
    let mut out = String::new();
    let mut used = 0;
    let mut kept = 0;
    for line in &lines {
        let line_len = line.chars().count() + 1;
        let suffix_len = more_suffix(lines.len() - kept - 1).chars().count();
        if used + line_len + suffix_len > budget {
            break;
        }
        out.push_str(line);
        out.push('\n');
        used += line_len;
        kept += 1;
    }

    out.push_str(&more_suffix(lines.len() - kept));
    out
}

/// Put `header` in front of a track list, keeping the whole text within an
/// embed description.
fn with_track_list<S: AsRef<str>>(header: &str, names: &[S]) -> String {
    let budget = MAX_DESCRIPTION_LENGTH.saturating_sub(header.chars().count());
    format!("{}{}", header, format_track_list(names, budget))
}

fn echoed_name(name: &str) -> String {
    if name.chars().count() <= MAX_ECHOED_NAME_LENGTH {
        return name.to_string();
    }
    let mut shortened: String = name.chars().take(MAX_ECHOED_NAME_LENGTH - 1).collect();
    shortened.push('…');
    shortened
}

/// The command reference shown by `help`
pub fn help_text(prefix: &str) -> String {
    [
        ("play [track name]", "Play the named track, or every track if no name is given"),
        ("skip", "Skip the current track"),
        ("pause", "Pause the current track"),
        ("resume", "Resume a paused track"),
        ("stop", "Stop playback, clear the queue and leave the voice channel"),
        ("leave", "Leave the voice channel"),
        ("queue", "List the tracks waiting in the queue"),
        ("list", "List every available track"),
        ("help", "Show this message"),
    ]
    .iter()
    .map(|(usage, description)| format!("- `{}{}`: {}", prefix, usage, description))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn help(prefix: &str) -> CreateReply {
    success("📖 Commands", help_text(prefix))
}

pub fn not_in_voice_channel(err: MusicError) -> CreateReply {
    error(format!("You need to be in a voice channel to play music: {}", err)).ephemeral(true)
}

pub fn track_not_found(name: &str, available: &[String]) -> CreateReply {
    error(track_not_found_text(name, available))
}

fn track_not_found_text(name: &str, available: &[String]) -> String {
    let header = format!("Track `{}` not found.\n", echoed_name(name));
    if available.is_empty() {
        return format!("{}No tracks are available.", header);
    }
    with_track_list(&format!("{}Available tracks:\n", header), available)
}

pub fn catalog_empty() -> CreateReply {
    error("There are no tracks in the music directory!")
}

pub fn added_to_queue(track: &Track) -> CreateReply {
    success("🎵 Added to Queue", format!("`{}`", track.name))
}

pub fn added_catalog(count: usize) -> CreateReply {
    success(
        "🎵 Added to Queue",
        format!("Queued all `{}` available tracks", count),
    )
}

pub fn queue(tracks: &[Track]) -> CreateReply {
    success("🎵 Music Queue", queue_text(tracks))
}

fn queue_text(tracks: &[Track]) -> String {
    if tracks.is_empty() {
        return "**📭 Queue is empty**".to_string();
    }
    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    with_track_list(&format!("**📋 Queue - {} tracks**\n", names.len()), &names)
}

pub fn catalog(names: &[String]) -> CreateReply {
    if names.is_empty() {
        return error("No tracks found in the music directory.");
    }
    success(
        "💿 Available Tracks",
        format_track_list(names, MAX_DESCRIPTION_LENGTH),
    )
}

pub fn nothing_playing() -> CreateReply {
    error("Nothing is currently playing.")
}

pub fn skipped(advance: &Advance) -> CreateReply {
    match advance {
        Advance::Playing(track) => success(
            "⏭️ Skipped Track",
            format!("Skipped to `{}`", track.name),
        ),
        Advance::Exhausted => success("⏭️ Skipped Track", "There is nothing left to play"),
    }
}

pub fn paused() -> CreateReply {
    success("⏸️ Paused", "Playback paused")
}

pub fn already_paused() -> CreateReply {
    error("Playback is already paused.")
}

pub fn resumed() -> CreateReply {
    success("▶️ Resumed", "Playback resumed")
}

pub fn already_playing() -> CreateReply {
    error("Playback is already running.")
}

pub fn stopped() -> CreateReply {
    success(
        "⏹️ Stopped",
        "Playback stopped, queue cleared and left the voice channel",
    )
}

pub fn left_voice_channel() -> CreateReply {
    success("👋 Left", "Left the voice channel and cleared the queue")
}

pub fn bot_not_in_voice_channel() -> CreateReply {
    error("I'm not in a voice channel.")
}

pub fn playback_error(err: MusicError) -> CreateReply {
    error(format!("Failed to start playback: {}", err))
}

pub fn now_playing_text(track: &Track) -> String {
    format!("🎵 Now playing: **{}**", track.name)
}

pub fn playback_failed_text() -> String {
    "❌ There was an error playing the track, skipping to the next one.".to_string()
}

pub fn nothing_to_play_text() -> String {
    "📭 The queue is empty and there are no tracks available to play.".to_string()
}

pub fn too_many_failures_text(failures: usize) -> String {
    format!(
        "🛑 Stopping playback after {} tracks in a row failed to play.",
        failures
    )
}

pub fn playback_interrupted_text(err: &MusicError) -> String {
    format!("🛑 Playback stopped: {}", err)
}

use assert_matches::assert_matches;
use jukebox::commands::music::utils::{
    guild_player::{Advance, ControlOutcome, EnqueueOutcome, PlayerSettings, SkipOutcome, StartOutcome},
    music_manager::MusicError,
    voice::PlaybackStatus,
};
use pretty_assertions::assert_eq;

use crate::common::Harness;

#[tokio::test]
async fn play_without_name_queues_catalog_and_starts_with_first_track() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);

    let (queued, started) = h.play(None).await.unwrap();

    assert_eq!(queued, EnqueueOutcome::QueuedCatalog(2));
    assert_matches!(
        started,
        Some(StartOutcome::Started(Advance::Playing(track))) if track.name == "a"
    );
    assert_eq!(h.queue_names().await, vec!["b"]);
    assert_eq!(h.transport.played(), vec!["a"]);
    assert_eq!(h.announcer.messages(), vec!["🎵 Now playing: **a**"]);
}

#[tokio::test]
async fn skipping_walks_the_queue_then_refills_from_catalog() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(None).await.unwrap();

    let first = h.player.skip(h.announcer()).await.unwrap();
    assert_matches!(first, SkipOutcome::Skipped(Advance::Playing(track)) if track.name == "b");
    assert!(h.queue_names().await.is_empty());

    let second = h.player.skip(h.announcer()).await.unwrap();
    assert_matches!(second, SkipOutcome::Skipped(Advance::Playing(track)) if track.name == "a");
    assert_eq!(h.queue_names().await, vec!["b"]);

    assert_eq!(h.transport.played(), vec!["a", "b", "a"]);
}

#[tokio::test]
async fn play_by_name_starts_that_track_immediately() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);

    let (queued, started) = h.play(Some("b")).await.unwrap();

    assert_matches!(queued, EnqueueOutcome::Queued(track) if track.name == "b");
    assert_matches!(
        started,
        Some(StartOutcome::Started(Advance::Playing(track))) if track.name == "b"
    );
    assert!(h.queue_names().await.is_empty());
    assert_eq!(h.player.status().await, PlaybackStatus::Playing);
}

#[tokio::test]
async fn play_by_name_while_playing_only_queues() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(Some("a")).await.unwrap();

    let (_, started) = h.play(Some("b")).await.unwrap();

    assert_eq!(started, Some(StartOutcome::AlreadyPlaying));
    assert_eq!(h.queue_names().await, vec!["b"]);
    assert_eq!(h.transport.connects(), 1);
}

#[tokio::test]
async fn unknown_track_is_reported_without_touching_state() {
    let h = Harness::new(&["a.mp3"]);

    let (queued, started) = h.play(Some("nope")).await.unwrap();

    assert_eq!(
        queued,
        EnqueueOutcome::NotFound {
            name: "nope".into(),
            available: vec!["a".into()],
        }
    );
    assert_eq!(started, None);
    assert!(h.queue_names().await.is_empty());
    assert!(!h.player.is_playing().await);
    assert_eq!(h.transport.connects(), 0);
}

#[tokio::test]
async fn play_without_name_on_empty_catalog_does_nothing() {
    let h = Harness::new(&[]);

    let (queued, started) = h.play(None).await.unwrap();

    assert_eq!(queued, EnqueueOutcome::CatalogEmpty);
    assert_eq!(started, None);
    assert_eq!(h.transport.connects(), 0);
}

#[tokio::test]
async fn nameless_play_while_playing_appends_whole_catalog() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(None).await.unwrap();

    let (queued, started) = h.play(None).await.unwrap();

    assert_eq!(queued, EnqueueOutcome::QueuedCatalog(2));
    assert_eq!(started, Some(StartOutcome::AlreadyPlaying));
    assert_eq!(h.queue_names().await, vec!["b", "a", "b"]);
}

#[tokio::test]
async fn natural_end_advances_to_next_track() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(None).await.unwrap();

    h.transport.last_started().finish();
    assert_eq!(h.drain_signals().await, 1);

    assert_eq!(h.transport.played(), vec!["a", "b"]);
    assert!(h.queue_names().await.is_empty());
    assert_eq!(h.transport.open_connections(), 1);
}

#[tokio::test]
async fn end_of_a_skipped_track_is_ignored() {
    let mut h = Harness::new(&["a.mp3", "b.mp3", "c.mp3"]);
    h.play(None).await.unwrap();
    h.player.skip(h.announcer()).await.unwrap();

    // The replaced player reports its end late
    h.transport.started(0).finish();
    h.drain_signals().await;

    assert_eq!(h.transport.played(), vec!["a", "b"]);
    assert_eq!(h.queue_names().await, vec!["c"]);
}

#[tokio::test]
async fn end_after_stop_is_ignored() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(None).await.unwrap();
    assert_eq!(h.player.stop().await, ControlOutcome::Stopped);

    h.transport.last_started().finish();
    h.drain_signals().await;

    assert_eq!(h.transport.played(), vec!["a"]);
    assert_eq!(h.transport.open_connections(), 0);
    assert!(!h.player.is_playing().await);
}

#[tokio::test]
async fn playback_error_is_announced_and_skipped() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(None).await.unwrap();

    h.transport.last_started().fail("corrupt frame");
    h.drain_signals().await;

    assert_eq!(h.transport.played(), vec!["a", "b"]);
    assert_eq!(
        h.announcer.messages(),
        vec![
            "🎵 Now playing: **a**".to_string(),
            "❌ There was an error playing the track, skipping to the next one.".to_string(),
            "🎵 Now playing: **b**".to_string(),
        ]
    );
}

#[tokio::test]
async fn repeated_failures_stop_playback() {
    let mut h = Harness::with_settings(
        &["a.mp3", "b.mp3"],
        PlayerSettings {
            max_consecutive_failures: 2,
        },
    );
    h.play(None).await.unwrap();

    h.transport.last_started().fail("bad");
    h.drain_signals().await;
    h.transport.last_started().fail("bad");
    h.drain_signals().await;

    assert!(!h.player.is_playing().await);
    assert_eq!(h.transport.open_connections(), 0);
    assert_eq!(h.transport.played(), vec!["a", "b"]);
    assert!(
        h.announcer
            .messages()
            .last()
            .is_some_and(|m| m.contains("2 tracks in a row"))
    );
}

#[tokio::test]
async fn a_clean_finish_resets_the_failure_count() {
    let mut h = Harness::with_settings(
        &["a.mp3", "b.mp3", "c.mp3"],
        PlayerSettings {
            max_consecutive_failures: 2,
        },
    );
    h.play(None).await.unwrap();

    h.transport.last_started().fail("bad");
    h.drain_signals().await;
    h.transport.last_started().finish();
    h.drain_signals().await;
    h.transport.last_started().fail("bad");
    h.drain_signals().await;

    assert!(h.player.is_playing().await);
    assert_eq!(h.transport.played(), vec!["a", "b", "c", "a"]);
}

#[tokio::test]
async fn catalog_exhaustion_goes_idle() {
    let mut h = Harness::new(&["a.mp3"]);
    h.play(None).await.unwrap();
    h.catalog.remove("a.mp3");

    h.transport.last_started().finish();
    h.drain_signals().await;

    assert!(!h.player.is_playing().await);
    assert_eq!(h.transport.connects(), 1);
    assert_eq!(h.transport.open_connections(), 0);
    assert_eq!(
        h.announcer.messages().last().map(String::as_str),
        Some("📭 The queue is empty and there are no tracks available to play.")
    );
}

#[tokio::test]
async fn pause_and_resume_follow_player_status() {
    let h = Harness::new(&["a.mp3"]);
    h.play(None).await.unwrap();

    assert_eq!(h.player.resume().await.unwrap(), ControlOutcome::AlreadyPlaying);
    assert_eq!(h.player.pause().await.unwrap(), ControlOutcome::Paused);
    assert_eq!(h.player.status().await, PlaybackStatus::Paused);
    assert_eq!(h.player.pause().await.unwrap(), ControlOutcome::AlreadyPaused);
    assert_eq!(h.player.resume().await.unwrap(), ControlOutcome::Resumed);
    assert_eq!(h.player.status().await, PlaybackStatus::Playing);
}

#[tokio::test]
async fn pause_while_idle_reports_nothing_playing() {
    let h = Harness::new(&["a.mp3"]);

    assert_eq!(h.player.pause().await.unwrap(), ControlOutcome::NothingPlaying);
    assert_eq!(h.transport.connects(), 0);
    assert_eq!(h.player.status().await, PlaybackStatus::Idle);
}

#[tokio::test]
async fn skip_while_idle_reports_nothing_playing() {
    let h = Harness::new(&["a.mp3"]);

    assert_eq!(
        h.player.skip(h.announcer()).await.unwrap(),
        SkipOutcome::NothingPlaying
    );
    assert_eq!(h.transport.connects(), 0);
}

#[tokio::test]
async fn stop_clears_queue_and_leaves() {
    let h = Harness::new(&["a.mp3", "b.mp3", "c.mp3"]);
    h.play(None).await.unwrap();

    assert_eq!(h.player.stop().await, ControlOutcome::Stopped);

    assert!(h.queue_names().await.is_empty());
    assert_eq!(h.transport.open_connections(), 0);
    assert_eq!(h.player.status().await, PlaybackStatus::Idle);
    assert_eq!(h.player.stop().await, ControlOutcome::NothingPlaying);
}

#[tokio::test]
async fn play_after_stop_starts_fresh() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(None).await.unwrap();
    h.player.stop().await;

    h.play(Some("b")).await.unwrap();

    assert_eq!(h.transport.played(), vec!["a", "b"]);
    assert!(h.queue_names().await.is_empty());
    assert_eq!(h.transport.open_connections(), 1);
}

#[tokio::test]
async fn leave_disconnects_and_clears_queue() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(None).await.unwrap();

    assert_eq!(h.player.leave().await, ControlOutcome::Left);
    assert!(h.queue_names().await.is_empty());
    assert_eq!(h.transport.open_connections(), 0);
    assert_eq!(h.player.leave().await, ControlOutcome::NotConnected);
}

#[tokio::test]
async fn failed_connection_is_reported_and_idle() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);
    h.transport.fail_connects(true);

    let result = h.play(Some("a")).await;

    assert_matches!(result, Err(MusicError::JoinError(_)));
    assert!(!h.player.is_playing().await);
    assert_eq!(h.transport.open_connections(), 0);
    assert_eq!(h.queue_names().await, vec!["a"]);
}

#[tokio::test]
async fn track_kept_after_failed_connection_plays_on_retry() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);
    h.transport.fail_connects(true);
    let _ = h.play(Some("b")).await;

    h.transport.fail_connects(false);
    h.play(None).await.unwrap();

    assert_eq!(h.transport.played(), vec!["b"]);
    assert_eq!(h.queue_names().await, vec!["a", "b"]);
}

#[tokio::test]
async fn every_track_plays_in_the_requesting_channel() {
    let h = Harness::new(&["a.mp3", "b.mp3"]);
    h.play(None).await.unwrap();
    h.player.skip(h.announcer()).await.unwrap();

    let channels = h.transport.connected_channels();
    assert_eq!(channels.len(), 2);
    assert!(channels.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn refill_picks_up_tracks_added_since_start() {
    let h = Harness::new(&["a.mp3"]);
    h.play(None).await.unwrap();
    h.catalog.add("b.mp3");

    h.player.skip(h.announcer()).await.unwrap();

    assert_eq!(h.transport.played(), vec!["a", "a"]);
    assert_eq!(h.queue_names().await, vec!["b"]);
}

use std::time::Duration;

use chrono::{TimeZone, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, seq::SliceRandom};

use crate::types::{PlaylistItem, Track};

/// Size of the playlist page sampled for seed tracks.
pub const SEED_PAGE_LIMIT: u64 = 50;
/// Spotify accepts at most five seeds per recommendation request.
pub const MAX_SEED_TRACKS: usize = 5;

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Picks a page offset so that a full page of `SEED_PAGE_LIMIT` items fits
/// inside a playlist of `total` tracks.
///
/// Playlists of up to one page always start at 0; larger ones get a uniform
/// offset in `0..=total - SEED_PAGE_LIMIT`.
pub fn random_offset<R: Rng + ?Sized>(total: u64, rng: &mut R) -> u64 {
    if total > SEED_PAGE_LIMIT {
        rng.random_range(0..=total - SEED_PAGE_LIMIT)
    } else {
        0
    }
}

/// Shuffles the playable tracks of a playlist page and keeps at most
/// `MAX_SEED_TRACKS` of them.
pub fn pick_seed_tracks<R: Rng + ?Sized>(items: Vec<PlaylistItem>, rng: &mut R) -> Vec<Track> {
    let mut tracks: Vec<Track> = items
        .into_iter()
        .filter_map(|item| item.track)
        .filter(|track| track.id.is_some())
        .collect();

    tracks.shuffle(rng);
    tracks.truncate(MAX_SEED_TRACKS);
    tracks
}

/// Comma separated track ids, in seed order.
pub fn seed_query_param(seeds: &[Track]) -> String {
    seeds
        .iter()
        .filter_map(|track| track.id.as_deref())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn suggestion_playlist_name(source: &str) -> String {
    format!("Suggestions based on {}", source)
}

pub fn join_artist_names(track: &Track) -> String {
    track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `m:ss`
pub fn format_duration_ms(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn format_epoch_ms(ms: i64) -> String {
    match Utc.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => ms.to_string(),
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

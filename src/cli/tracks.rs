use tabled::Table;

use crate::{
    cli::{client, load_config},
    error, info, spotify,
    types::{AudioFeatures, Paging, TimeRange, Track, TrackTableRow},
    utils, warning,
};

pub(crate) fn track_row(track: &Track) -> TrackTableRow {
    TrackTableRow {
        name: track.name.clone(),
        artists: utils::join_artist_names(track),
        popularity: track
            .popularity
            .map(|p| p.to_string())
            .unwrap_or_default(),
    }
}

pub async fn top_tracks(limit: u32, time_range: TimeRange) {
    let config = load_config();
    let client = client(&config).await;

    let pb = utils::spinner("Fetching top tracks...");
    let result = match client.get_top_tracks(limit, time_range).await {
        Ok(res) => spotify::decode::<Paging<Track>>(res).await,
        Err(e) => Err(e),
    };
    pb.finish_and_clear();

    let page = match result {
        Ok(page) => page,
        Err(e) => error!("Failed to fetch top tracks: {}", e),
    };

    if page.items.is_empty() {
        info!("No top tracks for {}", time_range);
        return;
    }

    let rows: Vec<TrackTableRow> = page.items.iter().map(track_row).collect();
    println!("{}", Table::new(rows));
}

pub async fn track(id: String) {
    let config = load_config();
    let client = client(&config).await;

    let (track_res, features_res) = match client.get_track(&id).await {
        Ok(responses) => responses,
        Err(e) => error!("Failed to fetch track {}: {}", id, e),
    };

    let track = match spotify::decode::<Track>(track_res).await {
        Ok(track) => track,
        Err(e) => error!("Failed to fetch track {}: {}", id, e),
    };

    println!("{}", Table::new(vec![track_row(&track)]));
    if let Some(album) = &track.album {
        info!("Album: {}", album.name);
    }
    if let Some(ms) = track.duration_ms {
        info!("Duration: {}", utils::format_duration_ms(ms));
    }

    match spotify::decode::<AudioFeatures>(features_res).await {
        Ok(f) => {
            info!(
                "Tempo {:.0} bpm, key {}, mode {}, time signature {}",
                f.tempo,
                f.key,
                f.mode,
                f.time_signature
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            info!(
                "Danceability {:.2}, energy {:.2}, valence {:.2}, acousticness {:.2}",
                f.danceability, f.energy, f.valence, f.acousticness
            );
            info!(
                "Instrumentalness {:.2}, liveness {:.2}, speechiness {:.2}, loudness {:.1} dB",
                f.instrumentalness, f.liveness, f.speechiness, f.loudness
            );
        }
        Err(e) => warning!("Audio features unavailable: {}", e),
    }
}

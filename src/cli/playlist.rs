use tabled::Table;

use crate::{
    cli::{client, load_config, tracks::track_row},
    error, info, spotify,
    types::{Paging, Playlist, PlaylistTableRow, Recommendations, TrackTableRow},
    success, utils,
};

pub async fn playlists() {
    let config = load_config();
    let client = client(&config).await;

    let pb = utils::spinner("Fetching playlists...");
    let result = match client.get_playlists().await {
        Ok(res) => spotify::decode::<Paging<Playlist>>(res).await,
        Err(e) => Err(e),
    };
    pb.finish_and_clear();

    let page = match result {
        Ok(page) => page,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    if page.items.is_empty() {
        info!("No playlists found");
        return;
    }

    let rows: Vec<PlaylistTableRow> = page
        .items
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name,
            tracks: p.tracks.total,
        })
        .collect();
    println!("{}", Table::new(rows));
}

/// Matches by id first, then by case-insensitive name.
fn find_playlist(items: Vec<Playlist>, query: &str) -> Option<Playlist> {
    let by_id = items.iter().position(|p| p.id == query);
    let by_name = || {
        items
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(query))
    };
    let index = by_id.or_else(by_name)?;
    items.into_iter().nth(index)
}

pub async fn recommend(query: String, target_popularity: u8, save: bool) {
    let config = load_config();
    let client = client(&config).await;

    let playlists = match client.get_playlists().await {
        Ok(res) => spotify::decode::<Paging<Playlist>>(res).await,
        Err(e) => Err(e),
    };
    let playlists = match playlists {
        Ok(page) => page.items,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    let Some(playlist) = find_playlist(playlists, &query) else {
        error!("No playlist named or identified by '{}'", query);
    };

    let pb = utils::spinner(&format!("Sampling '{}'...", playlist.name));
    let result = match client
        .get_recommendations(&playlist, target_popularity)
        .await
    {
        Ok(res) => spotify::decode::<Recommendations>(res).await,
        Err(e) => Err(e),
    };
    pb.finish_and_clear();

    let recommendations = match result {
        Ok(r) => r,
        Err(e) => error!("Failed to fetch recommendations: {}", e),
    };

    if recommendations.tracks.is_empty() {
        info!("No recommendations for '{}'", playlist.name);
        return;
    }

    let rows: Vec<TrackTableRow> = recommendations.tracks.iter().map(track_row).collect();
    println!("{}", Table::new(rows));

    if !save {
        return;
    }

    match client
        .add_playlist(&playlist, &recommendations.tracks)
        .await
    {
        Ok(created) => success!(
            "Created playlist '{}' with {} tracks",
            created.name,
            recommendations.tracks.len()
        ),
        Err(e) => error!("Failed to save recommendations: {}", e),
    }
}

use tabled::Table;

use crate::{
    cli::{client, load_config},
    error, info, spotify,
    types::{Artist, ArtistTableRow, Paging, TimeRange},
    utils,
};

fn artist_row(artist: Artist) -> ArtistTableRow {
    ArtistTableRow {
        name: artist.name,
        genres: artist.genres.join(", "),
        popularity: artist
            .popularity
            .map(|p| p.to_string())
            .unwrap_or_default(),
    }
}

pub async fn top_artists(limit: u32, time_range: TimeRange) {
    let config = load_config();
    let client = client(&config).await;

    let pb = utils::spinner("Fetching top artists...");
    let result = match client.get_top_artists(limit, time_range).await {
        Ok(res) => spotify::decode::<Paging<Artist>>(res).await,
        Err(e) => Err(e),
    };
    pb.finish_and_clear();

    let page = match result {
        Ok(page) => page,
        Err(e) => error!("Failed to fetch top artists: {}", e),
    };

    if page.items.is_empty() {
        info!("No top artists for {}", time_range);
        return;
    }

    let rows: Vec<ArtistTableRow> = page.items.into_iter().map(artist_row).collect();
    println!("{}", Table::new(rows));
}

pub async fn artist(id: String) {
    let config = load_config();
    let client = client(&config).await;

    let artist = match client.get_artist(&id).await {
        Ok(res) => spotify::decode::<Artist>(res).await,
        Err(e) => Err(e),
    };

    match artist {
        Ok(artist) => {
            let followers = artist.followers.as_ref().map(|f| f.total);
            println!("{}", Table::new(vec![artist_row(artist)]));
            if let Some(total) = followers {
                info!("Followers: {}", total);
            }
        }
        Err(e) => error!("Failed to fetch artist {}: {}", id, e),
    }
}

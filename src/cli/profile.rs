use crate::{
    cli::{client, load_config},
    error, info, spotify,
    types::{Paging, Playlist, UserProfile},
    utils,
};

pub async fn profile() {
    let config = load_config();
    let client = client(&config).await;

    let pb = utils::spinner("Fetching profile...");
    let user = match client.get_current_user_profile().await {
        Ok(res) => spotify::decode::<UserProfile>(res).await,
        Err(e) => Err(e),
    };
    let playlists = match client.get_user_num_playlists().await {
        Ok(res) => spotify::decode::<Paging<Playlist>>(res).await,
        Err(e) => Err(e),
    };
    pb.finish_and_clear();

    let user = match user {
        Ok(user) => user,
        Err(e) => error!("Failed to fetch profile: {}", e),
    };

    info!(
        "{} ({})",
        user.display_name.as_deref().unwrap_or(&user.id),
        user.id
    );
    if let Some(followers) = &user.followers {
        info!("Followers: {}", followers.total);
    }
    if let Some(product) = &user.product {
        info!("Plan: {}", product);
    }
    match playlists {
        Ok(page) => info!(
            "Playlists: {}",
            page.total.unwrap_or(page.items.len() as u64)
        ),
        Err(e) => info!("Playlists: unavailable ({})", e),
    }
}

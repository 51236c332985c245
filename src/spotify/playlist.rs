use rand::{Rng, SeedableRng, rngs::StdRng};
use reqwest::Response;

use crate::{
    error::ApiError,
    types::{
        AddTrackToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse, Paging,
        Playlist, PlaylistItem, Track, UserProfile,
    },
    utils,
};

use super::SpotifyClient;

pub const RECOMMENDATION_LIMIT: u32 = 25;
pub const GENERATED_DESCRIPTION: &str = "Generated Playlist";

impl SpotifyClient {
    /// `GET /me/playlists`
    pub async fn get_playlists(&self) -> Result<Response, ApiError> {
        Ok(self.get("me/playlists").send().await?)
    }

    /// Requests recommendations seeded from a random sample of `playlist`.
    ///
    /// See [`SpotifyClient::get_recommendations_with`] for the steps.
    pub async fn get_recommendations(
        &self,
        playlist: &Playlist,
        target_popularity: u8,
    ) -> Result<Response, ApiError> {
        let mut rng = StdRng::from_os_rng();
        self.get_recommendations_with(playlist, target_popularity, &mut rng)
            .await
    }

    /// Requests recommendations seeded from a random sample of `playlist`,
    /// drawing randomness from `rng`.
    ///
    /// 1. Fetches one page of up to 50 items at a random offset that keeps
    ///    the page inside the playlist.
    /// 2. Shuffles the page and keeps up to five tracks as seeds.
    /// 3. Asks `/recommendations` for 25 tracks near `target_popularity`.
    ///
    /// The recommendation response is returned untouched. The playlist page
    /// itself must decode, otherwise there would be nothing to seed with.
    pub async fn get_recommendations_with<R: Rng + ?Sized>(
        &self,
        playlist: &Playlist,
        target_popularity: u8,
        rng: &mut R,
    ) -> Result<Response, ApiError> {
        let offset = utils::random_offset(playlist.tracks.total, rng);

        let page = self
            .get(&format!("playlists/{}/tracks", playlist.id))
            .query(&[
                ("offset", offset.to_string()),
                ("limit", utils::SEED_PAGE_LIMIT.to_string()),
            ])
            .send()
            .await?
            .json::<Paging<PlaylistItem>>()
            .await?;

        let seeds = utils::pick_seed_tracks(page.items, rng);
        tracing::debug!(
            playlist = %playlist.id,
            offset,
            seeds = seeds.len(),
            "seeding recommendations"
        );

        Ok(self
            .get("recommendations")
            .query(&[
                ("seed_tracks", utils::seed_query_param(&seeds)),
                ("target_popularity", target_popularity.to_string()),
                ("limit", RECOMMENDATION_LIMIT.to_string()),
            ])
            .send()
            .await?)
    }

    /// Saves `tracks` into a new private playlist named after `playlist`.
    ///
    /// Runs three requests in order: look up the current user, create
    /// "Suggestions based on <name>", then add every track uri in one call.
    /// Nothing is rolled back when the last step fails, and its status is not
    /// inspected.
    pub async fn add_playlist(
        &self,
        playlist: &Playlist,
        tracks: &[Track],
    ) -> Result<CreatePlaylistResponse, ApiError> {
        let user = self
            .get_current_user_profile()
            .await?
            .json::<UserProfile>()
            .await?;

        let request = CreatePlaylistRequest {
            name: utils::suggestion_playlist_name(&playlist.name),
            description: GENERATED_DESCRIPTION.to_string(),
            public: false,
        };

        let created = self
            .post(&format!("users/{}/playlists", user.id))
            .json(&request)
            .send()
            .await?
            .json::<CreatePlaylistResponse>()
            .await?;

        let body = AddTrackToPlaylistRequest {
            uris: tracks.iter().map(|t| t.uri.clone()).collect(),
        };
        self.post(&format!("playlists/{}/tracks", created.id))
            .json(&body)
            .send()
            .await?;

        Ok(created)
    }
}

use reqwest::Response;

use crate::{error::ApiError, types::TimeRange};

use super::SpotifyClient;

pub const DEFAULT_TOP_LIMIT: u32 = 10;

impl SpotifyClient {
    /// Retrieves the current user's top artists.
    ///
    /// # Arguments
    ///
    /// * `limit` - Number of artists in the page (Spotify allows 1-50)
    /// * `time_range` - Window the ranking is computed over
    ///
    /// # Returns
    ///
    /// The raw response of `GET /me/top/artists?time_range=..&limit=..`. A
    /// successful body is a `Paging<Artist>`.
    pub async fn get_top_artists(
        &self,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<Response, ApiError> {
        Ok(self
            .get("me/top/artists")
            .query(&[
                ("time_range", time_range.as_str().to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?)
    }

    /// `GET /artists/{id}`
    pub async fn get_artist(&self, id: &str) -> Result<Response, ApiError> {
        Ok(self.get(&format!("artists/{id}")).send().await?)
    }
}

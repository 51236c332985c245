use reqwest::Response;

use crate::{error::ApiError, types::TimeRange};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the current user's top tracks, see
    /// [`SpotifyClient::get_top_artists`] for the parameters.
    pub async fn get_top_tracks(
        &self,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<Response, ApiError> {
        Ok(self
            .get("me/top/tracks")
            .query(&[
                ("time_range", time_range.as_str().to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?)
    }

    /// Fetches track metadata and audio features concurrently.
    ///
    /// Both requests are issued at once and joined; the first transport error
    /// wins. The responses are returned as `(track, audio_features)`.
    pub async fn get_track(&self, id: &str) -> Result<(Response, Response), ApiError> {
        let track = self.get(&format!("tracks/{id}")).send();
        let features = self.get(&format!("audio-features/{id}")).send();

        let (track, features) = tokio::try_join!(track, features)?;
        Ok((track, features))
    }
}

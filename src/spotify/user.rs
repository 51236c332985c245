use reqwest::Response;

use crate::error::ApiError;

use super::SpotifyClient;

impl SpotifyClient {
    /// `GET /me`
    pub async fn get_current_user_profile(&self) -> Result<Response, ApiError> {
        Ok(self.get("me").send().await?)
    }

    /// `GET /me/playlists`; callers read the `total` of the returned page.
    pub async fn get_user_num_playlists(&self) -> Result<Response, ApiError> {
        Ok(self.get("me/playlists").send().await?)
    }
}

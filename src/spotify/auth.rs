use std::{sync::Arc, time::Duration};

use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderValue},
};
use tokio::sync::Mutex;
use url::Url;

use crate::{
    config::Config,
    error::{SessionError, StoreError},
    server::start_api_server,
    storage::{
        ACCESS_TOKEN_KEY, EXPIRE_TIME_KEY, FileStore, REFRESH_TOKEN_KEY, StoredTokens,
        TIMESTAMP_KEY, TOKEN_KEYS, TokenRecord, TokenStore,
    },
    types::{LoginParams, RefreshResponse},
    utils, warning,
};

use super::SpotifyClient;

/// How long `login` waits for the browser to come back.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Validity of the session's token.
///
/// `Invalid` is terminal: it is entered when a refresh fails, after which the
/// stored tokens are gone and the session refuses further use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    Valid,
    Expired,
    RefreshInFlight,
    Invalid,
}

/// Sends the user somewhere else, typically back to the application root.
pub trait Navigator: Send + Sync {
    fn redirect(&self, location: &Url);
}

/// Navigator for terminal use: tells the user where to sign in again.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect(&self, location: &Url) {
        warning!(
            "Session ended. Run `spotrec login` to sign in again (callback at {}).",
            location
        );
    }
}

/// Session used by the command line: file storage, console navigation.
pub type AppSession = Session<FileStore, ConsoleNavigator>;

/// Navigator of the session behind an interactive login.
///
/// The login command reports the outcome itself, so a redirect is only
/// traced.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginNavigator;

impl Navigator for LoginNavigator {
    fn redirect(&self, location: &Url) {
        tracing::info!(%location, "login session cleared");
    }
}

/// Session receiving the tokens of an interactive login.
pub type LoginSession = Session<FileStore, LoginNavigator>;

/// Owns the token source and its lifecycle.
///
/// Storage is read again on every call so that another process refreshing or
/// logging out is noticed immediately.
pub struct Session<S, N> {
    store: S,
    navigator: N,
    http: Client,
    refresh_url: String,
    origin: Url,
    state: TokenState,
}

impl AppSession {
    pub fn from_config(config: &Config) -> Self {
        Session::new(
            FileStore::new(config.storage_path.clone()),
            ConsoleNavigator,
            config.refresh_url(),
            config.origin.clone(),
        )
    }
}

impl LoginSession {
    pub fn from_config(config: &Config) -> Self {
        Session::new(
            FileStore::new(config.storage_path.clone()),
            LoginNavigator,
            config.refresh_url(),
            config.origin.clone(),
        )
    }
}

impl<S: TokenStore, N: Navigator> Session<S, N> {
    pub fn new(store: S, navigator: N, refresh_url: impl Into<String>, origin: Url) -> Self {
        Self {
            store,
            navigator,
            http: Client::new(),
            refresh_url: refresh_url.into(),
            origin,
            state: TokenState::NoToken,
        }
    }

    pub fn state(&self) -> TokenState {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn stored_tokens(&self) -> Result<StoredTokens, StoreError> {
        StoredTokens::load(&self.store).await
    }

    pub async fn token_record(&self) -> Result<Option<TokenRecord>, StoreError> {
        Ok(self.stored_tokens().await?.record())
    }

    /// Returns a usable access token.
    ///
    /// In order of precedence:
    /// 1. an `error` in `params`, an expired stored token, or a stored token
    ///    of `undefined` triggers a refresh and yields its result;
    /// 2. a usable stored token is returned as is;
    /// 3. an `access_token` in `params` (first login) is persisted together
    ///    with its refresh token, lifetime and the current time;
    /// 4. otherwise the user is not logged in.
    pub async fn get_access_token(&mut self, params: &LoginParams) -> Result<String, SessionError> {
        if self.state == TokenState::Invalid {
            return Err(SessionError::Invalidated);
        }

        let stored = self.stored_tokens().await?;

        if let Some(error) = &params.error {
            tracing::warn!(%error, "login redirect reported an error");
        }
        if params.error.is_some()
            || stored.has_expired_at(utils::now_millis())
            || stored.is_access_token_undefined()
        {
            self.state = TokenState::Expired;
            return self.refresh_token().await;
        }

        if let Some(token) = stored.usable_access_token() {
            self.state = TokenState::Valid;
            return Ok(token.to_string());
        }

        if let Some(token) = params.access_token.as_deref().filter(|t| !t.is_empty()) {
            self.store.set_item(ACCESS_TOKEN_KEY, token).await?;
            if let Some(refresh) = &params.refresh_token {
                self.store.set_item(REFRESH_TOKEN_KEY, refresh).await?;
            }
            if let Some(expires_in) = &params.expires_in {
                self.store.set_item(EXPIRE_TIME_KEY, expires_in).await?;
            }
            self.store
                .set_item(TIMESTAMP_KEY, &utils::now_millis().to_string())
                .await?;

            tracing::info!("stored tokens from login redirect");
            self.state = TokenState::Valid;
            return Ok(token.to_string());
        }

        self.state = TokenState::NoToken;
        Err(SessionError::NotLoggedIn)
    }

    /// Builds an API client around the current access token.
    pub async fn client(&mut self, api_url: &str) -> Result<SpotifyClient, SessionError> {
        let token = self.get_access_token(&LoginParams::default()).await?;
        Ok(SpotifyClient::new(api_url, token))
    }

    pub async fn has_token_expired(&self) -> Result<bool, StoreError> {
        Ok(self.stored_tokens().await?.has_expired_at(utils::now_millis()))
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// Any failure is logged, clears every stored entry and redirects to the
    /// origin before the error is returned. There is no retry.
    pub async fn refresh_token(&mut self) -> Result<String, SessionError> {
        self.state = TokenState::RefreshInFlight;

        match self.request_refresh().await {
            Ok(token) => {
                tracing::info!("access token refreshed");
                self.state = TokenState::Valid;
                Ok(token)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to refresh access token, logging out");
                self.state = TokenState::Invalid;
                if let Err(clear_err) = self.logout().await {
                    tracing::error!(error = %clear_err, "failed to clear stored tokens");
                }
                Err(e)
            }
        }
    }

    async fn request_refresh(&mut self) -> Result<String, SessionError> {
        let stored = self.stored_tokens().await?;
        let refresh_token = stored
            .usable_refresh_token()
            .ok_or(SessionError::MissingRefreshToken)?;

        let mut request = self
            .http
            .get(&self.refresh_url)
            .query(&[("refresh_token", refresh_token)])
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(access_token) = stored.access_token.as_deref() {
            request = request.bearer_auth(access_token);
        }

        let text = request.send().await?.error_for_status()?.text().await?;
        let body: RefreshResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(error = %e, "refresh response is not valid json");
            SessionError::RefreshResponseMalformed
        })?;

        let access_token = body
            .access_token
            .clone()
            .filter(|t| !t.is_empty() && t != crate::storage::UNDEFINED)
            .ok_or(SessionError::RefreshResponseMalformed)?;

        self.store.set_item(ACCESS_TOKEN_KEY, &access_token).await?;
        self.store
            .set_item(TIMESTAMP_KEY, &utils::now_millis().to_string())
            .await?;
        if let Some(expires_in) = body.expires_in_seconds() {
            self.store
                .set_item(EXPIRE_TIME_KEY, &expires_in.to_string())
                .await?;
        }
        if let Some(rotated) = body.refresh_token.filter(|t| !t.is_empty()) {
            self.store.set_item(REFRESH_TOKEN_KEY, &rotated).await?;
        }

        Ok(access_token)
    }

    /// Removes all four token entries without navigating anywhere.
    ///
    /// Every key is attempted; the first failure is reported.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        let mut first_err = None;
        for key in TOKEN_KEYS {
            if let Err(e) = self.store.remove_item(key).await {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Clears the stored tokens and redirects to the origin. The redirect
    /// happens even when clearing failed. Tokens are not revoked remotely.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        let cleared = self.clear().await;
        self.navigator.redirect(&self.origin);
        Ok(cleared?)
    }
}

/// A login waiting for the backend to redirect to the callback server.
///
/// `outcome` is set by the first callback, successful or not.
pub struct PendingLogin {
    pub session: LoginSession,
    pub outcome: Option<Result<String, SessionError>>,
}

impl PendingLogin {
    pub fn new(session: LoginSession) -> Self {
        Self {
            session,
            outcome: None,
        }
    }
}

pub type SharedLogin = Arc<Mutex<PendingLogin>>;

/// Runs the interactive login.
///
/// 1. Forgets any stored token so the redirect parameters are used.
/// 2. Starts the callback server on the configured address.
/// 3. Opens `{backend}/login` in the browser; the backend performs the OAuth
///    exchange and redirects to the callback with the tokens as query
///    parameters.
/// 4. Waits up to two minutes for the callback to store them, and returns
///    the callback's error as soon as it fails.
pub async fn login(config: &Config) -> Result<String, SessionError> {
    let mut session = LoginSession::from_config(config);
    session.clear().await?;

    let shared_state: SharedLogin = Arc::new(Mutex::new(PendingLogin::new(session)));

    let server_state = Arc::clone(&shared_state);
    let addr = config.server_addr;
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(addr, server_state).await {
            tracing::error!(error = %e, %addr, "callback server stopped");
        }
    });

    let login_url = config.login_url();
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    let outcome = wait_for_login(shared_state, LOGIN_TIMEOUT).await;
    server.abort();

    outcome.unwrap_or(Err(SessionError::LoginTimedOut))
}

/// Polls the shared login every 250 ms until the callback records an
/// outcome or `timeout` passes.
pub async fn wait_for_login(
    shared_state: SharedLogin,
    timeout: Duration,
) -> Option<Result<String, SessionError>> {
    use std::time::Instant;

    let start = Instant::now();

    loop {
        let mut lock = shared_state.lock().await;
        if let Some(outcome) = lock.outcome.take() {
            return Some(outcome);
        }
        drop(lock);

        if start.elapsed() >= timeout {
            return None;
        }
        tokio::time::sleep(Duration::from_millis(250).min(timeout)).await;
    }
}

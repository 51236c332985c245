use crate::{
    cli::load_config, error, info, spotify, spotify::auth::AppSession, success, utils, warning,
};

pub async fn login() {
    let config = load_config();
    info!("Opening {} to sign in with Spotify...", config.login_url());

    match spotify::auth::login(&config).await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed: {}", e),
    }
}

pub async fn logout() {
    let config = load_config();
    let mut session = AppSession::from_config(&config);

    match session.logout().await {
        Ok(()) => success!("Stored tokens removed."),
        Err(e) => error!("Failed to remove stored tokens: {}", e),
    }
}

pub async fn status() {
    let config = load_config();
    let session = AppSession::from_config(&config);

    let stored = match session.stored_tokens().await {
        Ok(stored) => stored,
        Err(e) => error!("Failed to read token storage: {}", e),
    };

    let Some(record) = stored.record() else {
        if stored == Default::default() {
            info!("Not logged in.");
        } else {
            warning!("Token storage is incomplete. Run spotrec login to start over.");
        }
        return;
    };

    info!("Token storage: {}", config.storage_path.display());
    info!("Issued at:  {}", utils::format_epoch_ms(record.issued_at_epoch_ms));
    info!("Expires at: {}", utils::format_epoch_ms(record.expires_at_epoch_ms()));

    if stored.has_expired_at(utils::now_millis()) {
        warning!("Access token has expired; it will be refreshed on the next request.");
    } else {
        success!("Access token is valid.");
    }
}

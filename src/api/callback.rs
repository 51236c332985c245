use axum::{Extension, extract::Query, response::Html};

use crate::{spotify::auth::SharedLogin, types::LoginParams};

/// Target of the backend's post-login redirect.
///
/// Hands the query parameters to the pending session, which persists the
/// tokens, and records the outcome for the waiting login. Only the first
/// callback counts.
pub async fn callback(
    Query(params): Query<LoginParams>,
    Extension(shared_state): Extension<SharedLogin>,
) -> Html<&'static str> {
    let mut pending = shared_state.lock().await;
    if pending.outcome.is_some() {
        return Html("<h4>Login already handled.</h4>");
    }

    let result = pending.session.get_access_token(&params).await;
    let page = match &result {
        Ok(_) => Html("<h2>Authentication successful.</h2><p>Close browser window.</p>"),
        Err(e) => {
            tracing::warn!(error = %e, "login callback failed");
            Html("<h4>Login failed.</h4><p>Return to the terminal for details.</p>")
        }
    };
    pending.outcome = Some(result);
    page
}

use thiserror::Error;

use crate::persistence::{KeyValueStore, StoreError, USER_ID_KEY};

pub const LANDING_PAGE: &str = "landing.html";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Please enter a username.")]
    EmptyUsername,
    #[error("Could not save your username: {0}")]
    Storage(#[from] StoreError),
}

/// A saved username and the page to continue to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Login {
    pub user_id: String,
    pub redirect_to: &'static str,
}

/// Trims `raw`, stores it under `user_id` and hands back the redirect.
///
/// Blank input is rejected before the store is touched.
pub fn submit_username<S>(store: &mut S, raw: &str) -> Result<Login, LoginError>
where
    S: KeyValueStore + ?Sized,
{
    let username = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if username.is_empty() {
        return Err(LoginError::EmptyUsername);
    }

    store.set_item(USER_ID_KEY, username)?;
    log::debug!("saved user_id, redirecting to {LANDING_PAGE}");

    Ok(Login {
        user_id: username.to_string(),
        redirect_to: LANDING_PAGE,
    })
}

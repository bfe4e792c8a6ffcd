// User detail state.

use crate::model::UserDetail;

/// Profile being shown; cached data is kept on screen while a fetch runs.
#[derive(Debug, Clone, Default)]
pub struct UserDetailState {
    pub login: String,
    pub is_loading: bool,
    pub data: Option<UserDetail>,
}

impl UserDetailState {
    /// Start showing `login`, seeded with whatever the cache had.
    pub fn open(login: impl Into<String>, cached: Option<UserDetail>) -> Self {
        Self {
            login: login.into(),
            is_loading: true,
            data: cached,
        }
    }

    pub fn is_for(&self, login: &str) -> bool {
        self.login.eq_ignore_ascii_case(login)
    }

    pub fn set_loaded(&mut self, detail: UserDetail) {
        self.is_loading = false;
        self.data = Some(detail);
    }

    /// Fetch failed; keep any cached profile.
    pub fn set_failed(&mut self) {
        self.is_loading = false;
    }
}

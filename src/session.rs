use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::api::auth::AuthApi;
use crate::core::user::SessionUser;
use crate::wire::decode;

/// On-disk shape of the session file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    #[serde(default)]
    user: Option<SessionUser>,
}

struct SessionInner {
    path: Option<PathBuf>,
    token: RwLock<Option<String>>,
    user: RwLock<Option<SessionUser>>,
    login_required: AtomicBool,
}

/// Cloneable handle over the signed-in user and bearer token.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Bootstrap from a session file, tolerating a missing or unreadable one.
    pub fn load(path: PathBuf) -> Self {
        let mut token = None;
        let mut user = None;
        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<PersistedSession>(&text) {
                Ok(saved) => {
                    token = Some(saved.token);
                    user = saved.user;
                }
                Err(e) => {
                    log::warn!("Ignoring malformed session file {}: {}", path.display(), e);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                log::warn!("Failed to read session file {}: {}", path.display(), e);
            }
        }

        Self {
            inner: Arc::new(SessionInner {
                path: Some(path),
                token: RwLock::new(token),
                user: RwLock::new(user),
                login_required: AtomicBool::new(false),
            }),
        }
    }

    /// Session without a backing file.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                path: None,
                token: RwLock::new(None),
                user: RwLock::new(None),
                login_required: AtomicBool::new(false),
            }),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner.token.read().ok().and_then(|t| t.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.inner.user.read().ok().and_then(|u| u.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// True once a 401 has expired the session and nobody consumed the flag.
    pub fn login_required(&self) -> bool {
        self.inner.login_required.load(Ordering::SeqCst)
    }

    /// Read and reset the login-required flag.
    pub fn take_login_required(&self) -> bool {
        self.inner.login_required.swap(false, Ordering::SeqCst)
    }

    /// Store a fresh token + user pair, e.g. after login.
    pub fn set_session(&self, token: Option<String>, user: Option<SessionUser>) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = token.clone();
        }
        if let Ok(mut slot) = self.inner.user.write() {
            *slot = user;
        }
        if token.is_some() {
            self.inner.login_required.store(false, Ordering::SeqCst);
        }
        self.persist();
    }

    /// Replace only the cached user, keeping the token.
    pub fn set_user(&self, user: Option<SessionUser>) {
        if let Ok(mut slot) = self.inner.user.write() {
            *slot = user;
        }
        self.persist();
    }

    /// Drop token, user, and the session file.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = None;
        }
        if let Ok(mut slot) = self.inner.user.write() {
            *slot = None;
        }
        if let Some(path) = &self.inner.path {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to remove session file {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Invoked on any 401: wipe the session and flag that login is needed.
    pub(crate) fn expire(&self) {
        log::info!("Session expired; login required");
        self.clear();
        self.inner.login_required.store(true, Ordering::SeqCst);
    }

    /// Re-fetch the profile for the stored token. Never errors: a failed
    /// profile call means the token is stale, so the session is cleared.
    pub async fn refresh_user(&self, auth: &AuthApi) {
        if !self.is_authenticated() {
            self.set_user(None);
            return;
        }
        match auth.profile().await {
            Ok(body) => match decode::profile_user(&body) {
                Some(user) => self.set_user(Some(user)),
                None => {
                    log::warn!("Profile response carried no recognizable user");
                }
            },
            Err(e) => {
                log::warn!("Profile refresh failed, dropping session: {}", e);
                self.clear();
            }
        }
    }

    /// Remote logout, then clear local state whatever the server said.
    pub async fn logout(&self, auth: &AuthApi) {
        if let Err(e) = auth.logout().await {
            log::warn!("Logout request failed: {}", e);
        }
        self.clear();
    }

    fn persist(&self) {
        let Some(path) = &self.inner.path else {
            return;
        };
        let Some(token) = self.token() else {
            return;
        };
        let saved = PersistedSession {
            token,
            user: self.user(),
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create session dir {}: {}", parent.display(), e);
                return;
            }
        }
        match serde_json::to_string_pretty(&saved) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to write session file {}: {}", path.display(), e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize session: {}", e);
            }
        }
    }
}

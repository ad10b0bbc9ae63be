use super::LocalStorage;
use crate::api::{ApiClient, User};
use crate::error::Result;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const STORAGE_KEY: &str = "auth-store";

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub is_authed: bool,
    pub user: Option<User>,
    pub access_token: Option<String>,
    /// Whether the login/sign-up bubble is open.
    pub auth_open: bool,
}

/// The part of the session that survives restarts.
#[derive(Debug, Serialize, Deserialize)]
struct Persisted {
    access_token: Option<String>,
    user: Option<User>,
    is_authed: bool,
}

/// Authentication store. Keeps the shared [`ApiClient`] token in sync.
#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    storage: LocalStorage,
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new(api: ApiClient, storage: LocalStorage) -> Self {
        Self {
            api,
            storage,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn is_authed(&self) -> bool {
        self.state.read().is_authed
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn open_auth(&self) {
        self.state.write().auth_open = true;
    }

    pub fn close_auth(&self) {
        self.state.write().auth_open = false;
    }

    /// Restore a persisted token into the HTTP client at startup.
    pub fn initialize_from_storage(&self) -> Result<()> {
        let persisted: Option<Persisted> = self.storage.get_json(STORAGE_KEY)?;
        let mut state = self.state.write();
        if let Some(p) = persisted {
            state.access_token = p.access_token;
            state.user = p.user;
            state.is_authed = p.is_authed && state.access_token.is_some();
        }
        self.api.set_token(state.access_token.clone());
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let token = self.api.login(email, password).await?;
        self.api.set_token(Some(token.clone()));
        {
            let mut state = self.state.write();
            state.access_token = Some(token);
            state.is_authed = true;
        }
        self.persist()?;
        self.fetch_me().await
    }

    /// Server-side logout failures are ignored; local state is always cleared.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.api.logout().await {
            tracing::debug!("logout request failed: {e}");
        }
        self.clear()
    }

    pub async fn delete_account(&self) -> Result<()> {
        if let Err(e) = self.api.delete_account().await {
            tracing::debug!("delete account request failed: {e}");
        }
        self.logout().await
    }

    /// Sync the current user from `/be/auth/me`.
    ///
    /// No token is a no-op. A 401/403 drops the session; other failures are
    /// logged and leave the session untouched.
    pub async fn fetch_me(&self) -> Result<()> {
        if self.state.read().access_token.is_none() {
            return Ok(());
        }
        match self.api.me().await {
            Ok(me) => {
                {
                    let mut state = self.state.write();
                    state.user = Some(me);
                    state.is_authed = true;
                }
                self.persist()
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("stored session rejected, signing out locally");
                self.api.set_token(None);
                {
                    let mut state = self.state.write();
                    state.is_authed = false;
                    state.user = None;
                    state.access_token = None;
                }
                self.persist()
            }
            Err(e) => {
                tracing::debug!("fetch_me failed: {e}");
                Ok(())
            }
        }
    }

    /// `true` when signed in; otherwise opens the auth bubble.
    pub fn require_auth(&self) -> bool {
        if self.is_authed() {
            return true;
        }
        self.open_auth();
        false
    }

    fn clear(&self) -> Result<()> {
        self.api.set_token(None);
        *self.state.write() = SessionState::default();
        self.storage.remove(STORAGE_KEY)
    }

    fn persist(&self) -> Result<()> {
        let snapshot = {
            let state = self.state.read();
            Persisted {
                access_token: state.access_token.clone(),
                user: state.user.clone(),
                is_authed: state.is_authed,
            }
        };
        self.storage.set_json(STORAGE_KEY, &snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn store(storage: LocalStorage) -> SessionStore {
        let api = ApiClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: Some(1),
        })
        .unwrap();
        SessionStore::new(api, storage)
    }

    #[test]
    fn require_auth_opens_bubble_when_signed_out() {
        let session = store(LocalStorage::in_memory().unwrap());
        assert!(!session.require_auth());
        assert!(session.snapshot().auth_open);
        session.close_auth();
        assert!(!session.snapshot().auth_open);
    }

    #[test]
    fn restores_token_from_storage() {
        let storage = LocalStorage::in_memory().unwrap();
        storage
            .set(
                STORAGE_KEY,
                r#"{"access_token":"tok","user":{"id":1,"email":"a@b.kr"},"is_authed":true}"#,
            )
            .unwrap();
        let session = store(storage);
        session.initialize_from_storage().unwrap();
        assert!(session.is_authed());
        assert_eq!(session.api.token().as_deref(), Some("tok"));
        assert!(session.require_auth());
    }

    #[test]
    fn authed_flag_without_token_is_ignored() {
        let storage = LocalStorage::in_memory().unwrap();
        storage
            .set(STORAGE_KEY, r#"{"access_token":null,"user":null,"is_authed":true}"#)
            .unwrap();
        let session = store(storage);
        session.initialize_from_storage().unwrap();
        assert!(!session.is_authed());
    }

    #[tokio::test]
    async fn fetch_me_without_token_makes_no_call() {
        let session = store(LocalStorage::in_memory().unwrap());
        session.fetch_me().await.unwrap();
        assert_eq!(session.user(), None);
    }

    #[tokio::test]
    async fn logout_clears_even_when_server_unreachable() {
        let storage = LocalStorage::in_memory().unwrap();
        storage
            .set(STORAGE_KEY, r#"{"access_token":"tok","user":null,"is_authed":true}"#)
            .unwrap();
        let session = store(storage.clone());
        session.initialize_from_storage().unwrap();

        session.logout().await.unwrap();
        assert_eq!(session.snapshot(), SessionState::default());
        assert_eq!(session.api.token(), None);
        assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
    }
}

use crate::api::ApiClient;
use crate::forms::{LoginForm, SignupForm, SIGNUP_DONE};
use crate::store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// The account bubble: login and sign-up forms plus their status messages.
#[derive(Debug, Clone, Default)]
pub struct AuthPanel {
    pub mode: AuthMode,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub error: Option<String>,
    pub info: Option<String>,
}

impl AuthPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.error = None;
    }

    /// Returns `true` on success. Invalid forms are not submitted.
    pub async fn submit_login(&mut self, session: &SessionStore) -> bool {
        if !self.login.can_submit() {
            return false;
        }
        self.error = None;
        self.info = None;
        let values = self.login.form.values().clone();
        match session.login(&values.email, &values.password).await {
            Ok(()) => {
                self.login.form.reset();
                self.mode = AuthMode::Login;
                session.close_auth();
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                false
            }
        }
    }

    /// On success the panel switches back to login with a notice.
    pub async fn submit_signup(&mut self, api: &ApiClient) -> bool {
        if !self.signup.can_submit() {
            return false;
        }
        self.error = None;
        self.info = None;
        let values = self.signup.form.values().clone();
        match api.signup(&values.email, &values.password).await {
            Ok(created) => {
                tracing::info!(user_id = created.id, "account created");
                self.signup.reset();
                self.mode = AuthMode::Login;
                self.info = Some(SIGNUP_DONE.to_string());
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                false
            }
        }
    }

    pub async fn delete_account(&mut self, session: &SessionStore) -> bool {
        self.error = None;
        match session.delete_account().await {
            Ok(()) => {
                session.close_auth();
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                false
            }
        }
    }
}

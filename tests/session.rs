mod common;

use common::{Backend, PASSWORD, TOKEN};
use jeonsafe::forms::{Field, CONFIRM_MISMATCH, EMAIL_ERROR, PASSWORD_ERROR, SIGNUP_DONE};
use jeonsafe::shell::{display_name, AuthMode, AuthPanel};
use pretty_assertions::assert_eq;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn login_fetches_user_and_logout_clears() {
    let backend = Backend::start().await;
    let state = backend.state();
    assert!(!state.session.require_auth());
    assert!(state.session.snapshot().auth_open);

    let mut panel = AuthPanel::new();
    panel.login.form.change(Field::Email, "user@example.com");
    panel.login.form.change(Field::Password, PASSWORD);
    assert!(panel.submit_login(&state.session).await);

    let snap = state.session.snapshot();
    assert!(snap.is_authed);
    assert!(!snap.auth_open);
    assert_eq!(snap.access_token.as_deref(), Some(TOKEN));
    assert_eq!(state.api.token().as_deref(), Some(TOKEN));
    assert_eq!(display_name(snap.user.as_ref()), "홍길동");

    state.session.logout().await.unwrap();
    assert!(!state.session.is_authed());
    assert_eq!(state.api.token(), None);
    assert_eq!(backend.mock.logouts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_login_shows_server_message() {
    let backend = Backend::start().await;
    let state = backend.state();

    let mut panel = AuthPanel::new();
    panel.login.form.change(Field::Email, "user@example.com");
    panel.login.form.change(Field::Password, "wrong-password");
    assert!(!panel.submit_login(&state.session).await);
    assert_eq!(
        panel.error.as_deref(),
        Some("이메일 또는 비밀번호가 올바르지 않습니다.")
    );
    assert!(!state.session.is_authed());
}

#[tokio::test]
async fn stale_token_is_dropped_on_fetch_me() {
    let backend = Backend::start().await;
    let state = backend.signed_in().await;
    state.api.set_token(Some("expired".into()));

    state.session.fetch_me().await.unwrap();
    assert!(!state.session.is_authed());
    assert_eq!(state.session.user(), None);
}

#[tokio::test]
async fn signup_form_walkthrough() {
    let backend = Backend::start().await;
    let state = backend.state();
    let mut panel = AuthPanel::new();
    panel.set_mode(AuthMode::Signup);

    let form = &mut panel.signup;
    form.form.change(Field::Email, "new-user");
    assert_eq!(form.form.visible_error(Field::Email), None);
    form.form.blur(Field::Email);
    assert_eq!(form.form.visible_error(Field::Email), Some(EMAIL_ERROR));
    form.form.change(Field::Email, "new@example.com");
    assert_eq!(form.form.visible_error(Field::Email), None);

    form.form.change(Field::Password, "short");
    form.form.blur(Field::Password);
    assert_eq!(form.form.visible_error(Field::Password), Some(PASSWORD_ERROR));
    form.form.change(Field::Password, "longenough1");

    form.change_confirm("longenough2");
    form.blur_confirm();
    assert_eq!(form.confirm_error(), Some(CONFIRM_MISMATCH));
    assert!(!form.can_submit());
    form.change_confirm("longenough1");
    assert!(form.can_submit());

    assert!(panel.submit_signup(&state.api).await);
    assert_eq!(panel.mode, AuthMode::Login);
    assert_eq!(panel.info.as_deref(), Some(SIGNUP_DONE));
    assert!(!panel.signup.can_submit());
}

#[tokio::test]
async fn duplicate_signup_keeps_form() {
    let backend = Backend::start().await;
    let state = backend.state();
    let mut panel = AuthPanel::new();
    panel.set_mode(AuthMode::Signup);
    panel.signup.form.change(Field::Email, "taken@example.com");
    panel.signup.form.change(Field::Password, "password123");
    panel.signup.change_confirm("password123");

    assert!(!panel.submit_signup(&state.api).await);
    assert_eq!(panel.mode, AuthMode::Signup);
    assert_eq!(panel.error.as_deref(), Some("이미 가입된 이메일입니다."));
    assert_eq!(panel.signup.form.values().email, "taken@example.com");
}

#[tokio::test]
async fn delete_account_signs_out() {
    let backend = Backend::start().await;
    let state = backend.signed_in().await;
    let mut panel = AuthPanel::new();

    assert!(panel.delete_account(&state.session).await);
    assert!(!state.session.is_authed());
    assert_eq!(state.api.token(), None);
}

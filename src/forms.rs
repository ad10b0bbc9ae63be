//! Sign-in and sign-up form state.
//!
//! Errors are recomputed on every change but only shown for fields that have
//! been blurred; submit stays disabled while any error exists or a required
//! field is empty.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const EMAIL_ERROR: &str = "올바른 이메일 형식이 아닙니다.";
pub const PASSWORD_ERROR: &str = "비밀번호는 8~20자 사이로 입력해주세요.";
pub const CONFIRM_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";
pub const SIGNUP_DONE: &str = "회원가입이 완료되었습니다. 로그인해 주세요.";

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigninValues {
    pub email: String,
    pub password: String,
}

/// Empty string means no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigninErrors {
    pub email: String,
    pub password: String,
}

impl SigninErrors {
    pub fn any(&self) -> bool {
        !self.email.is_empty() || !self.password.is_empty()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }
}

pub fn validate_signin(values: &SigninValues) -> SigninErrors {
    let mut errors = SigninErrors::default();
    let email_ok = EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(values.email.trim()));
    if !email_ok {
        errors.email = EMAIL_ERROR.to_string();
    }
    let len = values.password.chars().count();
    if !(8..=20).contains(&len) {
        errors.password = PASSWORD_ERROR.to_string();
    }
    errors
}

#[derive(Debug, Clone)]
pub struct FormState {
    values: SigninValues,
    touched: HashSet<Field>,
    errors: SigninErrors,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let values = SigninValues::default();
        Self {
            errors: validate_signin(&values),
            values,
            touched: HashSet::new(),
        }
    }

    pub fn values(&self) -> &SigninValues {
        &self.values
    }

    pub fn errors(&self) -> &SigninErrors {
        &self.errors
    }

    pub fn change(&mut self, field: Field, text: impl Into<String>) {
        let text = text.into();
        match field {
            Field::Email => self.values.email = text,
            Field::Password => self.values.password = text,
        }
        self.errors = validate_signin(&self.values);
    }

    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Error text to display under `field`, if any.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        let err = self.errors.get(field);
        (self.is_touched(field) && !err.is_empty()).then_some(err)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn is_submittable(&self) -> bool {
        !self.errors.any() && !self.values.email.is_empty() && !self.values.password.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub form: FormState,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_submittable()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub form: FormState,
    confirm: String,
    confirm_touched: bool,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm(&self) -> &str {
        &self.confirm
    }

    pub fn change_confirm(&mut self, text: impl Into<String>) {
        self.confirm = text.into();
    }

    pub fn blur_confirm(&mut self) {
        self.confirm_touched = true;
    }

    /// Mismatch message, shown only once the confirm field has been left and
    /// both password fields are filled.
    pub fn confirm_error(&self) -> Option<&'static str> {
        let password = &self.form.values().password;
        if !self.confirm_touched || password.is_empty() || self.confirm.is_empty() {
            return None;
        }
        (*password != self.confirm).then_some(CONFIRM_MISMATCH)
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_submittable()
            && !self.confirm.is_empty()
            && self.form.values().password == self.confirm
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(email: &str, password: &str) -> SigninValues {
        SigninValues {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn email_and_password_rules() {
        assert!(!validate_signin(&values("user@jeonsafe.kr", "password1")).any());
        assert_eq!(validate_signin(&values("user@", "password1")).email, EMAIL_ERROR);
        assert_eq!(validate_signin(&values("a b@c.kr", "password1")).email, EMAIL_ERROR);
        assert_eq!(validate_signin(&values("a@b.kr", "short")).password, PASSWORD_ERROR);
        assert_eq!(validate_signin(&values("a@b.kr", &"x".repeat(21))).password, PASSWORD_ERROR);
        assert!(!validate_signin(&values("a@b.kr", &"비".repeat(20))).any());
    }

    #[test]
    fn errors_show_only_after_blur() {
        let mut form = FormState::new();
        form.change(Field::Email, "nope");
        assert_eq!(form.visible_error(Field::Email), None);
        form.blur(Field::Email);
        assert_eq!(form.visible_error(Field::Email), Some(EMAIL_ERROR));
        form.reset();
        assert!(!form.is_touched(Field::Email));
        assert_eq!(form.values(), &SigninValues::default());
    }

    #[test]
    fn login_submit_needs_valid_values() {
        let mut login = LoginForm::new();
        assert!(!login.can_submit());
        login.form.change(Field::Email, "user@jeonsafe.kr");
        login.form.change(Field::Password, "password1");
        assert!(login.can_submit());
    }

    #[test]
    fn confirm_mismatch_waits_for_blur() {
        let mut signup = SignupForm::new();
        signup.form.change(Field::Email, "user@jeonsafe.kr");
        signup.form.change(Field::Password, "password1");
        signup.change_confirm("password2");

        assert_eq!(signup.confirm_error(), None);
        assert!(!signup.can_submit());

        signup.blur_confirm();
        assert_eq!(signup.confirm_error(), Some(CONFIRM_MISMATCH));
        assert!(!signup.can_submit());

        signup.change_confirm("password1");
        assert_eq!(signup.confirm_error(), None);
        assert!(signup.can_submit());
    }

    #[test]
    fn blank_confirm_shows_no_mismatch() {
        let mut signup = SignupForm::new();
        signup.form.change(Field::Password, "password1");
        signup.blur_confirm();
        assert_eq!(signup.confirm_error(), None);
        assert!(!signup.can_submit());
    }
}

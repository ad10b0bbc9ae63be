//! Navigation chrome: account bubble and the report history drawer.

pub mod auth;
pub mod drawer;

pub use auth::{AuthMode, AuthPanel};
pub use drawer::{format_date, HistoryDrawer, ThreadRow};

use crate::api::User;

/// Name shown for the signed-in user: their name, else the local part of
/// their email, else `User`.
pub fn display_name(user: Option<&User>) -> String {
    let Some(user) = user else {
        return "User".to_string();
    };
    if let Some(name) = user.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match user.email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => "User".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>, email: &str) -> User {
        User {
            id: 1,
            email: email.into(),
            name: name.map(str::to_string),
            role: None,
        }
    }

    #[test]
    fn display_name_fallbacks() {
        assert_eq!(display_name(Some(&user(Some("김전세"), "kim@jeonsafe.kr"))), "김전세");
        assert_eq!(display_name(Some(&user(Some("  "), "kim@jeonsafe.kr"))), "kim");
        assert_eq!(display_name(Some(&user(None, "@jeonsafe.kr"))), "User");
        assert_eq!(display_name(None), "User");
    }
}

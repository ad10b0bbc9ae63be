use super::ApiClient;
use crate::error::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

const ME_ENDPOINT: &str = "/be/auth/me";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub id: i64,
    pub email: String,
}

impl ApiClient {
    /// Exchange credentials for a bearer token. Does not install it.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        tracing::debug!("POST /be/auth/login");
        let rb = self
            .request(Method::POST, "/be/auth/login")
            .json(&json!({ "email": email, "password": password }));
        let token: TokenResponse = self.send_json(rb).await?;
        Ok(token.access_token)
    }

    pub async fn me(&self) -> Result<User> {
        self.send_json(self.request(Method::GET, ME_ENDPOINT)).await
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse> {
        tracing::debug!("POST /be/auth/signup");
        let rb = self
            .request(Method::POST, "/be/auth/signup")
            .json(&json!({ "email": email, "password": password }));
        self.send_json(rb).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.send_empty(self.request(Method::POST, "/be/auth/logout"))
            .await
    }

    pub async fn delete_account(&self) -> Result<()> {
        self.send_empty(self.request(Method::DELETE, ME_ENDPOINT))
            .await
    }
}

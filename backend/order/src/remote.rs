//! # microCMS
//!
//! Headless CMS holding the menu. One list endpoint, authenticated with an API key header.
//!
//! ```sh
//! curl -H "X-API-KEY: $MICROCMS_API_KEY" https://$MICROCMS_SERVICE_DOMAIN.microcms.io/api/v1/menu
//! ```
use anyhow::Error;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::Deserialize;

use crate::menu::{Menu, MenuItem};

pub const CMS_HOST: &str = "microcms.io";
pub const MENU_PATH: &str = "/api/v1/menu";
pub const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct CmsCredentials {
    pub api_key: String,
    pub service_domain: String,
}

impl CmsCredentials {
    /// Both values have to be present and non-blank.
    pub fn new(api_key: Option<String>, service_domain: Option<String>) -> Option<Self> {
        let api_key = api_key.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        let service_domain = service_domain
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())?;

        Some(Self {
            api_key,
            service_domain,
        })
    }

    pub fn from_env(key_var: &str, domain_var: &str) -> Option<Self> {
        Self::new(std::env::var(key_var).ok(), std::env::var(domain_var).ok())
    }

    pub fn base_url(&self) -> String {
        format!("https://{}.{CMS_HOST}", self.service_domain)
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for CmsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsCredentials")
            .field("api_key", &"***")
            .field("service_domain", &self.service_domain)
            .finish()
    }
}

#[derive(Deserialize)]
struct MenuResponse {
    contents: Vec<MenuItem>,
}

#[derive(Clone)]
pub struct CmsClient {
    client: Client,
    menu_url: String,
    api_key: String,
}

impl std::fmt::Debug for CmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsClient")
            .field("menu_url", &self.menu_url)
            .field("api_key", &"***")
            .finish()
    }
}

impl CmsClient {
    pub fn new(client: Client, credentials: &CmsCredentials) -> Self {
        Self::with_base_url(client, credentials, &credentials.base_url())
    }

    /// Same as [`CmsClient::new`] but pointed at another origin, e.g. a local mock.
    pub fn with_base_url(client: Client, credentials: &CmsCredentials, base_url: &str) -> Self {
        Self {
            client,
            menu_url: format!("{}{MENU_PATH}", base_url.trim_end_matches('/')),
            api_key: credentials.api_key.clone(),
        }
    }

    pub fn menu_url(&self) -> &str {
        &self.menu_url
    }

    /// Raw upstream status and body, untouched.
    pub async fn fetch_raw(&self) -> Result<(StatusCode, Vec<u8>), Error> {
        let response = self
            .client
            .get(&self.menu_url)
            .header(API_KEY_HEADER, HeaderValue::from_str(&self.api_key)?)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        Ok((status, bytes.to_vec()))
    }

    pub async fn fetch_menu(&self) -> Result<Menu, Error> {
        let (status, bytes) = self.fetch_raw().await?;

        if !status.is_success() {
            anyhow::bail!("CMS responded with {status}");
        }

        let response: MenuResponse = serde_json::from_slice(&bytes)?;

        Ok(Menu::new(response.contents))
    }
}

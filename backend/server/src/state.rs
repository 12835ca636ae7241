use std::sync::Arc;

use order::{CmsClient, CmsCredentials, MenuSource};
use reqwest::Client;

use super::{
    config::{Config, MenuSourceKind},
    sessions::Sessions,
};

pub struct AppState {
    pub config: Config,
    pub http: Client,
    pub sessions: Sessions,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let sessions = Sessions::new(config.session_ttl);

        Arc::new(Self {
            config,
            http: Client::new(),
            sessions,
        })
    }

    pub fn cms_client(&self, credentials: &CmsCredentials) -> CmsClient {
        match &self.config.cms_base_url {
            Some(base_url) => CmsClient::with_base_url(self.http.clone(), credentials, base_url),
            None => CmsClient::new(self.http.clone(), credentials),
        }
    }

    /// What a freshly opened page should load its menu from.
    pub fn menu_source(&self) -> MenuSource {
        match self.config.menu_source {
            MenuSourceKind::Static => MenuSource::Static,
            MenuSourceKind::Remote => match self.config.page_credentials() {
                Some(credentials) => MenuSource::Remote(self.cms_client(credentials)),
                None => MenuSource::Unconfigured,
            },
        }
    }
}

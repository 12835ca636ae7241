use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use anyhow::{Error, anyhow, bail};
use order::CmsCredentials;
use tracing::{debug, info, warn};

use crate::sessions::DEFAULT_SESSION_TTL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSourceKind {
    Static,
    Remote,
}

impl FromStr for MenuSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(MenuSourceKind::Static),
            "remote" => Ok(MenuSourceKind::Remote),
            other => Err(format!("expected `static` or `remote`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub menu_source: MenuSourceKind,
    /// Server-side pair. The proxy only ever uses this one.
    pub cms: Option<CmsCredentials>,
    /// Client-exposed pair, page loads fall back to it.
    pub public_cms: Option<CmsCredentials>,
    pub cms_base_url: Option<String>,
    /// Pages untouched for this long are dropped.
    pub session_ttl: Duration,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        let cms = CmsCredentials::new(
            read_secret("MICROCMS_API_KEY"),
            read_secret("MICROCMS_SERVICE_DOMAIN"),
        );
        let public_cms = CmsCredentials::new(
            var("NEXT_PUBLIC_MICROCMS_API_KEY"),
            var("NEXT_PUBLIC_MICROCMS_SERVICE_DOMAIN"),
        );

        if cms.is_none() && public_cms.is_none() {
            warn!("No microCMS credentials found, remote menu disabled");
        }

        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            menu_source: try_load("MENU_SOURCE", "remote")?,
            cms,
            public_cms,
            cms_base_url: var("MICROCMS_BASE_URL"),
            session_ttl: session_ttl(try_load("SESSION_TTL_SECS", "1800")?)?,
        })
    }

    pub fn page_credentials(&self) -> Option<&CmsCredentials> {
        self.cms.as_ref().or(self.public_cms.as_ref())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            menu_source: MenuSourceKind::Remote,
            cms: None,
            public_cms: None,
            cms_base_url: None,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

fn session_ttl(secs: u64) -> Result<Duration, Error> {
    if secs == 0 {
        bail!("SESSION_TTL_SECS must be at least 1");
    }

    Ok(Duration::from_secs(secs))
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, Error>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value `{value}`: {e}"))
}

/// Env first, then a docker secret file.
fn read_secret(secret_name: &str) -> Option<String> {
    if let Some(value) = var(secret_name) {
        return Some(value);
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            debug!("No {secret_name} secret at {path}: {e}");
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_source_kind() {
        assert_eq!("static".parse(), Ok(MenuSourceKind::Static));
        assert_eq!(" Remote ".parse(), Ok(MenuSourceKind::Remote));
        assert!("cms".parse::<MenuSourceKind>().is_err());
    }

    #[test]
    fn test_try_load_default() {
        let port: u16 = try_load("NEPHOUSE_TEST_UNSET_PORT", "1111").unwrap();
        assert_eq!(port, 1111);
    }

    #[test]
    fn test_try_load_invalid() {
        assert!(try_load::<u16>("NEPHOUSE_TEST_UNSET_PORT", "port").is_err());
    }

    #[test]
    fn test_session_ttl() {
        assert_eq!(session_ttl(1800).unwrap(), DEFAULT_SESSION_TTL);
        assert_eq!(Config::default().session_ttl, DEFAULT_SESSION_TTL);
        assert!(session_ttl(0).is_err());

        let secs: u64 = try_load("NEPHOUSE_TEST_UNSET_TTL", "1800").unwrap();
        assert_eq!(session_ttl(secs).unwrap(), Duration::from_secs(1800));
    }

    #[test]
    fn test_read_secret_missing() {
        assert_eq!(read_secret("NEPHOUSE_TEST_UNSET_SECRET"), None);
    }

    #[test]
    fn test_page_credentials_prefers_server_pair() {
        let server_pair = CmsCredentials::new(Some("server".into()), Some("nep".into()));
        let public_pair = CmsCredentials::new(Some("public".into()), Some("nep".into()));

        let config = Config {
            cms: server_pair.clone(),
            public_cms: public_pair.clone(),
            ..Config::default()
        };
        assert_eq!(config.page_credentials(), server_pair.as_ref());

        let config = Config {
            public_cms: public_pair.clone(),
            ..Config::default()
        };
        assert_eq!(config.page_credentials(), public_pair.as_ref());

        assert_eq!(Config::default().page_credentials(), None);
    }
}

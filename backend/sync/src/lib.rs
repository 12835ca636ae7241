//! # Menu Sync
//!
//! Pulls the menu the page would see and prints it. Optionally writes a snapshot for checking
//! what the CMS served at a given time.
//!
//! ## Usage
//!
//! ```sh
//! MICROCMS_API_KEY=... MICROCMS_SERVICE_DOMAIN=... cargo run -p menu-sync -- --out menu.json
//! cargo run -p menu-sync -- --source static
//! ```
//!
//! ## Snapshot
//! - fetchedAt (**RFC 3339**)
//! - contents (**list**), same item shape as the CMS response
//!
//! ## Notes
//! - Credentials: `MICROCMS_*` first, then `NEXT_PUBLIC_MICROCMS_*`, same as page loads
//! - Unlike the page, failures here are errors, an empty menu is never written silently
use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Error, anyhow};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use order::{CmsClient, CmsCredentials, Menu, static_menu};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    Remote,
    Static,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub fetched_at: DateTime<Utc>,
    pub contents: &'a Menu,
}

pub fn credentials_from_env() -> Option<CmsCredentials> {
    CmsCredentials::from_env("MICROCMS_API_KEY", "MICROCMS_SERVICE_DOMAIN").or_else(|| {
        CmsCredentials::from_env(
            "NEXT_PUBLIC_MICROCMS_API_KEY",
            "NEXT_PUBLIC_MICROCMS_SERVICE_DOMAIN",
        )
    })
}

pub fn cms_client(credentials: &CmsCredentials, base_url: Option<&str>) -> CmsClient {
    match base_url {
        Some(base_url) => CmsClient::with_base_url(Client::new(), credentials, base_url),
        None => CmsClient::new(Client::new(), credentials),
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

pub async fn load_menu(source: Source, cms: Option<&CmsClient>) -> Result<Menu, Error> {
    match source {
        Source::Static => Ok(static_menu()),
        Source::Remote => {
            let cms = cms.ok_or_else(|| anyhow!("Missing API key or service domain"))?;

            let pb = spinner(format!("Fetching {}", cms.menu_url()));
            let result = cms.fetch_menu().await;
            pb.finish_and_clear();

            result
        }
    }
}

pub fn print_menu(menu: &Menu) {
    for item in menu.items() {
        println!("{item}");
    }

    println!("\nLoaded Items: {}", menu.len());
}

pub fn write_snapshot(menu: &Menu, path: &Path, fetched_at: DateTime<Utc>) -> Result<(), Error> {
    let snapshot = Snapshot {
        fetched_at,
        contents: menu,
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::Value;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method},
    };

    use super::*;

    #[tokio::test]
    async fn test_static_source() {
        let menu = load_menu(Source::Static, None).await.unwrap();
        assert_eq!(menu, static_menu());
    }

    #[tokio::test]
    async fn test_remote_without_credentials() {
        let err = load_menu(Source::Remote, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing API key or service domain");
    }

    #[tokio::test]
    async fn test_remote_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("X-API-KEY", "key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"contents":[{"id":"lassi","name":"ラッシー","price":250}]}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let credentials = CmsCredentials::new(Some("key".into()), Some("nep".into())).unwrap();
        let cms = cms_client(&credentials, Some(&server.uri()));

        let menu = load_menu(Source::Remote, Some(&cms)).await.unwrap();
        assert_eq!(menu.items()[0].to_string(), "ラッシー 250円");
    }

    #[tokio::test]
    async fn test_remote_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let credentials = CmsCredentials::new(Some("key".into()), Some("nep".into())).unwrap();
        let cms = cms_client(&credentials, Some(&server.uri()));

        assert!(load_menu(Source::Remote, Some(&cms)).await.is_err());
    }

    #[test]
    fn test_write_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        let fetched_at = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();

        write_snapshot(&static_menu(), &path, fetched_at).unwrap();

        let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["fetchedAt"], "2025-07-01T12:00:00Z");
        assert_eq!(json["contents"].as_array().unwrap().len(), 8);
        assert_eq!(json["contents"][0]["image"]["width"], 259);
    }

    #[test]
    fn test_write_snapshot_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("menu.json");

        assert!(write_snapshot(&Menu::default(), &path, Utc::now()).is_err());
    }
}

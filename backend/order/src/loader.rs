//! # Menu Loading
//!
//! The menu is loaded once per page. Static and unconfigured sources resolve immediately, the
//! remote source runs as a background task and publishes its result through a watch channel.
//!
//! ## Teardown
//! - Dropping the [`MenuHandle`] aborts the fetch
//! - If the fetch still finishes first, nobody is listening and the result goes nowhere
//! - Cart actions never wait on the menu, they see whatever is loaded so far
use tokio::{
    sync::watch,
    task::{AbortHandle, JoinHandle},
};
use tracing::{debug, info, warn};

use crate::{
    menu::{Menu, static_menu},
    remote::CmsClient,
};

#[derive(Debug, Clone)]
pub enum MenuSource {
    Static,
    Remote(CmsClient),
    /// Remote was asked for but the credentials are missing.
    Unconfigured,
}

impl MenuSource {
    /// Never fails. Anything that goes wrong ends up as an empty menu.
    pub async fn load(&self) -> Menu {
        match self {
            MenuSource::Remote(cms) => match cms.fetch_menu().await {
                Ok(menu) => {
                    info!("Loaded {} menu items", menu.len());
                    menu
                }
                Err(e) => {
                    warn!("Failed to load menu from {}: {e}", cms.menu_url());
                    Menu::default()
                }
            },
            local => local.load_now().unwrap_or_default(),
        }
    }

    /// The menu for sources that need no network, `None` for remote.
    fn load_now(&self) -> Option<Menu> {
        match self {
            MenuSource::Static => Some(static_menu()),
            MenuSource::Unconfigured => {
                debug!("CMS credentials not set, menu stays empty");
                Some(Menu::default())
            }
            MenuSource::Remote(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Loading,
    Ready(Menu),
}

#[derive(Debug)]
pub struct MenuHandle {
    receiver: watch::Receiver<MenuState>,
    task: Option<JoinHandle<()>>,
}

impl MenuHandle {
    /// Starts loading. Remote sources need a tokio runtime.
    pub fn spawn(source: MenuSource) -> Self {
        if let Some(menu) = source.load_now() {
            return Self::ready_now(menu);
        }

        let (sender, receiver) = watch::channel(MenuState::Loading);

        let task = tokio::spawn(async move {
            let menu = source.load().await;

            if sender.send(MenuState::Ready(menu)).is_err() {
                debug!("Menu view already gone, dropping loaded menu");
            }
        });

        Self {
            receiver,
            task: Some(task),
        }
    }

    pub fn ready_now(menu: Menu) -> Self {
        let (_sender, receiver) = watch::channel(MenuState::Ready(menu));

        Self {
            receiver,
            task: None,
        }
    }

    pub fn state(&self) -> MenuState {
        self.receiver.borrow().clone()
    }

    /// Loaded items, empty while still loading.
    pub fn menu(&self) -> Menu {
        match &*self.receiver.borrow() {
            MenuState::Ready(menu) => menu.clone(),
            MenuState::Loading => Menu::default(),
        }
    }

    /// Handle on the background fetch, `None` when the menu was ready up front.
    pub fn abort_handle(&self) -> Option<AbortHandle> {
        self.task.as_ref().map(JoinHandle::abort_handle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.receiver.borrow(), MenuState::Loading)
    }

    /// Waits for the load to finish. Empty if the loader went away without publishing.
    pub async fn ready(&mut self) -> Menu {
        if let Err(e) = self
            .receiver
            .wait_for(|state| matches!(state, MenuState::Ready(_)))
            .await
        {
            debug!("Menu loader stopped before publishing: {e}");
        }

        self.menu()
    }
}

impl Drop for MenuHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Client;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;
    use crate::remote::{CmsCredentials, MENU_PATH};

    #[test]
    fn test_static_is_ready_without_runtime() {
        let handle = MenuHandle::spawn(MenuSource::Static);

        assert!(!handle.is_loading());
        assert!(handle.abort_handle().is_none());
        assert_eq!(handle.menu(), static_menu());
    }

    #[tokio::test]
    async fn test_load_matches_spawn_for_local_sources() {
        assert_eq!(MenuSource::Static.load().await, static_menu());
        assert!(MenuSource::Unconfigured.load().await.is_empty());
    }

    #[test]
    fn test_unconfigured_is_empty() {
        let handle = MenuHandle::spawn(MenuSource::Unconfigured);

        assert_eq!(handle.state(), MenuState::Ready(Menu::default()));
    }

    #[tokio::test]
    async fn test_drop_aborts_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(MENU_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"contents":[]}"#)
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&server)
            .await;

        let credentials = CmsCredentials::new(Some("key".into()), Some("nep".into())).unwrap();
        let cms = CmsClient::with_base_url(Client::new(), &credentials, &server.uri());

        let handle = MenuHandle::spawn(MenuSource::Remote(cms));
        assert!(handle.is_loading());

        let abort = handle.abort_handle().unwrap();
        drop(handle);

        tokio::time::timeout(Duration::from_secs(5), async {
            while !abort.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}

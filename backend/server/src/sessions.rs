//! # Page Sessions
//!
//! One entry per open page, keyed by a UUID v4 handed to the client on creation.
//!
//! ## Implementation
//!
//! - Each entry owns its menu load and its [`Session`] value
//! - Mutations happen under the write lock, one at a time, each one replacing the stored session
//! - Removing an entry drops its [`MenuHandle`], which aborts a menu fetch still in flight
//! - Nothing is persisted, a restart forgets every cart
//!
//! ## Expiry
//!
//! - Every read or update marks the entry as touched
//! - An entry left untouched for the idle TTL is gone: the next access answers not found
//! - Idle entries are swept on every create and by the server's periodic sweeper
use std::{collections::HashMap, time::Duration};

use order::{MenuHandle, MenuSource, Session};
use tokio::{sync::RwLock, time::Instant};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

pub struct PageSession {
    pub menu: MenuHandle,
    pub session: Session,
    touched: Instant,
}

impl PageSession {
    fn is_idle(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.touched) >= ttl
    }
}

pub struct Sessions {
    pages: RwLock<HashMap<Uuid, PageSession>>,
    ttl: Duration,
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl Sessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn create(&self, source: MenuSource) -> (Uuid, Session) {
        let id = Uuid::new_v4();
        let page = PageSession {
            menu: MenuHandle::spawn(source),
            session: Session::new(),
            touched: Instant::now(),
        };
        let session = page.session.clone();

        let mut pages = self.pages.write().await;
        evict_idle(&mut pages, self.ttl);
        pages.insert(id, page);
        info!("Created session {id}");

        (id, session)
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&PageSession) -> R) -> Result<R, AppError> {
        let mut pages = self.pages.write().await;
        let page = touch(&mut pages, id, self.ttl)?;

        Ok(f(page))
    }

    /// Applies one transition. On error the stored session is left as it was.
    pub async fn update(
        &self,
        id: Uuid,
        f: impl FnOnce(&PageSession) -> Result<Session, AppError>,
    ) -> Result<Session, AppError> {
        let mut pages = self.pages.write().await;
        let page = touch(&mut pages, id, self.ttl)?;

        let next = f(page)?;
        page.session = next.clone();

        Ok(next)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let page = self.pages.write().await.remove(&id);

        match page {
            Some(page) if !page.is_idle(self.ttl, Instant::now()) => {
                info!("Closed session {id}");
                Ok(())
            }
            _ => Err(AppError::SessionNotFound),
        }
    }

    /// Drops every idle entry, returns how many went.
    pub async fn sweep(&self) -> usize {
        evict_idle(&mut *self.pages.write().await, self.ttl)
    }

    /// Includes idle entries not swept yet.
    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Live entry for `id`, marked as touched. An idle one is dropped on the spot.
fn touch(
    pages: &mut HashMap<Uuid, PageSession>,
    id: Uuid,
    ttl: Duration,
) -> Result<&mut PageSession, AppError> {
    let now = Instant::now();

    if pages.get(&id).is_some_and(|page| page.is_idle(ttl, now)) {
        pages.remove(&id);
        info!("Session {id} expired");
        return Err(AppError::SessionNotFound);
    }

    let page = pages.get_mut(&id).ok_or(AppError::SessionNotFound)?;
    page.touched = now;

    Ok(page)
}

fn evict_idle(pages: &mut HashMap<Uuid, PageSession>, ttl: Duration) -> usize {
    let now = Instant::now();
    let before = pages.len();

    pages.retain(|_, page| !page.is_idle(ttl, now));

    let evicted = before - pages.len();
    if evicted > 0 {
        info!("Evicted {evicted} idle sessions");
    } else {
        debug!("No idle sessions to evict");
    }

    evicted
}

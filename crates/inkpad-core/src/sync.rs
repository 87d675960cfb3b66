//! Synchronization bridge: hydrate-on-open, mirror-on-change.
//!
//! The bridge owns the remote side of a session. On open it fetches the
//! last snapshot for the document key and applies it wholesale; afterwards
//! a subscriber copies every committed `App` into an outbox that the host
//! loop drains with [`SyncBridge::pump`]. Saves are fire-and-forget: a
//! failure is logged and dropped, local state stays authoritative.

use crate::engine::{Engine, SubscriberId};
use crate::state::{App, ThemePatch};
use crate::store::{RemoteStore, StoreError, StoredDocument};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

/// Document name used when the navigation path has none.
pub const DEFAULT_DOCUMENT_NAME: &str = "default-drawing";

/// Derive the document name from a navigation path: the first path
/// segment, or the fixed default for an empty or root path.
pub fn document_name(nav_path: &str) -> String {
    let name = nav_path
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();
    if name.is_empty() {
        DEFAULT_DOCUMENT_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// The remote key for a document name.
pub fn document_key(name: &str) -> String {
    format!("drawings/{}", name)
}

/// Mirrors one engine's committed states to one remote document.
pub struct SyncBridge<S: RemoteStore> {
    store: Arc<S>,
    key: String,
    /// Write-sequence number for the next save. Seeded past the hydrated
    /// snapshot's revision so a rejoining session keeps the sequence
    /// monotonic and cannot be clobbered by its own stale writes.
    next_revision: u64,
    outbox: Rc<RefCell<VecDeque<App>>>,
}

impl<S: RemoteStore> SyncBridge<S> {
    pub fn new(store: Arc<S>, document_name: &str) -> Self {
        Self {
            store,
            key: document_key(document_name),
            next_revision: 1,
            outbox: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// The remote key this bridge reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of committed states waiting to be written.
    pub fn pending_saves(&self) -> usize {
        self.outbox.borrow().len()
    }

    /// Fetch the remote snapshot and, if present, apply it wholesale via
    /// `set_full_state`. Remote content is trusted as already valid. Any
    /// failure keeps the engine's built-in defaults; hydration never
    /// aborts a session.
    pub async fn hydrate(&mut self, engine: &mut Engine) {
        match self.store.load(&self.key).await {
            Ok(document) => {
                self.next_revision = document.revision + 1;
                engine.set_full_state(document.state, Some("hydrate"));
            }
            Err(StoreError::NotFound(_)) => {
                log::debug!("no remote snapshot for {}; starting fresh", self.key);
            }
            Err(e) => {
                log::warn!("failed to load {}; keeping local defaults: {}", self.key, e);
            }
        }
    }

    /// Subscribe to the engine, queueing every committed state for the
    /// next [`pump`](Self::pump).
    pub fn attach(&self, engine: &mut Engine) -> SubscriberId {
        let outbox = self.outbox.clone();
        engine.subscribe(move |state| outbox.borrow_mut().push_back(state.clone()))
    }

    /// Write queued states to the store, in commit order, each under the
    /// next revision. Errors are logged and dropped: no retry, no user
    /// alert, no local rollback.
    pub async fn pump(&mut self) {
        loop {
            let state = self.outbox.borrow_mut().pop_front();
            let Some(state) = state else {
                break;
            };

            let document = StoredDocument {
                revision: self.next_revision,
                state,
            };
            self.next_revision += 1;

            match self.store.save(&self.key, &document).await {
                Ok(()) => {}
                Err(e @ StoreError::Stale { .. }) => {
                    log::debug!("revision guard dropped save for {}: {}", self.key, e);
                }
                Err(e) => {
                    log::warn!("dropping failed save for {}: {}", self.key, e);
                }
            }
        }
    }
}

/// One open drawing: an engine wired to its synchronization bridge.
pub struct Session<S: RemoteStore> {
    pub engine: Engine,
    pub bridge: SyncBridge<S>,
    save_subscriber: SubscriberId,
}

impl<S: RemoteStore> Session<S> {
    /// Open the document named by `nav_path`.
    ///
    /// Builds an engine seeded with defaults and the system dark-mode
    /// preference, hydrates it from the store (awaited, so the first paint
    /// already shows remote content), then attaches the save subscriber.
    pub async fn open(store: Arc<S>, nav_path: &str, prefers_dark: bool) -> Self {
        let mut engine = Engine::new();
        engine.set_theme(ThemePatch {
            is_dark_mode: Some(prefers_dark),
            ..Default::default()
        });

        let mut bridge = SyncBridge::new(store, &document_name(nav_path));
        bridge.hydrate(&mut engine).await;
        let save_subscriber = bridge.attach(&mut engine);

        Self {
            engine,
            bridge,
            save_subscriber,
        }
    }

    /// Stop mirroring committed states. Local editing keeps working.
    pub fn detach(&mut self) {
        self.engine.unsubscribe(self.save_subscriber);
    }
}

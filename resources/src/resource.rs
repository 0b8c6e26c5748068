//! The generic resource hook.
//!
//! A [`ResourceHook`] binds one backend collection to UI state: the loaded
//! items, a loading flag and the last fetch error. Mutations go to the
//! server first and are followed by a full re-fetch; the held collection is
//! never patched locally.
//!
//! State is single-threaded (`Rc<RefCell<..>>`) and no borrow is held across
//! an await point, so overlapping operations on clones of the same hook are
//! fine.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use payloads::{APIClient, ClientError, Record, responses};
use serde::Serialize;
use serde_json::Value;

use crate::config::{ListRoute, ResourceConfig};
use crate::validation::{self, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("{resource} records cannot be fetched individually")]
    Unsupported { resource: &'static str },
    #[error("Unexpected {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// What to do with a fetch response that arrives after a newer fetch was
/// started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Apply every response as it lands; whichever resolves last decides the
    /// collection.
    #[default]
    LastResponseWins,
    /// Tag each fetch with a generation and drop responses from superseded
    /// ones.
    DiscardSuperseded,
}

/// A copy of a hook's state at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSnapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

struct Inner<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    fetched: bool,
    /// Parent id for scoped lists.
    scope: Option<String>,
    generation: u64,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            fetched: false,
            scope: None,
            generation: 0,
        }
    }
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: usize,
    entries: Vec<(usize, Listener)>,
}

/// Keeps a change listener registered; dropping it unregisters.
pub struct Subscription {
    id: usize,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

pub struct ResourceHook<T: Record> {
    client: Rc<APIClient>,
    config: Rc<ResourceConfig<T>>,
    inner: Rc<RefCell<Inner<T>>>,
    listeners: Rc<RefCell<Listeners>>,
    policy: StalePolicy,
}

impl<T: Record> Clone for ResourceHook<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
            inner: self.inner.clone(),
            listeners: self.listeners.clone(),
            policy: self.policy,
        }
    }
}

impl<T: Record> ResourceHook<T> {
    pub fn new(client: Rc<APIClient>, config: ResourceConfig<T>) -> Self {
        Self {
            client,
            config: Rc::new(config),
            inner: Rc::default(),
            listeners: Rc::default(),
            policy: StalePolicy::default(),
        }
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn items(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }

    /// Borrow the items without cloning them.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.inner.borrow().items)
    }

    pub fn find(&self, id: &T::Id) -> Option<T> {
        self.with_items(|items| items.iter().find(|item| item.id() == id).cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.borrow().error.clone()
    }

    /// True once a fetch has completed for the current scope, successfully
    /// or not.
    pub fn is_fetched(&self) -> bool {
        self.inner.borrow().fetched
    }

    pub fn scope(&self) -> Option<String> {
        self.inner.borrow().scope.clone()
    }

    pub fn snapshot(&self) -> ResourceSnapshot<T> {
        let inner = self.inner.borrow();
        ResourceSnapshot {
            items: inner.items.clone(),
            loading: inner.loading,
            error: inner.error.clone(),
        }
    }

    /// Call `listener` after every change to this hook's state.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners.entries.push((id, Rc::new(listener)));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Apply a state change, then notify listeners once the borrow is
    /// released so they may read the hook.
    fn modify<R>(&self, f: impl FnOnce(&mut Inner<T>) -> R) -> R {
        let result = f(&mut *self.inner.borrow_mut());
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
        result
    }

    /// Point a scoped list at a new parent, or at none. The collection is
    /// emptied immediately; call [`Self::fetch_all`] to load the new scope.
    pub fn rescope(&self, parent: Option<String>) {
        self.modify(|inner| {
            inner.scope = parent.filter(|id| !id.trim().is_empty());
            inner.items.clear();
            inner.error = None;
            inner.loading = false;
            inner.fetched = false;
            inner.generation += 1;
        });
    }

    /// Empty the collection without fetching.
    pub fn clear(&self) {
        self.rescope(self.scope());
    }

    /// The list path for the current scope, or `None` for a scoped list with
    /// no parent selected.
    fn list_path(&self) -> Option<String> {
        match &self.config.routes.list {
            ListRoute::All(path) => Some(path.clone()),
            ListRoute::Scoped(prefix) => self
                .inner
                .borrow()
                .scope
                .as_ref()
                .map(|parent| format!("{prefix}/{parent}")),
        }
    }

    fn map_items(&self, value: Value) -> Vec<T> {
        responses::into_list(value)
            .into_iter()
            .filter_map(|raw| match (self.config.map_item)(raw) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(
                        resource = self.config.name,
                        "Skipping unreadable record: {e}"
                    );
                    None
                }
            })
            .collect()
    }

    /// Fetch the collection for the current scope without touching the
    /// hook's state. A scoped list with no parent yields no items and makes
    /// no request.
    pub async fn load(&self) -> Result<Vec<T>, ResourceError> {
        match self.list_path() {
            Some(path) => self.load_path(&path).await,
            None => Ok(Vec::new()),
        }
    }

    async fn load_path(&self, path: &str) -> Result<Vec<T>, ResourceError> {
        let value = self.client.get_json(path).await?;
        Ok(self.map_items(value))
    }

    /// Replace the held collection with the server's.
    ///
    /// Never fails: on error the collection is emptied and the message is
    /// kept in [`Self::error`]. The loading flag is cleared whatever the
    /// outcome.
    pub async fn fetch_all(&self) {
        self.fetch_from(self.list_path()).await
    }

    /// Like [`Self::fetch_all`], but the scope is read now rather than when
    /// the future is first polled, so it can be handed to a spawner after
    /// further selections have been made.
    pub fn refresh(&self) -> impl Future<Output = ()> + 'static {
        let hook = self.clone();
        let path = self.list_path();
        async move { hook.fetch_from(path).await }
    }

    #[tracing::instrument(skip(self), fields(resource = self.config.name))]
    async fn fetch_from(&self, path: Option<String>) {
        let Some(path) = path else {
            tracing::debug!("No parent selected, skipping fetch");
            self.modify(|inner| {
                inner.items.clear();
                inner.loading = false;
                inner.error = None;
            });
            return;
        };

        let generation = self.modify(|inner| {
            inner.generation += 1;
            inner.loading = true;
            inner.error = None;
            inner.generation
        });

        let result = self.load_path(&path).await;

        let policy = self.policy;
        self.modify(|inner| {
            if policy == StalePolicy::DiscardSuperseded
                && inner.generation != generation
            {
                tracing::debug!("Discarding superseded response");
                return;
            }
            match result {
                Ok(items) => {
                    inner.items = items;
                    inner.error = None;
                }
                Err(e) => {
                    tracing::error!("Failed to fetch {path}: {e}");
                    inner.items.clear();
                    inner.error = Some(e.to_string());
                }
            }
            inner.fetched = true;
            inner.loading = false;
        });
    }

    /// Fetch one record, e.g. to fill an edit form. The held collection is
    /// not touched.
    #[tracing::instrument(skip(self), fields(resource = self.config.name))]
    pub async fn get_by_id(&self, id: &T::Id) -> Result<T, ResourceError> {
        let prefix = self.config.routes.get_by_id.as_ref().ok_or(
            ResourceError::Unsupported {
                resource: self.config.name,
            },
        )?;
        let value = self
            .client
            .get_json(&format!("{prefix}/{id}"))
            .await
            .inspect_err(|e| tracing::error!("Failed to fetch {id}: {e}"))?;
        (self.config.map_item)(value).map_err(|source| ResourceError::Decode {
            resource: self.config.name,
            source,
        })
    }

    /// Create a record, then re-fetch the collection before returning the
    /// server's response. On failure nothing is re-fetched and the error is
    /// returned as is.
    #[tracing::instrument(skip(self, body), fields(resource = self.config.name))]
    pub async fn create(
        &self,
        body: &impl Serialize,
    ) -> Result<Value, ResourceError> {
        let response = self
            .client
            .post_json(&self.config.routes.create, body)
            .await
            .inspect_err(|e| tracing::error!("Failed to create: {e}"))?;
        self.fetch_all().await;
        Ok(response)
    }

    /// Replace a record with the full new field set, then re-fetch.
    #[tracing::instrument(skip(self, body), fields(resource = self.config.name))]
    pub async fn update(
        &self,
        id: &T::Id,
        body: &impl Serialize,
    ) -> Result<Value, ResourceError> {
        let path = format!("{}/{id}", self.config.routes.update);
        let response = self
            .client
            .put_json(&path, body)
            .await
            .inspect_err(|e| tracing::error!("Failed to update {id}: {e}"))?;
        self.fetch_all().await;
        Ok(response)
    }

    /// Delete a record, then re-fetch.
    #[tracing::instrument(skip(self), fields(resource = self.config.name))]
    pub async fn remove(&self, id: &T::Id) -> Result<Value, ResourceError> {
        let path = format!("{}/{id}", self.config.routes.delete);
        let response = self
            .client
            .delete(&path)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete {id}: {e}"))?;
        self.fetch_all().await;
        Ok(response)
    }

    /// Duplicate-name pre-check against the loaded items.
    pub fn check_unique(
        &self,
        candidate: &str,
        editing: Option<&T::Id>,
    ) -> Result<(), ValidationError> {
        self.with_items(|items| validation::ensure_unique(items, candidate, editing))
    }
}

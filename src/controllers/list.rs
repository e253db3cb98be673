// src/controllers/list.rs

use serde::de::DeserializeOwned;

use crate::{
    api::{ApiClient, upsert_param},
    controllers::{
        filter::{Choice, FilterSet, Searchable},
        mutation::{Confirm, delete_record},
        notify::Notifier,
    },
    error::AppError,
    models::Identified,
};

/// A top-level collection served by the backend.
pub trait Resource: DeserializeOwned + Clone + Identified {
    /// Human name used in prompts and toasts.
    const NOUN: &'static str;

    fn list_path() -> String;

    /// Where new records are POSTed. Usually the list path.
    fn create_path() -> String {
        Self::list_path()
    }

    fn item_path(id: &str) -> String;
}

/// What the renderer should show instead of (or as) the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    /// Nothing fetched yet, or the last fetch failed with nothing to show.
    Failed,
    /// The backend has no records at all.
    NoData,
    /// Records exist but none match the current search/filters.
    NoMatches,
    Populated(usize),
}

/// Fetched collection plus the client-side search and filters over it.
///
/// Server-side parameters (`set_param`) mark the list stale; search and dropdown
/// filters never trigger a request.
#[derive(Debug)]
pub struct ResourceList<T: Resource + Searchable> {
    items: Vec<T>,
    filters: FilterSet<T>,
    params: Vec<(&'static str, String)>,
    loading: bool,
    error: Option<String>,
    stale: bool,
    fetched: bool,
}

impl<T: Resource + Searchable> Default for ResourceList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource + Searchable> ResourceList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filters: FilterSet::default(),
            params: Vec::new(),
            loading: false,
            error: None,
            stale: true,
            fetched: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn set_search(&mut self, term: &str) {
        self.filters.set_search(term);
    }

    pub fn filter_by<V, F>(&mut self, name: &'static str, choice: Choice<V>, field: F)
    where
        V: PartialEq + Send + Sync + 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.filters.set_choice(name, choice, field);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Sets a server-side query parameter; `None` removes it. Returns whether it changed.
    pub fn set_param(&mut self, key: &'static str, value: Option<String>) -> bool {
        let changed = upsert_param(&mut self.params, key, value);
        if changed {
            self.stale = true;
        }
        changed
    }

    /// Filtered view, recomputed on every call.
    pub fn visible(&self) -> Vec<&T> {
        self.filters.apply(&self.items)
    }

    pub fn view_state(&self) -> ViewState {
        if self.loading {
            return ViewState::Loading;
        }
        if !self.fetched {
            return ViewState::Failed;
        }
        if self.items.is_empty() {
            return ViewState::NoData;
        }
        if self.filters.is_idle() {
            return ViewState::Populated(self.items.len());
        }
        match self.visible().len() {
            0 => ViewState::NoMatches,
            n => ViewState::Populated(n),
        }
    }

    /// Fetches the whole collection.
    ///
    /// On failure exactly one error toast is raised and the previous rows stay.
    pub async fn refresh(&mut self, client: &ApiClient, notifier: &dyn Notifier) -> Result<(), AppError> {
        self.loading = true;
        let result = client.get::<Vec<T>>(&T::list_path(), &self.params).await;
        self.loading = false;

        match result {
            Ok(items) => {
                tracing::info!("Fetched {} {} records", items.len(), T::NOUN);
                self.items = items;
                self.error = None;
                self.stale = false;
                self.fetched = true;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to fetch {} list: {:?}", T::NOUN, e);
                let message = e.toast_message();
                notifier.error(&message);
                self.error = Some(message);
                Err(e)
            }
        }
    }

    /// Refetches only when a server-side parameter changed since the last fetch.
    pub async fn sync(&mut self, client: &ApiClient, notifier: &dyn Notifier) -> Result<bool, AppError> {
        if !self.stale {
            return Ok(false);
        }
        self.refresh(client, notifier).await.map(|_| true)
    }

    /// Confirm, DELETE, then refetch once. Returns `Ok(false)` when declined.
    pub async fn remove(
        &mut self,
        client: &ApiClient,
        confirm: &dyn Confirm,
        notifier: &dyn Notifier,
        id: &str,
    ) -> Result<bool, AppError> {
        let deleted = delete_record(client, confirm, notifier, T::NOUN, &T::item_path(id)).await?;
        if deleted {
            self.refresh(client, notifier).await?;
        }
        Ok(deleted)
    }
}

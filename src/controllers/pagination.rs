// src/controllers/pagination.rs

use serde::de::DeserializeOwned;

use crate::{
    api::{ApiClient, upsert_param},
    controllers::{filter::FilterSet, filter::Searchable, notify::Notifier},
    error::AppError,
    models::Pagination,
};

/// Page number and bounds for server-side paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: u32,
    limit: u32,
    pages: u32,
    total: u64,
}

impl PageState {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            pages: 1,
            total: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// "Next" control is enabled.
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// "Previous" control is enabled.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Moves forward one page; false when already on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.go_to(self.page.saturating_add(1))
    }

    pub fn prev(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.go_to(self.page - 1)
    }

    /// Jumps to `page`, clamped to `[1, pages]`. Returns whether the page changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.pages.max(1));
        let changed = target != self.page;
        self.page = target;
        changed
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Sets the page before bounds are known; the next `absorb` clamps it.
    pub fn seek(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Takes the bounds reported by the server.
    pub fn absorb(&mut self, meta: &Pagination) {
        self.pages = meta.pages.max(1);
        self.total = meta.total;
        if self.page > self.pages {
            self.page = self.pages;
        }
    }

    fn query(&self) -> [(&'static str, String); 2] {
        [("page", self.page.to_string()), ("limit", self.limit.to_string())]
    }
}

/// A listing paged by the server.
///
/// Page changes and server-side filters refetch; the search box only filters the
/// current page in memory.
#[derive(Debug)]
pub struct PagedList<T: Searchable> {
    path: String,
    state: PageState,
    params: Vec<(&'static str, String)>,
    items: Vec<T>,
    filters: FilterSet<T>,
    loading: bool,
    error: Option<String>,
}

impl<T: DeserializeOwned + Searchable> PagedList<T> {
    pub fn new(path: impl Into<String>, limit: u32) -> Self {
        Self {
            path: path.into(),
            state: PageState::new(limit),
            params: Vec::new(),
            items: Vec::new(),
            filters: FilterSet::default(),
            loading: false,
            error: None,
        }
    }

    /// Page requested by the first `load`.
    pub fn starting_at(mut self, page: u32) -> Self {
        self.state.seek(page);
        self
    }

    /// Server-side filter applied from the first `load` on.
    pub fn with_param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        upsert_param(&mut self.params, key, Some(value.into()));
        self
    }

    pub fn state(&self) -> &PageState {
        &self.state
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

    pub fn set_search(&mut self, term: &str) {
        self.filters.set_search(term);
    }

    pub fn visible(&self) -> Vec<&T> {
        self.filters.apply(&self.items)
    }

    /// Fetches the current page with the active server-side filters.
    pub async fn load(&mut self, client: &ApiClient, notifier: &dyn Notifier) -> Result<(), AppError> {
        let mut query: Vec<(&str, String)> = self.state.query().to_vec();
        query.extend(self.params.iter().cloned());

        self.loading = true;
        let result = client.get_page::<T>(&self.path, &query).await;
        self.loading = false;

        match result {
            Ok(page) => {
                if let Some(meta) = &page.pagination {
                    self.state.absorb(meta);
                }
                tracing::info!(
                    "Fetched page {}/{} of {} ({} rows)",
                    self.state.page(),
                    self.state.pages(),
                    self.path,
                    page.items.len()
                );
                self.items = page.items;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to fetch {}: {:?}", self.path, e);
                let message = e.toast_message();
                notifier.error(&message);
                self.error = Some(message);
                Err(e)
            }
        }
    }

    /// Next page; no request when already on the last one.
    pub async fn next_page(&mut self, client: &ApiClient, notifier: &dyn Notifier) -> Result<bool, AppError> {
        if !self.state.next() {
            return Ok(false);
        }
        self.load(client, notifier).await.map(|_| true)
    }

    pub async fn prev_page(&mut self, client: &ApiClient, notifier: &dyn Notifier) -> Result<bool, AppError> {
        if !self.state.prev() {
            return Ok(false);
        }
        self.load(client, notifier).await.map(|_| true)
    }

    pub async fn go_to(&mut self, page: u32, client: &ApiClient, notifier: &dyn Notifier) -> Result<bool, AppError> {
        if !self.state.go_to(page) {
            return Ok(false);
        }
        self.load(client, notifier).await.map(|_| true)
    }

    /// Sets a server-side filter (`None` or `all` clears it), back to page 1, and refetches
    /// when the value changed.
    pub async fn set_filter(
        &mut self,
        key: &'static str,
        value: Option<String>,
        client: &ApiClient,
        notifier: &dyn Notifier,
    ) -> Result<bool, AppError> {
        let value = value.filter(|v| !v.trim().is_empty() && !v.eq_ignore_ascii_case("all"));
        let changed = upsert_param(&mut self.params, key, value);
        if !changed {
            return Ok(false);
        }
        self.state.reset();
        self.load(client, notifier).await.map(|_| true)
    }
}

// src/export.rs

//! CSV downloads: server-rendered (`?format=csv`) or built locally from JSON rows.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;

use crate::{
    api::ApiClient,
    controllers::{
        inflight::{InFlight, InFlightGuard},
        notify::Notifier,
    },
    error::AppError,
};

/// A record that can be written as one CSV line.
pub trait CsvRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

/// `<prefix>-<YYYY-MM-DD>.csv`
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.csv", prefix, date.format("%Y-%m-%d"))
}

pub fn todays_filename(prefix: &str) -> String {
    export_filename(prefix, Local::now().date_naive())
}

/// Quotes a field when it contains a delimiter, quote or line break.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_line(out: &mut String, cells: impl IntoIterator<Item = String>) {
    let line: Vec<String> = cells.into_iter().map(|c| escape_field(&c)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Renders rows (header line first) as CSV text.
pub fn to_csv<R: CsvRow>(rows: &[R]) -> String {
    let mut out = String::new();
    write_line(&mut out, R::headers().into_iter().map(str::to_string));
    for row in rows {
        write_line(&mut out, row.cells());
    }
    out
}

/// Writes exports into a directory, one outstanding export per key.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
    inflight: InFlight,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>, inflight: InFlight) -> Self {
        Self {
            dir: dir.into(),
            inflight,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.inflight.is_pending(key)
    }

    /// Downloads CSV rendered by the backend (`format=csv` is appended to `query`).
    pub async fn server_csv(
        &self,
        client: &ApiClient,
        notifier: &dyn Notifier,
        key: &str,
        path: &str,
        query: &[(&str, String)],
        prefix: &str,
    ) -> Result<PathBuf, AppError> {
        let _guard = self.acquire(notifier, key)?;

        let mut query = query.to_vec();
        query.push(("format", "csv".to_string()));

        let result = match client.get_text(path, &query).await {
            Ok(body) => self.save(prefix, &body).await,
            Err(e) => Err(e),
        };
        self.report(notifier, prefix, result)
    }

    /// Fetches JSON rows and writes them as CSV locally.
    pub async fn client_csv<R: CsvRow + DeserializeOwned>(
        &self,
        client: &ApiClient,
        notifier: &dyn Notifier,
        key: &str,
        path: &str,
        query: &[(&str, String)],
        prefix: &str,
    ) -> Result<PathBuf, AppError> {
        let _guard = self.acquire(notifier, key)?;

        let result = match client.get::<Vec<R>>(path, query).await {
            Ok(rows) => {
                tracing::debug!("Building {} CSV from {} rows", prefix, rows.len());
                self.save(prefix, &to_csv(&rows)).await
            }
            Err(e) => Err(e),
        };
        self.report(notifier, prefix, result)
    }

    /// Writes rows already held in memory.
    pub async fn rows_csv<R: CsvRow>(
        &self,
        notifier: &dyn Notifier,
        key: &str,
        rows: &[R],
        prefix: &str,
    ) -> Result<PathBuf, AppError> {
        let _guard = self.acquire(notifier, key)?;
        let result = self.save(prefix, &to_csv(rows)).await;
        self.report(notifier, prefix, result)
    }

    fn acquire(
        &self,
        notifier: &dyn Notifier,
        key: &str,
    ) -> Result<InFlightGuard, AppError> {
        self.inflight.acquire(key).inspect_err(|e| {
            notifier.error(&e.toast_message());
        })
    }

    async fn save(&self, prefix: &str, contents: &str) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(todays_filename(prefix));
        tokio::fs::write(&path, contents).await?;
        Ok(path)
    }

    fn report(
        &self,
        notifier: &dyn Notifier,
        prefix: &str,
        result: Result<PathBuf, AppError>,
    ) -> Result<PathBuf, AppError> {
        match &result {
            Ok(path) => {
                tracing::info!("Exported {} to {}", prefix, path.display());
                notifier.success(&format!("Exported to {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Export of {} failed: {:?}", prefix, e);
                notifier.error(&e.toast_message());
            }
        }
        result
    }
}

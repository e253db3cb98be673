use std::sync::Arc;

use crate::{
    api::ApiClient,
    config::Config,
    controllers::{inflight::InFlight, notify::Notifier},
    export::Exporter,
};

/// Everything a console command needs: configuration, API client, toast sink, export slots.
#[derive(Clone)]
pub struct ConsoleState {
    pub config: Config,
    pub client: ApiClient,
    pub notifier: Arc<dyn Notifier>,
    pub inflight: InFlight,
}

impl ConsoleState {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let client = ApiClient::new(&config);
        Self {
            config,
            client,
            notifier,
            inflight: InFlight::new(),
        }
    }

    pub fn exporter(&self) -> Exporter {
        Exporter::new(self.config.export_dir.clone(), self.inflight.clone())
    }
}

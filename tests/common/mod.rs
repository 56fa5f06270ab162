#![allow(dead_code)]

pub mod watchers;

use std::sync::Arc;

use destination::{K8sResolver, ResolverConf};
use tokio::sync::mpsc;

use self::watchers::{Event, Journal, MockDns, MockEndpoints};

pub type TestResolver = K8sResolver<Arc<MockEndpoints>, Arc<MockDns>>;

/// Everything a resolver test needs.
pub struct Fixture {
    pub resolver: Arc<TestResolver>,
    pub endpoints: Arc<MockEndpoints>,
    pub dns: Arc<MockDns>,
    pub journal: Arc<Journal>,
    pub events: mpsc::UnboundedReceiver<Event>,
}

impl Fixture {
    /// Creates a fixture for a cluster with the given DNS zone.
    pub fn new(zone: &str) -> Self {
        destination_logging();
        let (journal, events) = Journal::new();
        let endpoints = Arc::new(MockEndpoints::new(journal.clone()));
        let dns = Arc::new(MockDns::new(journal.clone()));
        let resolver = Arc::new(K8sResolver::new(
            ResolverConf::from_zone(zone).unwrap(),
            endpoints.clone(),
            dns.clone(),
        ));
        Fixture {
            resolver,
            endpoints,
            dns,
            journal,
            events,
        }
    }

    /// Waits for the next event a watcher records.
    pub async fn next_event(&mut self) -> Event {
        self.events.recv().await.unwrap()
    }
}

/// Initialize tracing based logging. Override with env var RUST_LOG, e.g.
/// RUST_LOG=debug.
fn destination_logging() {
    #[cfg(feature = "logging")]
    destination::init_logging();
}

//! Watchers recording what resolvers do with them.
//!
//! Both watchers log every subscribe and unsubscribe into a shared
//! [`Journal`] once they have updated their subscriber lists. On subscribe
//! they hand the listener whatever endpoints they have been told about, so
//! tests can see updates flowing.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::vec::Vec;

use destination::service::{ServiceId, ServiceMetadata};
use destination::watcher::{
    DnsWatcher, EndpointsWatcher, SharedListener, Update,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;

//------------ Event ---------------------------------------------------------

/// Something a resolver did to a watcher.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Subscribe(String, u16),
    Unsubscribe(String, u16),
    DnsSubscribe(String),
    DnsUnsubscribe(String),
}

//------------ Journal -------------------------------------------------------

/// The record of events shared by the watchers of a test.
#[derive(Debug)]
pub struct Journal {
    events: Mutex<Vec<Event>>,
    tx: mpsc::UnboundedSender<Event>,
}

impl Journal {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Journal {
                events: Mutex::new(Vec::new()),
                tx,
            }),
            rx,
        )
    }

    fn push(&self, event: Event) {
        self.events.lock().push(event.clone());
        let _ = self.tx.send(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

//------------ Subscribers ---------------------------------------------------

/// Currently subscribed listeners by key.
struct Subscribers<K> {
    list: Mutex<Vec<(K, SharedListener)>>,
}

impl<K> Default for Subscribers<K> {
    fn default() -> Self {
        Subscribers {
            list: Mutex::new(Vec::new()),
        }
    }
}

impl<K: PartialEq> Subscribers<K> {
    fn add(&self, key: K, listener: SharedListener) {
        self.list.lock().push((key, listener));
    }

    fn remove(&self, key: &K, listener: &SharedListener) {
        let mut list = self.list.lock();
        let pos = list
            .iter()
            .position(|(k, l)| k == key && Arc::ptr_eq(l, listener))
            .expect("unsubscribing a listener that isn't subscribed");
        list.swap_remove(pos);
    }

    fn len(&self) -> usize {
        self.list.lock().len()
    }
}

//------------ MockEndpoints -------------------------------------------------

/// An endpoints watcher with a fixed set of services.
#[derive(Default)]
pub struct MockEndpoints {
    journal: Option<Arc<Journal>>,
    services: Mutex<HashMap<ServiceId, ServiceMetadata>>,
    endpoints: Mutex<HashMap<(ServiceId, u16), Vec<SocketAddr>>>,
    fail_lookups: Mutex<bool>,
    subscribers: Subscribers<(ServiceId, u16)>,
}

impl MockEndpoints {
    pub fn new(journal: Arc<Journal>) -> Self {
        MockEndpoints {
            journal: Some(journal),
            ..Default::default()
        }
    }

    pub fn add_service(&self, svc: ServiceMetadata) {
        self.services.lock().insert(svc.id().clone(), svc);
    }

    pub fn add_endpoints(&self, id: ServiceId, port: u16, addrs: &[&str]) {
        self.endpoints.lock().insert(
            (id, port),
            addrs.iter().map(|addr| addr.parse().unwrap()).collect(),
        );
    }

    pub fn fail_lookups(&self) {
        *self.fail_lookups.lock() = true;
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn record(&self, event: Event) {
        if let Some(journal) = self.journal.as_ref() {
            journal.push(event)
        }
    }
}

impl EndpointsWatcher for MockEndpoints {
    type Error = io::Error;

    fn subscribe(&self, id: &ServiceId, port: u16, listener: SharedListener) {
        let key = (id.clone(), port);
        let update = match self.endpoints.lock().get(&key) {
            Some(addrs) => Update::Add(addrs.clone()),
            None => Update::NoEndpoints {
                exists: self.services.lock().contains_key(id),
            },
        };
        listener.update(update);
        self.subscribers.add(key, listener);
        self.record(Event::Subscribe(id.to_string(), port));
    }

    fn unsubscribe(
        &self,
        id: &ServiceId,
        port: u16,
        listener: &SharedListener,
    ) {
        self.subscribers.remove(&(id.clone(), port), listener);
        self.record(Event::Unsubscribe(id.to_string(), port));
    }

    fn get_service(
        &self,
        id: &ServiceId,
    ) -> Result<Option<ServiceMetadata>, Self::Error> {
        if *self.fail_lookups.lock() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "service cache not synced",
            ));
        }
        Ok(self.services.lock().get(id).cloned())
    }
}

//------------ MockDns -------------------------------------------------------

/// A DNS watcher with a fixed set of host names.
#[derive(Default)]
pub struct MockDns {
    journal: Option<Arc<Journal>>,
    hosts: Mutex<HashMap<String, Vec<SocketAddr>>>,
    subscribers: Subscribers<String>,
}

impl MockDns {
    pub fn new(journal: Arc<Journal>) -> Self {
        MockDns {
            journal: Some(journal),
            ..Default::default()
        }
    }

    pub fn add_host(&self, name: &str, addrs: &[&str]) {
        self.hosts.lock().insert(
            name.into(),
            addrs.iter().map(|addr| addr.parse().unwrap()).collect(),
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn record(&self, event: Event) {
        if let Some(journal) = self.journal.as_ref() {
            journal.push(event)
        }
    }
}

impl DnsWatcher for MockDns {
    fn subscribe(&self, name: &str, listener: SharedListener) {
        if let Some(addrs) = self.hosts.lock().get(name) {
            listener.update(Update::Add(addrs.clone()));
        }
        self.subscribers.add(name.into(), listener);
        self.record(Event::DnsSubscribe(name.into()));
    }

    fn unsubscribe(&self, name: &str, listener: &SharedListener) {
        self.subscribers.remove(&name.into(), listener);
        self.record(Event::DnsUnsubscribe(name.into()));
    }
}

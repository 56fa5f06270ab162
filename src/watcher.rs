//! The collaborators that deliver endpoint updates.
//!
//! Resolving a destination only decides _who_ is going to provide updates
//! for it. The actual work is done by two kinds of watchers: an
//! [`EndpointsWatcher`] tracks the endpoints of services within the
//! cluster and a [`DnsWatcher`] tracks the addresses of external names.
//! Both deliver what they learn to an [`UpdateListener`].
//!
//! Watchers are shared between all concurrent resolutions and must be safe
//! to use from many tasks at once.

use core::future::Future;
use core::pin::Pin;
use std::boxed::Box;
use std::net::SocketAddr;
use std::sync::Arc;
use std::vec::Vec;

use crate::service::{ServiceId, ServiceMetadata};

//------------ Update --------------------------------------------------------

/// A change to the endpoints of a destination.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Update {
    /// These endpoints have been added.
    Add(Vec<SocketAddr>),

    /// These endpoints have been removed.
    Remove(Vec<SocketAddr>),

    /// There currently are no endpoints.
    ///
    /// The flag states whether the destination itself is known.
    NoEndpoints { exists: bool },
}

//------------ UpdateListener ------------------------------------------------

/// The receiving end of a destination stream.
///
/// A listener represents one stream opened by a proxy. Watchers feed it
/// updates via [`update`][Self::update]. The stream ends once the future
/// returned by [`done`][Self::done] resolves, which is the only way a
/// resolution finishes. If a listener should time out, it needs to
/// resolve that future when it does.
pub trait UpdateListener: Send + Sync {
    /// Delivers an update to the stream.
    fn update(&self, update: Update);

    /// Returns a future that resolves when the stream has ended.
    fn done(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// A listener shared between a resolution and a watcher.
///
/// Watchers identify a listener by the address of its allocation, i.e.,
/// via [`Arc::ptr_eq`].
pub type SharedListener = Arc<dyn UpdateListener>;

//------------ EndpointsWatcher ----------------------------------------------

/// A type tracking the endpoints of services in the cluster.
pub trait EndpointsWatcher: Send + Sync {
    /// The error returned when looking up a service fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Starts delivering updates for a service port to a listener.
    fn subscribe(&self, id: &ServiceId, port: u16, listener: SharedListener);

    /// Stops delivering updates for a service port to a listener.
    fn unsubscribe(
        &self,
        id: &ServiceId,
        port: u16,
        listener: &SharedListener,
    );

    /// Looks up what is known about a service.
    ///
    /// Returns `Ok(None)` if the service does not currently exist.
    fn get_service(
        &self,
        id: &ServiceId,
    ) -> Result<Option<ServiceMetadata>, Self::Error>;
}

impl<T: EndpointsWatcher + ?Sized> EndpointsWatcher for Arc<T> {
    type Error = T::Error;

    fn subscribe(&self, id: &ServiceId, port: u16, listener: SharedListener) {
        (**self).subscribe(id, port, listener)
    }

    fn unsubscribe(
        &self,
        id: &ServiceId,
        port: u16,
        listener: &SharedListener,
    ) {
        (**self).unsubscribe(id, port, listener)
    }

    fn get_service(
        &self,
        id: &ServiceId,
    ) -> Result<Option<ServiceMetadata>, Self::Error> {
        (**self).get_service(id)
    }
}

//------------ DnsWatcher ----------------------------------------------------

/// A type tracking the addresses of external host names.
pub trait DnsWatcher: Send + Sync {
    /// Starts delivering updates for a host name to a listener.
    fn subscribe(&self, name: &str, listener: SharedListener);

    /// Stops delivering updates for a host name to a listener.
    fn unsubscribe(&self, name: &str, listener: &SharedListener);
}

impl<T: DnsWatcher + ?Sized> DnsWatcher for Arc<T> {
    fn subscribe(&self, name: &str, listener: SharedListener) {
        (**self).subscribe(name, listener)
    }

    fn unsubscribe(&self, name: &str, listener: &SharedListener) {
        (**self).unsubscribe(name, listener)
    }
}

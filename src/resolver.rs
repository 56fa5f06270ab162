//! Resolving destinations into endpoint streams.
//!
//! The [`K8sResolver`] turns the host name of a destination into a stream
//! of endpoint updates for local cluster services. It first decides
//! whether the host names a local service via [`local_service_id`]. It
//! then looks up the service and subscribes the listener either with the
//! endpoints watcher or, for services that alias an external name, with
//! the DNS watcher. The subscription lasts until the listener is done.
//!
//! [`local_service_id`]: crate::service::local_service_id

use core::future::Future;
use core::pin::Pin;
use std::boxed::Box;

use tracing::{debug, error};

use crate::conf::ResolverConf;
use crate::error::Error;
use crate::name::NameError;
use crate::service::{local_service_id, ServiceId, ServiceMetadata};
use crate::watcher::{DnsWatcher, EndpointsWatcher, SharedListener};

//------------ StreamingResolver ---------------------------------------------

/// A type that can resolve destinations into endpoint streams.
pub trait StreamingResolver: Send + Sync {
    /// Returns whether the resolver is responsible for a destination.
    fn can_resolve(&self, host: &str, port: u16) -> Result<bool, Error>;

    /// Streams endpoint updates for a destination to a listener.
    ///
    /// The returned future resolves once the listener is done.
    fn stream_resolution<'a>(
        &'a self,
        host: &'a str,
        port: u16,
        listener: SharedListener,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;
}

//------------ K8sResolver ---------------------------------------------------

/// A resolver for the services of the local cluster.
///
/// The resolver keeps no state of its own beyond its configuration. All
/// concurrent resolutions share the two watchers.
#[derive(Clone, Debug)]
pub struct K8sResolver<E, D> {
    conf: ResolverConf,
    endpoints: E,
    dns: D,
}

impl<E, D> K8sResolver<E, D> {
    /// Creates a new resolver.
    pub fn new(conf: ResolverConf, endpoints: E, dns: D) -> Self {
        K8sResolver {
            conf,
            endpoints,
            dns,
        }
    }

    pub fn conf(&self) -> &ResolverConf {
        &self.conf
    }

    pub fn endpoints(&self) -> &E {
        &self.endpoints
    }

    pub fn dns(&self) -> &D {
        &self.dns
    }

    /// Returns the service `host` refers to if it is a local service.
    pub fn local_service_id(
        &self,
        host: &str,
    ) -> Result<Option<ServiceId>, NameError> {
        local_service_id(self.conf.zone_labels(), host)
    }

    /// Returns whether `host` refers to a local service.
    pub fn can_resolve(&self, host: &str, _port: u16) -> Result<bool, Error> {
        Ok(self.local_service_id(host)?.is_some())
    }
}

impl<E: EndpointsWatcher, D: DnsWatcher> K8sResolver<E, D> {
    /// Streams the endpoints of the local service `host` to `listener`.
    ///
    /// Only returns once the listener is done. Fails right away without
    /// subscribing if `host` isn’t a local service name or if looking up
    /// the service fails. A service the endpoints watcher doesn’t know is
    /// still subscribed to as it may appear later.
    pub async fn stream_resolution(
        &self,
        host: &str,
        port: u16,
        listener: SharedListener,
    ) -> Result<(), Error> {
        let id = match self.local_service_id(host) {
            Ok(Some(id)) => id,
            Ok(None) => {
                // XXX Names that aren’t local services should be resolved
                //     via DNS the way the cluster’s ClusterFirst policy
                //     does it.
                let err = Error::UnresolvableHost(host.into());
                error!("{}", err);
                return Err(err);
            }
            Err(err) => {
                error!("{}", err);
                return Err(err.into());
            }
        };

        let svc = match self.endpoints.get_service(&id) {
            Ok(svc) => svc,
            Err(err) => {
                let err = Error::metadata_lookup(&id, err);
                error!("{}", err);
                return Err(err);
            }
        };

        match svc.as_ref().and_then(ServiceMetadata::external_name) {
            Some(target) => self.resolve_external_name(target, listener).await,
            None => self.resolve_service(&id, port, listener).await,
        }
    }

    async fn resolve_service(
        &self,
        id: &ServiceId,
        port: u16,
        listener: SharedListener,
    ) -> Result<(), Error> {
        let sub = ServiceSubscription::new(&self.endpoints, id, port, listener);
        sub.listener.done().await;
        drop(sub);
        Ok(())
    }

    async fn resolve_external_name(
        &self,
        name: &str,
        listener: SharedListener,
    ) -> Result<(), Error> {
        let sub = NameSubscription::new(&self.dns, name, listener);
        sub.listener.done().await;
        drop(sub);
        Ok(())
    }
}

impl<E: EndpointsWatcher, D: DnsWatcher> StreamingResolver
    for K8sResolver<E, D>
{
    fn can_resolve(&self, host: &str, port: u16) -> Result<bool, Error> {
        K8sResolver::can_resolve(self, host, port)
    }

    fn stream_resolution<'a>(
        &'a self,
        host: &'a str,
        port: u16,
        listener: SharedListener,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>> {
        Box::pin(K8sResolver::stream_resolution(self, host, port, listener))
    }
}

//------------ ServiceSubscription -------------------------------------------

/// A listener subscribed to a service port with the endpoints watcher.
///
/// The listener is unsubscribed when the value is dropped.
struct ServiceSubscription<'a, E: EndpointsWatcher> {
    watcher: &'a E,
    id: &'a ServiceId,
    port: u16,
    listener: SharedListener,
}

impl<'a, E: EndpointsWatcher> ServiceSubscription<'a, E> {
    fn new(
        watcher: &'a E,
        id: &'a ServiceId,
        port: u16,
        listener: SharedListener,
    ) -> Self {
        debug!(service = %id, port, "subscribing to endpoints");
        watcher.subscribe(id, port, listener.clone());
        ServiceSubscription {
            watcher,
            id,
            port,
            listener,
        }
    }
}

impl<E: EndpointsWatcher> Drop for ServiceSubscription<'_, E> {
    fn drop(&mut self) {
        debug!(
            service = %self.id,
            port = self.port,
            "unsubscribing from endpoints"
        );
        self.watcher.unsubscribe(self.id, self.port, &self.listener);
    }
}

//------------ NameSubscription ----------------------------------------------

/// A listener subscribed to an external name with the DNS watcher.
///
/// The listener is unsubscribed when the value is dropped.
struct NameSubscription<'a, D: DnsWatcher> {
    watcher: &'a D,
    name: &'a str,
    listener: SharedListener,
}

impl<'a, D: DnsWatcher> NameSubscription<'a, D> {
    fn new(watcher: &'a D, name: &'a str, listener: SharedListener) -> Self {
        debug!(external_name = name, "subscribing to external name");
        watcher.subscribe(name, listener.clone());
        NameSubscription {
            watcher,
            name,
            listener,
        }
    }
}

impl<D: DnsWatcher> Drop for NameSubscription<'_, D> {
    fn drop(&mut self) {
        debug!(
            external_name = self.name,
            "unsubscribing from external name"
        );
        self.watcher.unsubscribe(self.name, &self.listener);
    }
}

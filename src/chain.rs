//! Picking a resolver for a destination.

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use std::boxed::Box;
use std::vec::Vec;

use tracing::error;

use crate::error::Error;
use crate::resolver::StreamingResolver;
use crate::watcher::SharedListener;

//------------ ResolverChain -------------------------------------------------

/// An ordered list of resolvers.
///
/// A destination is resolved by the first resolver in the list that says
/// it can resolve it.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn StreamingResolver>>,
}

impl ResolverChain {
    /// Creates a new, empty chain.
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a resolver to the end of the chain.
    pub fn push(&mut self, resolver: impl StreamingResolver + 'static) {
        self.resolvers.push(Box::new(resolver))
    }

    /// Returns the chain with `resolver` appended.
    pub fn with(mut self, resolver: impl StreamingResolver + 'static) -> Self {
        self.push(resolver);
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Returns the first resolver that can resolve a destination.
    ///
    /// Stops at the first resolver that fails to decide.
    fn select(
        &self,
        host: &str,
        port: u16,
    ) -> Result<Option<&dyn StreamingResolver>, Error> {
        for resolver in &self.resolvers {
            if resolver.can_resolve(host, port)? {
                return Ok(Some(resolver.as_ref()));
            }
        }
        Ok(None)
    }

    /// Returns whether any resolver in the chain can resolve a destination.
    pub fn can_resolve(&self, host: &str, port: u16) -> Result<bool, Error> {
        Ok(self.select(host, port)?.is_some())
    }

    /// Streams endpoint updates via the first matching resolver.
    pub async fn stream_resolution(
        &self,
        host: &str,
        port: u16,
        listener: SharedListener,
    ) -> Result<(), Error> {
        match self.select(host, port) {
            Ok(Some(resolver)) => {
                resolver.stream_resolution(host, port, listener).await
            }
            Ok(None) => {
                let err = Error::NoResolver {
                    host: host.into(),
                    port,
                };
                error!("{}", err);
                Err(err)
            }
            Err(err) => {
                error!(
                    "resolver failed on host [{}] port [{}]: {}",
                    host, port, err
                );
                Err(err)
            }
        }
    }
}

//--- Debug

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("len", &self.resolvers.len())
            .finish()
    }
}

//--- StreamingResolver

impl StreamingResolver for ResolverChain {
    fn can_resolve(&self, host: &str, port: u16) -> Result<bool, Error> {
        ResolverChain::can_resolve(self, host, port)
    }

    fn stream_resolution<'a>(
        &'a self,
        host: &'a str,
        port: u16,
        listener: SharedListener,
    ) -> Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>> {
        Box::pin(ResolverChain::stream_resolution(self, host, port, listener))
    }
}

//============ Testing =======================================================

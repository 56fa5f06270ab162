//! Error type for resolving destinations.

use core::fmt;
use std::error;
use std::string::String;
use std::sync::Arc;

use crate::name::NameError;
use crate::service::ServiceId;

//------------ Error ---------------------------------------------------------

/// Resolving a destination failed.
#[derive(Clone, Debug)]
pub enum Error {
    /// The host name was malformed.
    MalformedName(NameError),

    /// The host name is valid but doesn’t refer to a local service.
    UnresolvableHost(String),

    /// Looking up the metadata of a service failed.
    MetadataLookup {
        service: ServiceId,
        source: Arc<dyn error::Error + Send + Sync>,
    },

    /// None of a set of resolvers was able to resolve a host.
    NoResolver { host: String, port: u16 },
}

impl Error {
    pub(crate) fn metadata_lookup(
        service: &ServiceId,
        err: impl error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::MetadataLookup {
            service: service.clone(),
            source: Arc::new(err),
        }
    }
}

//--- From

impl From<NameError> for Error {
    fn from(err: NameError) -> Self {
        Error::MalformedName(err)
    }
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedName(err) => fmt::Display::fmt(err, f),
            Error::UnresolvableHost(host) => write!(
                f,
                "cannot resolve service that isn't a local Kubernetes \
                 service: {}",
                host
            ),
            Error::MetadataLookup { service, source } => {
                write!(f, "error retrieving service [{}]: {}", service, source)
            }
            Error::NoResolver { host, port } => {
                write!(
                    f,
                    "cannot find resolver for host [{}] port [{}]",
                    host, port
                )
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::MalformedName(err) => Some(err),
            Error::UnresolvableHost(_) => None,
            Error::MetadataLookup { source, .. } => Some(&**source),
            Error::NoResolver { .. } => None,
        }
    }
}

//============ Testing =======================================================

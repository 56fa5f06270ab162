//! Local cluster services.
//!
//! This module contains the types identifying and describing services of
//! the local cluster as well as [`local_service_id`] which decides whether
//! a host name refers to such a service.

use core::fmt;
use core::str::FromStr;
use std::string::String;

use crate::name::{split_host, strip_suffix, NameError};

//------------ Module Configuration ------------------------------------------

/// The labels of the zone accepted as an alias for the configured zone.
///
/// The Kubernetes DNS specification doesn’t require clusters to answer for
/// `cluster.local` if they are configured with a different zone, but some
/// hosting providers do so anyway and proxies may use it.
pub const CLUSTER_LOCAL: [&str; 2] = ["cluster", "local"];

/// The label marking a name as a service name.
pub const SVC_LABEL: &str = "svc";

//------------ local_service_id ----------------------------------------------

/// Returns the identifier of the local service `host` refers to.
///
/// The host name has to be of the form `<service>.<namespace>.svc.<zone>`
/// where the zone is either given by `zone_labels` or is `cluster.local`.
/// The configured zone is only tried if `zone_labels` isn’t empty.
///
/// A trailing `svc` label is accepted even if neither zone matches, i.e.,
/// `<service>.<namespace>.svc` is a service name, too. Hosts are supposed
/// to be fully qualified, so this is technically wrong, but proxies don’t
/// know the cluster zone and send such names regardless.
///
/// Returns `Ok(None)` if the host does not end in the labels of a service
/// name. Returns an error if `host` isn’t a valid host name or if there
/// is anything other than exactly a service and namespace label in front
/// of the `svc` label. The latter excludes federated service names.
pub fn local_service_id<S: AsRef<str>>(
    zone_labels: &[S],
    host: &str,
) -> Result<Option<ServiceId>, NameError> {
    let labels = split_host(host)?;
    let mut labels = labels.as_slice();

    let mut matched = false;
    if !zone_labels.is_empty() {
        (labels, matched) = strip_suffix(labels, zone_labels);
    }
    if !matched {
        (labels, _) = strip_suffix(labels, &CLUSTER_LOCAL);
    }
    let (labels, matched) = strip_suffix(labels, &[SVC_LABEL]);
    if !matched {
        return Ok(None);
    }

    match *labels {
        [service, namespace] => Ok(Some(ServiceId::new(namespace, service))),
        _ => Err(NameError::NotAService(host.into())),
    }
}

//------------ ServiceId -----------------------------------------------------

/// The identifier of a service in the local cluster.
///
/// Identifiers are displayed and parsed as `namespace/name`, which is the
/// form used as key when looking up services.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ServiceId {
    namespace: String,
    name: String,
}

impl ServiceId {
    /// Creates a new identifier from a namespace and a service name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        ServiceId {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

//--- Display and FromStr

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl FromStr for ServiceId {
    type Err = ServiceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((namespace, name))
                if !namespace.is_empty()
                    && !name.is_empty()
                    && !name.contains('/') =>
            {
                Ok(ServiceId::new(namespace, name))
            }
            _ => Err(ServiceIdError(())),
        }
    }
}

//------------ ServiceKind ---------------------------------------------------

/// The type of a service.
///
/// All types but [`ExternalName`][ServiceKind::ExternalName] are served by
/// endpoints within the cluster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ServiceKind {
    ClusterIp,
    NodePort,
    LoadBalancer,

    /// An alias for the given external host name.
    ExternalName(String),
}

//------------ ServiceMetadata -----------------------------------------------

/// What the cluster knows about a service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceMetadata {
    id: ServiceId,
    kind: ServiceKind,
}

impl ServiceMetadata {
    pub fn new(id: ServiceId, kind: ServiceKind) -> Self {
        ServiceMetadata { id, kind }
    }

    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    pub fn kind(&self) -> &ServiceKind {
        &self.kind
    }

    /// Returns the target if the service is an external name alias.
    pub fn external_name(&self) -> Option<&str> {
        match &self.kind {
            ServiceKind::ExternalName(target) => Some(target),
            _ => None,
        }
    }
}

//============ Error Types ===================================================

//------------ ServiceIdError ------------------------------------------------

/// A string was not a service identifier of the form `namespace/name`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ServiceIdError(());

impl fmt::Display for ServiceIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("expected service identifier as namespace/name")
    }
}

impl std::error::Error for ServiceIdError {}

//============ Testing =======================================================

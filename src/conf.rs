//! Resolver configuration.
//!
//! The only thing a resolver needs to know about its environment is the
//! DNS zone of the cluster it runs in. It is given once when creating the
//! resolver and never changes afterwards.

use core::fmt;
use core::str::FromStr;
use std::string::String;
use std::vec::Vec;

use crate::name::{split_host, NameError};

//------------ ResolverConf --------------------------------------------------

/// The configuration of a resolver.
///
/// With the `serde` feature, the configuration can be deserialized from a
/// map with an optional `dns_zone` field holding the zone as a string,
/// e.g., `{ "dns_zone": "cluster.local" }`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "RawConf", into = "RawConf")
)]
pub struct ResolverConf {
    /// The labels of the cluster’s DNS zone.
    ///
    /// If this is empty, no zone has been configured.
    zone_labels: Vec<String>,
}

impl ResolverConf {
    /// Creates a new configuration without a cluster zone.
    ///
    /// A resolver using this configuration only recognizes service names
    /// in `cluster.local` or ending in `svc`.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a configuration for the given cluster zone.
    ///
    /// The zone may be given as a fully qualified name, i.e., with a
    /// trailing dot. An empty string means that no zone is configured.
    pub fn from_zone(zone: &str) -> Result<Self, NameError> {
        if zone.is_empty() {
            return Ok(Self::new());
        }
        Ok(ResolverConf {
            zone_labels: split_host(zone)?
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }

    /// Returns the labels of the cluster zone.
    pub fn zone_labels(&self) -> &[String] {
        &self.zone_labels
    }

    /// Returns the cluster zone as a relative host name.
    pub fn zone(&self) -> String {
        self.zone_labels.join(".")
    }
}

//--- FromStr and Display

impl FromStr for ResolverConf {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_zone(s)
    }
}

impl fmt::Display for ResolverConf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "dns_zone={}", self.zone())
    }
}

//------------ RawConf -------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Deserialize, serde::Serialize)]
struct RawConf {
    #[serde(default)]
    dns_zone: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConf> for ResolverConf {
    type Error = NameError;

    fn try_from(raw: RawConf) -> Result<Self, Self::Error> {
        Self::from_zone(&raw.dns_zone)
    }
}

#[cfg(feature = "serde")]
impl From<ResolverConf> for RawConf {
    fn from(conf: ResolverConf) -> Self {
        RawConf {
            dns_zone: conf.zone(),
        }
    }
}

//============ Testing =======================================================

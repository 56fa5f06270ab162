//! Resolving service mesh destinations.
//!
//! Proxies in a service mesh ask the control plane for the endpoints of the
//! destinations they send traffic to. They identify a destination by a
//! host name and a port and expect a stream of updates to the set of
//! endpoints behind it. This crate provides the layer that decides whether
//! such a host name refers to a service of the local Kubernetes cluster
//! and, if so, which watcher should feed the stream.
//!
//! # Modules
//!
//! * [name] splits host names into labels, checks them, and matches label
//!   suffixes,
//! * [service] contains the service identifier and metadata types and the
//!   rules for recognizing local service names,
//! * [watcher] defines the traits for the endpoints and DNS watchers doing
//!   the actual tracking and for the listeners receiving their updates,
//! * [listener] provides a listener based on tokio channels,
//! * [resolver] contains [`K8sResolver`], the resolver for local services,
//!   and the [`StreamingResolver`] trait,
//! * [chain] allows combining several resolvers, and
//! * [conf] has the resolver configuration.
//!
//! # Recognizing Local Services
//!
//! A host name refers to a local service if it has the form
//! `<service>.<namespace>.svc.<zone>`. The zone is the cluster’s DNS zone
//! as given in the [`ResolverConf`]. Because some providers use it
//! regardless of the configured zone, `cluster.local` is accepted, too.
//! Proxies currently don’t know the zone, so names ending in `svc` without
//! any zone are also accepted.
//!
//! Services of type `ExternalName` are aliases for a host name outside the
//! cluster. Their updates are provided by the DNS watcher. All other
//! services, including those the cluster doesn’t currently know, are
//! tracked by the endpoints watcher.
//!
//! # Example
//!
//! ```rust,ignore
//! use destination::{listener, K8sResolver, ResolverConf};
//!
//! let conf = ResolverConf::from_zone("cluster.local")?;
//! let resolver = K8sResolver::new(conf, endpoints_watcher, dns_watcher);
//! let (listener, mut handle) = listener::channel();
//! tokio::spawn(async move {
//!     while let Some(update) = handle.recv().await {
//!         // forward the update to the proxy
//!     }
//! });
//! resolver
//!     .stream_resolution("web.shop.svc.cluster.local", 8080, listener)
//!     .await?;
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `logging`: adds [`init_logging`] which sets up a
//!   [tracing-subscriber](https://github.com/tokio-rs/tracing) based
//!   logger.
//! * `serde`: allows deserializing the resolver configuration. This
//!   feature is enabled by default.

#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chain;
pub mod conf;
pub mod error;
pub mod listener;
pub mod name;
pub mod resolver;
pub mod service;
pub mod watcher;

#[cfg(feature = "logging")]
mod logging;

pub use self::chain::ResolverChain;
pub use self::conf::ResolverConf;
pub use self::error::Error;
#[cfg(feature = "logging")]
pub use self::logging::init_logging;
pub use self::resolver::{K8sResolver, StreamingResolver};
pub use self::service::{ServiceId, ServiceKind, ServiceMetadata};

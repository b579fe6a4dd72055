//! Ports - interfaces implemented by the infrastructure layer

pub mod cluster;
pub mod divergence_resolver;
pub mod progress;
pub mod tracking_repository;

pub use cluster::{ClusterClient, ClusterError, ClusterResult, PodRef};
pub use divergence_resolver::{
    DivergenceAction, DivergenceContext, DivergenceResolver, ForceResolver, SafeResolver,
};
pub use progress::{NoopProgressSink, ProgressEvent, ProgressSink};
pub use tracking_repository::{TrackingError, TrackingRepository, TrackingResult};

//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{
    ConnectUseCase, DeleteUseCase, DeployUseCase, StatusUseCase, SyncUseCase,
};
use crate::config::Config;
use crate::infrastructure::{InteractiveResolver, KubectlClient, TomlTrackingRepository};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase =
    DeployUseCase<KubectlClient, TomlTrackingRepository, InteractiveResolver>;

/// Type alias for the concrete SyncUseCase with all dependencies
pub type ConcreteSyncUseCase =
    SyncUseCase<KubectlClient, TomlTrackingRepository, InteractiveResolver>;

/// Type alias for the concrete DeleteUseCase with all dependencies
pub type ConcreteDeleteUseCase =
    DeleteUseCase<KubectlClient, TomlTrackingRepository, InteractiveResolver>;

pub type ConcreteStatusUseCase = StatusUseCase<KubectlClient, TomlTrackingRepository>;

pub type ConcreteConnectUseCase = ConnectUseCase<KubectlClient>;

/// `kubectl` client for the configured binary and container
pub fn create_cluster_client(config: &Config) -> KubectlClient {
    KubectlClient::new(
        config.kubectl.binary.clone(),
        config.kubectl.container.clone(),
    )
}

/// Create a deploy use case with all dependencies wired up
pub fn create_deploy_use_case(config: &Config) -> ConcreteDeployUseCase {
    DeployUseCase::new(
        create_cluster_client(config),
        TomlTrackingRepository::new(),
        InteractiveResolver::new(),
        config.resource_builder(),
    )
    .with_default_port(config.defaults.port)
    .with_ready_timeout(config.ready_timeout())
}

pub fn create_sync_use_case(config: &Config) -> ConcreteSyncUseCase {
    SyncUseCase::new(
        create_cluster_client(config),
        TomlTrackingRepository::new(),
        InteractiveResolver::new(),
        config.mount_paths(),
    )
}

pub fn create_delete_use_case(config: &Config) -> ConcreteDeleteUseCase {
    DeleteUseCase::new(
        create_cluster_client(config),
        TomlTrackingRepository::new(),
        InteractiveResolver::new(),
        config.mount_paths(),
        config.defaults.namespace.clone(),
    )
}

pub fn create_status_use_case(config: &Config) -> ConcreteStatusUseCase {
    StatusUseCase::new(create_cluster_client(config), TomlTrackingRepository::new())
}

pub fn create_connect_use_case(config: &Config) -> ConcreteConnectUseCase {
    ConnectUseCase::new(create_cluster_client(config)).with_ready_timeout(config.ready_timeout())
}

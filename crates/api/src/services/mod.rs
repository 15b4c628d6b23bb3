// Path: crates/api/src/services/mod.rs
//! Traits for services that run inside block execution.

use crate::lifecycle::OnBeginBlock;
use chainfix_types::service_configs::Capabilities;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The base trait for any service managed by the chain.
pub trait BlockchainService: Any + Send + Sync {
    /// A unique, static string identifier for the service.
    fn id(&self) -> &'static str;

    /// Returns a bitmask of the capabilities this service implements.
    fn capabilities(&self) -> Capabilities;

    /// Provides access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Attempts to downcast this service to an `OnBeginBlock` trait object.
    fn as_on_begin_block(&self) -> Option<&dyn OnBeginBlock> {
        None
    }
}

/// A read-only, ordered registry of services.
///
/// Services are kept in registration order, which is also the order in which
/// their hooks run. That order is consensus-relevant.
#[derive(Clone, Default)]
pub struct ServiceDirectory {
    services: Arc<Vec<Arc<dyn BlockchainService>>>,
}

impl fmt::Debug for ServiceDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDirectory")
            .field(
                "services",
                &self.services.iter().map(|s| s.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ServiceDirectory {
    /// Creates a new directory from a list of services.
    pub fn new(services: Vec<Arc<dyn BlockchainService>>) -> Self {
        Self {
            services: Arc::new(services),
        }
    }

    /// Gets the first service of the given concrete type.
    pub fn get<T: BlockchainService>(&self) -> Option<&T> {
        self.services
            .iter()
            .find_map(|service| service.as_any().downcast_ref::<T>())
    }

    /// Returns an iterator over all services in registration order.
    pub fn services(&self) -> impl Iterator<Item = &Arc<dyn BlockchainService>> {
        self.services.iter()
    }
}

//! Lazy-loading proxy factory.

use std::fmt;

use crate::component::{Capability, Configurable};

/// Builds lazy-loading proxies for result objects.
pub trait ProxyFactory: Configurable + fmt::Debug + Send + Sync {}

impl Capability for dyn ProxyFactory {
    const NAME: &'static str = "proxy factory";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultProxyFactory;

impl DefaultProxyFactory {
    pub const TYPE_NAME: &'static str = "sqlmap.reflection.DefaultProxyFactory";
}

impl Configurable for DefaultProxyFactory {}

impl ProxyFactory for DefaultProxyFactory {}

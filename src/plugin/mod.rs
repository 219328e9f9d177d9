//! Plugin interceptors.
//!
//! # Responsibilities
//! - Define the `Interceptor` capability
//! - Keep interceptors in registration order
//!
//! # Design Decisions
//! - Order is document order; how the chain wraps calls at runtime belongs
//!   to the execution engine, not to this crate

use std::fmt;

use crate::component::{Capability, Component, Configurable};

/// A plugin that intercepts engine calls.
pub trait Interceptor: Configurable + fmt::Debug + Send + Sync {
    /// Whether this interceptor wants to wrap the named target (e.g. `Executor`).
    fn applies_to(&self, target: &str) -> bool {
        let _ = target;
        true
    }
}

impl Capability for dyn Interceptor {
    const NAME: &'static str = "interceptor";
}

/// Interceptors in the order they were declared.
#[derive(Debug, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Component<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, interceptor: Component<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component<dyn Interceptor>> {
        self.interceptors.iter()
    }

    /// Interceptors wrapping `target`, in registration order.
    pub fn for_target<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Component<dyn Interceptor>> + 'a {
        self.interceptors.iter().filter(move |i| i.applies_to(target))
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

//! Object creation and property-access strategies.
//!
//! These are the pluggable factories the engine consults when it builds
//! result objects. This crate only decides which implementation is installed.

pub mod factories;
pub mod proxy;

pub use factories::{
    DefaultObjectFactory, DefaultObjectWrapperFactory, DefaultReflectorFactory, ObjectFactory,
    ObjectWrapperFactory, ReflectorFactory,
};
pub use proxy::{DefaultProxyFactory, ProxyFactory};

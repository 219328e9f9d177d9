//! Built-in components and aliases.
//!
//! Everything a document can name without registering custom types: value
//! types, transaction and data-source factories, the vendor database-id
//! provider, scripting drivers, log implementations and the default
//! reflection factories.

use crate::component::{ComponentRegistry, TypeInfo};
use crate::datasource::{DataSourceFactory, PooledDataSourceFactory, UnpooledDataSourceFactory};
use crate::mapping::{DatabaseIdProvider, VendorDatabaseIdProvider};
use crate::reflection::{
    DefaultObjectFactory, DefaultObjectWrapperFactory, DefaultProxyFactory, DefaultReflectorFactory,
    ObjectFactory, ObjectWrapperFactory, ProxyFactory, ReflectorFactory,
};
use crate::transaction::{JdbcTransactionFactory, ManagedTransactionFactory, TransactionFactory};

pub const XML_LANGUAGE_DRIVER: &str = "sqlmap.scripting.XmlLanguageDriver";
pub const RAW_LANGUAGE_DRIVER: &str = "sqlmap.scripting.RawLanguageDriver";
pub const ENUM_TYPE_HANDLER: &str = "sqlmap.types.EnumTypeHandler";
pub const ENUM_ORDINAL_TYPE_HANDLER: &str = "sqlmap.types.EnumOrdinalTypeHandler";
pub const TRACING_LOG: &str = "sqlmap.logging.TracingLog";
pub const STDOUT_LOG: &str = "sqlmap.logging.StdoutLog";
pub const NO_LOGGING: &str = "sqlmap.logging.NoLogging";
pub const DEFAULT_VFS: &str = "sqlmap.io.DefaultVfs";

const VALUE_TYPES: &[(&str, &str)] = &[
    ("string", "String"),
    ("byte", "i8"),
    ("short", "i16"),
    ("int", "i32"),
    ("integer", "i32"),
    ("long", "i64"),
    ("float", "f32"),
    ("double", "f64"),
    ("boolean", "bool"),
    ("char", "char"),
    ("decimal", "Decimal"),
    ("bigdecimal", "Decimal"),
    ("date", "Date"),
    ("timestamp", "Timestamp"),
    ("object", "Object"),
    ("map", "Map"),
    ("hashmap", "Map"),
    ("list", "List"),
    ("arraylist", "List"),
    ("collection", "Collection"),
    ("bytes", "Bytes"),
];

pub fn register_defaults(registry: &mut ComponentRegistry) {
    for (alias, type_name) in VALUE_TYPES {
        registry
            .register_type(TypeInfo::class(*type_name))
            .register_alias(alias, *type_name);
    }

    registry
        .register_component::<dyn TransactionFactory, _>(JdbcTransactionFactory::TYPE_NAME, || {
            Box::new(JdbcTransactionFactory::default())
        })
        .register_alias("JDBC", JdbcTransactionFactory::TYPE_NAME)
        .register_component::<dyn TransactionFactory, _>(ManagedTransactionFactory::TYPE_NAME, || {
            Box::new(ManagedTransactionFactory::default())
        })
        .register_alias("MANAGED", ManagedTransactionFactory::TYPE_NAME);

    registry
        .register_component::<dyn DataSourceFactory, _>(UnpooledDataSourceFactory::TYPE_NAME, || {
            Box::new(UnpooledDataSourceFactory::default())
        })
        .register_alias("UNPOOLED", UnpooledDataSourceFactory::TYPE_NAME)
        .register_component::<dyn DataSourceFactory, _>(PooledDataSourceFactory::TYPE_NAME, || {
            Box::new(PooledDataSourceFactory::default())
        })
        .register_alias("POOLED", PooledDataSourceFactory::TYPE_NAME);

    registry
        .register_component::<dyn DatabaseIdProvider, _>(VendorDatabaseIdProvider::TYPE_NAME, || {
            Box::new(VendorDatabaseIdProvider::default())
        })
        .register_alias("DB_VENDOR", VendorDatabaseIdProvider::TYPE_NAME);

    registry
        .register_component::<dyn ObjectFactory, _>(DefaultObjectFactory::TYPE_NAME, || {
            Box::new(DefaultObjectFactory::default())
        })
        .register_component::<dyn ObjectWrapperFactory, _>(DefaultObjectWrapperFactory::TYPE_NAME, || {
            Box::new(DefaultObjectWrapperFactory)
        })
        .register_component::<dyn ReflectorFactory, _>(DefaultReflectorFactory::TYPE_NAME, || {
            Box::new(DefaultReflectorFactory::default())
        })
        .register_component::<dyn ProxyFactory, _>(DefaultProxyFactory::TYPE_NAME, || {
            Box::new(DefaultProxyFactory)
        })
        .register_alias("DEFAULT_PROXY", DefaultProxyFactory::TYPE_NAME);

    registry
        .register_type(TypeInfo::class(XML_LANGUAGE_DRIVER))
        .register_alias("XML", XML_LANGUAGE_DRIVER)
        .register_type(TypeInfo::class(RAW_LANGUAGE_DRIVER))
        .register_alias("RAW", RAW_LANGUAGE_DRIVER)
        .register_type(TypeInfo::type_handler(ENUM_TYPE_HANDLER))
        .register_type(TypeInfo::type_handler(ENUM_ORDINAL_TYPE_HANDLER))
        .register_type(TypeInfo::class(TRACING_LOG))
        .register_alias("TRACING", TRACING_LOG)
        .register_type(TypeInfo::class(STDOUT_LOG))
        .register_alias("STDOUT_LOGGING", STDOUT_LOG)
        .register_type(TypeInfo::class(NO_LOGGING))
        .register_alias("NO_LOGGING", NO_LOGGING)
        .register_type(TypeInfo::class(DEFAULT_VFS));
}

//! Builder error taxonomy.

use std::fmt;

use thiserror::Error;

use crate::component::{AliasError, ComponentError};
use crate::datasource::DataSourceError;
use crate::io::ResourceError;
use crate::mapping::MapperError;
use crate::properties::PropertySourceError;
use crate::types::TypeHandlerError;

/// Document sections, named as the document spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Properties,
    Settings,
    VfsImpl,
    LogImpl,
    TypeAliases,
    Plugins,
    ObjectFactory,
    ObjectWrapperFactory,
    ReflectorFactory,
    Environments,
    DatabaseIdProvider,
    TypeHandlers,
    Mappers,
}

impl Section {
    /// Element name of the section.
    pub fn element(self) -> &'static str {
        match self {
            Section::Properties => "properties",
            Section::Settings => "settings",
            Section::VfsImpl => "vfsImpl",
            Section::LogImpl => "logImpl",
            Section::TypeAliases => "typeAliases",
            Section::Plugins => "plugins",
            Section::ObjectFactory => "objectFactory",
            Section::ObjectWrapperFactory => "objectWrapperFactory",
            Section::ReflectorFactory => "reflectorFactory",
            Section::Environments => "environments",
            Section::DatabaseIdProvider => "databaseIdProvider",
            Section::TypeHandlers => "typeHandlers",
            Section::Mappers => "mappers",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element())
    }
}

/// Errors raised while assembling a configuration.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("each ConfigBuilder can only be used once")]
    Reuse,

    #[error("document root is <{found}>, expected <configuration>")]
    MissingRoot { found: String },

    #[error("unknown setting(s) {}; names are case sensitive", keys.join(", "))]
    UnknownSetting { keys: Vec<String> },

    #[error("invalid value '{value}' for setting {key}: {reason}")]
    InvalidSettingValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("environment '{environment}' declares no {factory}")]
    MissingFactory {
        environment: String,
        factory: &'static str,
    },

    #[error("no environment specified")]
    MissingEnvironmentId,

    #[error("environment requires an id attribute")]
    EnvironmentWithoutId,

    #[error("a mapper element must specify exactly one of url, resource or class")]
    MappingReferenceConflict {
        resource: Option<String>,
        url: Option<String>,
        class: Option<String>,
    },

    #[error("<{element}> requires a {attribute} attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("invalid {attribute} '{value}' on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error(transparent)]
    AliasRegistration(#[from] AliasError),

    #[error(transparent)]
    Properties(#[from] PropertySourceError),

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Mapper(#[from] MapperError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    TypeHandler(#[from] TypeHandlerError),

    /// Any of the above, tagged with the section that raised it.
    #[error("error parsing <{section}>: {source}")]
    Section {
        section: Section,
        #[source]
        source: Box<BuilderError>,
    },
}

impl BuilderError {
    pub(crate) fn in_section(self, section: Section) -> Self {
        match self {
            already @ BuilderError::Section { .. } => already,
            source => BuilderError::Section {
                section,
                source: Box::new(source),
            },
        }
    }

    /// Section that failed, when known.
    pub fn section(&self) -> Option<Section> {
        match self {
            BuilderError::Section { section, .. } => Some(*section),
            _ => None,
        }
    }

    /// The error with section context stripped.
    pub fn root_cause(&self) -> &BuilderError {
        match self {
            BuilderError::Section { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

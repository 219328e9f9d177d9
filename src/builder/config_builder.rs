//! The configuration assembly builder.
//!
//! # Responsibilities
//! - Own the document, the target configuration and the external collaborators
//! - Run the section processors once, in a fixed order
//! - Attach the failing section to every error
//!
//! # Design Decisions
//! - Each section node is evaluated right before its stage runs, so
//!   placeholders see the variables the properties section produced
//! - Settings are read and validated early but applied only after the
//!   reflection factories are installed
//! - Any failure aborts the parse; the partially built configuration is dropped

use std::fmt;
use std::sync::Arc;

use crate::builder::error::Section;
use crate::builder::{environments, mappers, sections, settings, BuilderError};
use crate::component::ComponentRegistry;
use crate::document::{ConfigDocument, DocumentError};
use crate::io::{FileSystemLoader, ResourceLoader};
use crate::mapping::{MapperSourceParser, XmlMapperParser};
use crate::properties::{PropertyBag, PropertyResolver};
use crate::session::Configuration;

const ROOT_ELEMENT: &str = "configuration";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
    Unparsed,
    Parsed,
}

/// One step of the parse, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Properties,
    ReadSettings,
    VfsImpl,
    LogImpl,
    TypeAliases,
    Plugins,
    ObjectFactory,
    ObjectWrapperFactory,
    ReflectorFactory,
    ApplySettings,
    Environments,
    DatabaseIdProvider,
    TypeHandlers,
    Mappers,
}

const STAGES: [Stage; 14] = [
    Stage::Properties,
    Stage::ReadSettings,
    Stage::VfsImpl,
    Stage::LogImpl,
    Stage::TypeAliases,
    Stage::Plugins,
    Stage::ObjectFactory,
    Stage::ObjectWrapperFactory,
    Stage::ReflectorFactory,
    Stage::ApplySettings,
    Stage::Environments,
    Stage::DatabaseIdProvider,
    Stage::TypeHandlers,
    Stage::Mappers,
];

impl Stage {
    fn section(self) -> Section {
        match self {
            Stage::Properties => Section::Properties,
            Stage::ReadSettings | Stage::ApplySettings => Section::Settings,
            Stage::VfsImpl => Section::VfsImpl,
            Stage::LogImpl => Section::LogImpl,
            Stage::TypeAliases => Section::TypeAliases,
            Stage::Plugins => Section::Plugins,
            Stage::ObjectFactory => Section::ObjectFactory,
            Stage::ObjectWrapperFactory => Section::ObjectWrapperFactory,
            Stage::ReflectorFactory => Section::ReflectorFactory,
            Stage::Environments => Section::Environments,
            Stage::DatabaseIdProvider => Section::DatabaseIdProvider,
            Stage::TypeHandlers => Section::TypeHandlers,
            Stage::Mappers => Section::Mappers,
        }
    }

    /// Whether the stage reads its own element. The settings-derived stages
    /// work from the values collected by `ReadSettings`.
    fn reads_node(self) -> bool {
        !matches!(self, Stage::VfsImpl | Stage::LogImpl | Stage::ApplySettings)
    }
}

/// Builds a [`Configuration`] from a configuration document.
///
/// ```no_run
/// use sqlmap_config::builder::ConfigBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let xml = std::fs::read_to_string("sqlmap-config.xml")?;
/// let mut builder = ConfigBuilder::from_xml(&xml, Some("production"), None)?;
/// let configuration = builder.parse()?;
/// # let _ = configuration;
/// # Ok(())
/// # }
/// ```
pub struct ConfigBuilder {
    state: BuilderState,
    document: ConfigDocument,
    environment: Option<String>,
    configuration: Option<Configuration>,
    loader: Box<dyn ResourceLoader>,
    mapper_parser: Box<dyn MapperSourceParser>,
}

impl ConfigBuilder {
    /// `properties` seeds the variables; when given it replaces the
    /// document's own variables.
    pub fn new(document: ConfigDocument, environment: Option<&str>, properties: Option<PropertyBag>) -> Self {
        let mut document = document;
        if let Some(properties) = properties {
            document.set_variables(properties);
        }
        let mut configuration = Configuration::new(Arc::new(ComponentRegistry::with_defaults()));
        configuration.variables = document.variables().clone();

        Self {
            state: BuilderState::Unparsed,
            document,
            environment: environment.map(str::to_string),
            configuration: Some(configuration),
            loader: Box::new(FileSystemLoader::default()),
            mapper_parser: Box::new(XmlMapperParser),
        }
    }

    pub fn from_xml(
        xml: &str,
        environment: Option<&str>,
        properties: Option<PropertyBag>,
    ) -> Result<Self, DocumentError> {
        let document = ConfigDocument::parse(xml, PropertyBag::new())?;
        Ok(Self::new(document, environment, properties))
    }

    /// Build into a caller-supplied configuration (for example one holding a
    /// registry with application components). Seed variables carry over.
    pub fn with_configuration(mut self, mut configuration: Configuration) -> Self {
        configuration.variables = self.document.variables().clone();
        self.configuration = Some(configuration);
        self
    }

    pub fn with_resource_loader(mut self, loader: impl ResourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn with_mapper_parser(mut self, parser: impl MapperSourceParser + 'static) -> Self {
        self.mapper_parser = Box::new(parser);
        self
    }

    /// Run every section once and hand back the configuration.
    ///
    /// A second call fails with [`BuilderError::Reuse`].
    pub fn parse(&mut self) -> Result<Configuration, BuilderError> {
        if self.state == BuilderState::Parsed {
            return Err(BuilderError::Reuse);
        }
        self.state = BuilderState::Parsed;
        let mut configuration = self.configuration.take().ok_or(BuilderError::Reuse)?;

        if self.document.root_name() != ROOT_ELEMENT {
            return Err(BuilderError::MissingRoot {
                found: self.document.root_name().to_string(),
            });
        }

        let mut declared_settings = PropertyBag::new();
        for stage in STAGES {
            tracing::debug!(section = %stage.section(), stage = ?stage, "Parsing section");
            self.run_stage(stage, &mut declared_settings, &mut configuration)
                .map_err(|err| err.in_section(stage.section()))?;
        }

        tracing::info!(
            environment = configuration.environment.as_ref().map(|env| env.id()).unwrap_or("<none>"),
            database_id = configuration.database_id.as_deref().unwrap_or("<none>"),
            interceptors = configuration.interceptors.len(),
            mappers = configuration.mappers.len(),
            statements = configuration.mapped_statements().count(),
            "Configuration assembled"
        );
        Ok(configuration)
    }

    fn run_stage(
        &mut self,
        stage: Stage,
        declared_settings: &mut PropertyBag,
        configuration: &mut Configuration,
    ) -> Result<(), BuilderError> {
        let node = if stage.reads_node() {
            self.document.evaluate(stage.section().element())
        } else {
            None
        };
        let node = node.as_ref();
        match stage {
            Stage::Properties => {
                let variables = PropertyResolver::new(self.loader.as_ref()).resolve(node, &configuration.variables)?;
                self.document.set_variables(variables.clone());
                configuration.variables = variables;
            }
            Stage::ReadSettings => *declared_settings = settings::read_settings(node)?,
            Stage::VfsImpl => settings::load_vfs_impls(declared_settings, configuration)?,
            Stage::LogImpl => settings::load_log_impl(declared_settings, configuration)?,
            Stage::TypeAliases => sections::type_aliases(node, configuration)?,
            Stage::Plugins => sections::plugins(node, configuration)?,
            Stage::ObjectFactory => sections::object_factory(node, configuration)?,
            Stage::ObjectWrapperFactory => sections::object_wrapper_factory(node, configuration)?,
            Stage::ReflectorFactory => sections::reflector_factory(node, configuration)?,
            Stage::ApplySettings => settings::apply_settings(declared_settings, configuration)?,
            Stage::Environments => environments::environments(node, self.environment.as_deref(), configuration)?,
            Stage::DatabaseIdProvider => sections::database_id_provider(node, configuration)?,
            Stage::TypeHandlers => sections::type_handlers(node, configuration)?,
            Stage::Mappers => mappers::mappers(
                node,
                configuration,
                self.loader.as_ref(),
                self.mapper_parser.as_ref(),
            )?,
        }
        Ok(())
    }
}

impl fmt::Debug for ConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigBuilder")
            .field("state", &self.state)
            .field("environment", &self.environment)
            .field("root", &self.document.root_name())
            .finish_non_exhaustive()
    }
}

//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::builder::{BuilderError, ConfigBuilder};
use crate::component::ComponentRegistry;
use crate::document::{ConfigDocument, DocumentError};
use crate::io::FileSystemLoader;
use crate::properties::PropertyBag;
use crate::session::Configuration;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: std::io::Error },
    Document(DocumentError),
    Build(BuilderError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "IO error reading {}: {}", path.display(), source),
            LoadError::Document(e) => write!(f, "Document error: {}", e),
            LoadError::Build(e) => write!(f, "Build error: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Document(e) => Some(e),
            LoadError::Build(e) => Some(e),
        }
    }
}

/// Options for [`load_configuration`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Environment to select instead of the document's default.
    pub environment: Option<String>,
    /// Seed variables; they win over every declared property.
    pub properties: PropertyBag,
    /// Directories resource paths are resolved against. Empty means the
    /// document's own directory.
    pub resource_roots: Vec<PathBuf>,
    /// Component registry to build with. `None` uses the built-ins only.
    pub registry: Option<Arc<ComponentRegistry>>,
}

fn default_roots(path: &Path) -> Vec<PathBuf> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    vec![parent.to_path_buf()]
}

/// Load, parse and assemble a configuration document from disk.
pub fn load_configuration(path: &Path, options: LoadOptions) -> Result<Configuration, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = ConfigDocument::parse(&content, PropertyBag::new()).map_err(LoadError::Document)?;

    let roots = if options.resource_roots.is_empty() {
        default_roots(path)
    } else {
        options.resource_roots
    };
    tracing::debug!(path = %path.display(), roots = ?roots, "Loading configuration");

    let mut builder = ConfigBuilder::new(document, options.environment.as_deref(), Some(options.properties))
        .with_resource_loader(FileSystemLoader::new(roots));
    if let Some(registry) = options.registry {
        builder = builder.with_configuration(Configuration::new(registry));
    }
    builder.parse().map_err(LoadError::Build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_configuration(Path::new("/definitely/not/here.xml"), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("here.xml"));
    }

    #[test]
    fn test_relative_resources_resolve_next_to_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("db.properties"), "db.url=jdbc:h2:mem:loader\n").unwrap();
        fs::write(
            dir.path().join("config.xml"),
            r#"<configuration>
                 <properties resource="db.properties"/>
                 <environments default="dev">
                   <environment id="dev">
                     <transactionManager type="JDBC"/>
                     <dataSource type="POOLED"><property name="url" value="${db.url}"/></dataSource>
                   </environment>
                 </environments>
               </configuration>"#,
        )
        .unwrap();

        let configuration = load_configuration(&dir.path().join("config.xml"), LoadOptions::default()).unwrap();
        let environment = configuration.environment.unwrap();
        assert_eq!(environment.data_source().url(), Some("jdbc:h2:mem:loader"));
        assert!(environment.data_source().is_pooled());
    }

    #[test]
    fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        fs::write(&path, "<configuration><settings></configuration>").unwrap();
        let err = load_configuration(&path, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Document(_)));
    }
}

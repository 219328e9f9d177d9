//! Resource loaders.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

/// Errors raised while opening a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource root contains the path.
    #[error("could not find resource {resource}")]
    NotFound { resource: String },

    #[error("failed to read resource {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Opens configuration resources by path or URL.
pub trait ResourceLoader {
    /// Open a resource path relative to the loader's roots.
    fn open_resource(&self, resource: &str) -> Result<Box<dyn Read>, ResourceError>;

    /// Open an absolute URL.
    fn open_url(&self, url: &str) -> Result<Box<dyn Read>, ResourceError>;

    /// Read a whole resource into a string, releasing the stream before returning.
    fn read_resource_to_string(&self, resource: &str) -> Result<String, ResourceError> {
        let mut stream = self.open_resource(resource)?;
        read_all(&mut stream, resource)
    }

    /// Read a whole URL into a string, releasing the stream before returning.
    fn read_url_to_string(&self, url: &str) -> Result<String, ResourceError> {
        let mut stream = self.open_url(url)?;
        read_all(&mut stream, url)
    }
}

fn read_all(stream: &mut dyn Read, name: &str) -> Result<String, ResourceError> {
    let mut text = String::new();
    stream
        .read_to_string(&mut text)
        .map_err(|source| ResourceError::Io {
            resource: name.to_string(),
            source,
        })?;
    Ok(text)
}

/// Loads resources from the local file system.
///
/// Resource paths are tried against each root in order; the first existing
/// file wins. Absolute paths bypass the roots.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    roots: Vec<PathBuf>,
}

impl FileSystemLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn locate(&self, resource: &str) -> Option<PathBuf> {
        let candidate = Path::new(resource);
        if candidate.is_absolute() {
            return candidate.is_file().then(|| candidate.to_path_buf());
        }
        self.roots
            .iter()
            .map(|root| root.join(resource.trim_start_matches('/')))
            .find(|path| path.is_file())
    }
}

impl Default for FileSystemLoader {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(".")])
    }
}

impl ResourceLoader for FileSystemLoader {
    fn open_resource(&self, resource: &str) -> Result<Box<dyn Read>, ResourceError> {
        let path = self.locate(resource).ok_or_else(|| ResourceError::NotFound {
            resource: resource.to_string(),
        })?;
        let file = File::open(&path).map_err(|source| ResourceError::Io {
            resource: resource.to_string(),
            source,
        })?;
        tracing::debug!(resource, path = %path.display(), "Opened resource");
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_url(&self, url: &str) -> Result<Box<dyn Read>, ResourceError> {
        let parsed = Url::parse(url).map_err(|source| ResourceError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        match parsed.scheme() {
            "file" => {
                let path = parsed
                    .to_file_path()
                    .map_err(|_| ResourceError::NotFound {
                        resource: url.to_string(),
                    })?;
                let file = File::open(&path).map_err(|source| ResourceError::Io {
                    resource: url.to_string(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            "http" | "https" => {
                let response = reqwest::blocking::get(parsed)
                    .and_then(|response| response.error_for_status())
                    .map_err(|source| ResourceError::Http {
                        url: url.to_string(),
                        source,
                    })?;
                tracing::debug!(url, "Fetched remote resource");
                Ok(Box::new(response))
            }
            scheme => Err(ResourceError::UnsupportedScheme {
                url: url.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_resource_searches_roots_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("db.properties"), "url=second").unwrap();

        let loader = FileSystemLoader::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
        let text = loader.read_resource_to_string("db.properties").unwrap();
        assert_eq!(text, "url=second");

        std::fs::write(first.path().join("db.properties"), "url=first").unwrap();
        let text = loader.read_resource_to_string("db.properties").unwrap();
        assert_eq!(text, "url=first");
    }

    #[test]
    fn test_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileSystemLoader::new(vec![dir.path().to_path_buf()]);
        let err = loader.open_resource("nope.properties").err().unwrap();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }

    #[test]
    fn test_open_file_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "user=remote").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();

        let loader = FileSystemLoader::default();
        let text = loader.read_url_to_string(url.as_str()).unwrap();
        assert_eq!(text, "user=remote");
    }

    #[test]
    fn test_unsupported_scheme() {
        let loader = FileSystemLoader::default();
        let err = loader.open_url("ftp://example.com/db.properties").err().unwrap();
        assert!(matches!(err, ResourceError::UnsupportedScheme { scheme, .. } if scheme == "ftp"));
    }
}

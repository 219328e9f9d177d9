//! Deployment environments.

use std::fmt;
use std::sync::Arc;

use crate::component::Component;
use crate::datasource::DataSource;
use crate::transaction::TransactionFactory;

/// The selected environment: an id, its transaction factory and its data source.
pub struct Environment {
    id: String,
    transaction_factory: Component<dyn TransactionFactory>,
    data_source: Arc<dyn DataSource>,
}

impl Environment {
    pub fn new(
        id: impl Into<String>,
        transaction_factory: Component<dyn TransactionFactory>,
        data_source: Arc<dyn DataSource>,
    ) -> Self {
        Self {
            id: id.into(),
            transaction_factory,
            data_source,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transaction_factory(&self) -> &Component<dyn TransactionFactory> {
        &self.transaction_factory
    }

    pub fn data_source(&self) -> &Arc<dyn DataSource> {
        &self.data_source
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("id", &self.id)
            .field("transaction_factory", &self.transaction_factory)
            .field("data_source", &self.data_source)
            .finish()
    }
}

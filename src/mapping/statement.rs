//! Mapped statement definitions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    /// Kind for a mapper element name.
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "select" => Some(Self::Select),
            "insert" => Some(Self::Insert),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// A statement registered under its namespace-qualified id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedStatement {
    pub id: String,
    pub kind: StatementKind,
    pub resource: String,
    pub database_id: Option<String>,
    pub sql: String,
    /// Qualified ids of the SQL fragments the statement includes.
    pub includes: Vec<String>,
}

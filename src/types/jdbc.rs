//! Column types.

use std::fmt;
use std::str::FromStr;

use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};

/// SQL column types, named as configuration documents spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JdbcType {
    Array,
    Bit,
    Tinyint,
    Smallint,
    Integer,
    Bigint,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    Longvarchar,
    Date,
    Time,
    Timestamp,
    Binary,
    Varbinary,
    Longvarbinary,
    Null,
    Other,
    Blob,
    Clob,
    Boolean,
    Cursor,
    Undefined,
    Nvarchar,
    Nchar,
    Nclob,
    Struct,
    JavaObject,
    Distinct,
    Ref,
    Datalink,
    Rowid,
    Longnvarchar,
    Sqlxml,
    Datetimeoffset,
    TimeWithTimezone,
    TimestampWithTimezone,
}

impl FromStr for JdbcType {
    type Err = ValueError;

    /// Exact, case-sensitive name (`VARCHAR`, `TIMESTAMP_WITH_TIMEZONE`).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let deserializer: StrDeserializer<'_, ValueError> = name.into_deserializer();
        JdbcType::deserialize(deserializer)
    }
}

impl fmt::Display for JdbcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unit variants serialize to their plain name.
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(name)) => f.write_str(&name),
            _ => write!(f, "{self:?}"),
        }
    }
}

//! Database connection document editing.
//!
//! The operator picks a database type, edits the generated JSON text, and
//! confirms. Confirmation only checks that the text is JSON; the shape of
//! the document is not validated.

use serde::{Deserialize, Serialize};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format. Please check your input.";
pub const UPDATED_MESSAGE: &str = "JSON data updated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    Postgresql,
    Mysql,
    Sqlite,
}

impl DatabaseKind {
    pub const ALL: [Self; 3] = [Self::Postgresql, Self::Mysql, Self::Sqlite];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Case-insensitive lookup by wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(rename = "type")]
    pub kind: DatabaseKind,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDocument {
    pub database: ConnectionSettings,
}

impl Default for ConnectionDocument {
    fn default() -> Self {
        Self {
            database: ConnectionSettings {
                kind: DatabaseKind::default(),
                host: "localhost".into(),
                port: 5432,
                database_name: "my_database".into(),
                username: "my_user".into(),
                password: "my_password".into(),
            },
        }
    }
}

impl ConnectionDocument {
    /// Default document with the selected database type.
    #[must_use]
    pub fn for_kind(kind: DatabaseKind) -> Self {
        let mut doc = Self::default();
        doc.database.kind = kind;
        doc
    }

    /// Editable text, indented with four spaces.
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseConfigError {
    #[error("Invalid JSON format. Please check your input.")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parse the operator's edited text.
///
/// # Errors
///
/// Returns [`DatabaseConfigError::InvalidJson`] when the text is not JSON.
pub fn parse_edited(text: &str) -> Result<serde_json::Value, DatabaseConfigError> {
    Ok(serde_json::from_str(text)?)
}

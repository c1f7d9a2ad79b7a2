//! Settings file: table config, column definitions and saved layout.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use datatable_lib::model::Record;
use datatable_lib::{Column, ColumnLayout, ColumnPreference, TableConfig};
use log::debug;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default = "default_true")]
    pub hideable: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: None,
            sortable: true,
            filterable: true,
            hideable: true,
            visible: true,
        }
    }

    pub fn to_column(&self) -> Column<Record> {
        let mut column = Column::new(self.key.clone()).hideable(self.hideable);
        if let Some(header) = &self.header {
            column = column.header(header.clone());
        }
        if self.sortable {
            column = column.sortable();
        }
        if self.filterable {
            column = column.filterable();
        }
        if !self.visible {
            column = column.hidden_by_default();
        }
        column
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub table: TableConfig,
    pub columns: Vec<ColumnSpec>,
    /// Saved column visibility and order.
    pub layout: Vec<ColumnPreference>,
}

impl Settings {
    /// Loads settings from a file that must exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Column definitions, inferred from the first record when none are configured.
    pub fn column_specs(&self, records: &[Record]) -> Vec<ColumnSpec> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        records
            .first()
            .map(|first| first.keys().map(ColumnSpec::new).collect())
            .unwrap_or_default()
    }

    pub fn columns(&self, records: &[Record]) -> Vec<Column<Record>> {
        self.column_specs(records).iter().map(ColumnSpec::to_column).collect()
    }

    /// Column layout with the saved preferences applied.
    pub fn layout(&self, columns: &[Column<Record>]) -> ColumnLayout {
        let mut layout = ColumnLayout::new(columns, None);
        if !self.layout.is_empty() {
            layout.apply(self.layout.clone());
        }
        layout
    }
}

//! TOML column catalogs
//!
//! ```toml
//! [[columns]]
//! name = "amount"
//! type = "NUMBER(10,2)"
//! nullable = false
//! ```

use crate::output::TypeSummary;
use anyhow::{Context, Result};
use oratype_core::TypeDecl;
use serde::Deserialize;
use std::path::Path;

fn default_nullable() -> bool {
    true
}

/// One declared column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub signature: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

/// A list of column declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_toml_str(&source)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            columns = catalog.columns.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Build every column's descriptor, failing on the first bad declaration
    pub fn describe(&self) -> Result<Vec<TypeSummary>> {
        self.columns
            .iter()
            .map(|column| {
                let ty = column
                    .signature
                    .parse::<TypeDecl>()
                    .and_then(|decl| decl.build(column.nullable))
                    .with_context(|| format!("column '{}'", column.name))?;
                Ok(TypeSummary::of(Some(column.name.clone()), &*ty))
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! File and sample-data loading.
//!
//! Uploads go through the same parsers whatever their origin: the schema
//! format is picked from the file name (`.json` → structured, anything else
//! textual) and entity files are always JSON.

use anyhow::{bail, Context, Result};
use cedar_core::{parse_entities, parse_schema, Entity, Schema, SchemaFormat};
use std::path::Path;
use tracing::info;
use viewer_projection::AppState;

/// File names of the sample dataset.
pub const SAMPLE_SCHEMA_FILE: &str = "schema.cedarschema";
pub const SAMPLE_SCHEMA_JSON_FILE: &str = "schema.json";
pub const SAMPLE_ENTITIES_FILE: &str = "entities.json";

/// Bundled sample schema.
pub const SAMPLE_SCHEMA: &str = include_str!("../samples/schema.cedarschema");

/// Bundled sample entities.
pub const SAMPLE_ENTITIES: &str = include_str!("../samples/entities.json");

/// Read a text file.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and parse a schema file; the format follows the file name.
pub fn read_schema(path: &Path) -> Result<Schema> {
    let source = read_source(path)?;
    let schema = parse_schema(SchemaFormat::from_path(path), &source)
        .with_context(|| format!("Error parsing schema {}", path.display()))?;
    Ok(schema)
}

/// Read and normalize an entities file.
pub fn read_entities(path: &Path) -> Result<Vec<Entity>> {
    let source = read_source(path)?;
    let entities =
        parse_entities(&source).with_context(|| format!("Error parsing entities {}", path.display()))?;
    Ok(entities)
}

/// Parsed sample dataset.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub schema: Schema,
    pub entities: Vec<Entity>,
}

impl SampleData {
    /// The sample dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let schema = parse_schema(SchemaFormat::from_file_name(SAMPLE_SCHEMA_FILE), SAMPLE_SCHEMA)
            .context("Error parsing bundled sample schema")?;
        let entities = parse_entities(SAMPLE_ENTITIES).context("Error parsing bundled sample entities")?;
        Ok(Self { schema, entities })
    }

    /// A sample dataset from a directory holding `entities.json` and either
    /// `schema.cedarschema` or `schema.json`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let schema_path = [SAMPLE_SCHEMA_FILE, SAMPLE_SCHEMA_JSON_FILE]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file());
        let Some(schema_path) = schema_path else {
            bail!(
                "No {} or {} in sample directory {}",
                SAMPLE_SCHEMA_FILE,
                SAMPLE_SCHEMA_JSON_FILE,
                dir.display()
            );
        };

        Ok(Self {
            schema: read_schema(&schema_path)?,
            entities: read_entities(&dir.join(SAMPLE_ENTITIES_FILE))?,
        })
    }

    /// Configured directory if any, otherwise the bundled samples.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let data = match dir {
            Some(dir) => Self::from_dir(dir)?,
            None => Self::bundled()?,
        };
        info!(
            source = %dir.map_or_else(|| "bundled".to_string(), |d| d.display().to_string()),
            entities = data.entities.len(),
            "Loaded sample data"
        );
        Ok(data)
    }

    /// Replace the state's schema and entities with this dataset.
    pub fn apply(self, state: &mut AppState) {
        state.replace_schema(self.schema);
        state.replace_entities(self.entities);
    }
}

//! Catalog and schema containers.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

use super::sequence::Sequence;
use super::table::Table;
use super::view::View;

/// The root of the schema model: a database catalog owning schemas,
/// one of which may be the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    name: String,
    schemas: Vec<Schema>,
    default_schema: Option<usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schemas: Vec::new(),
            default_schema: None,
        }
    }

    /// Returns the catalog name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a schema, rejecting duplicate names.
    pub fn add_schema(&mut self, schema: Schema) -> Result<(), SchemaError> {
        if self.schemas.iter().any(|s| s.name == schema.name) {
            return Err(SchemaError::DuplicateName {
                kind: "schema",
                name: schema.name,
            });
        }
        self.schemas.push(schema);
        Ok(())
    }

    /// Returns all schemas.
    #[must_use]
    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    /// Looks up a schema by name.
    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Looks up a schema by name for mutation during extraction.
    pub fn schema_mut(&mut self, name: &str) -> Option<&mut Schema> {
        self.schemas.iter_mut().find(|s| s.name == name)
    }

    /// Marks the named schema as the default.
    pub fn set_default_schema(&mut self, name: &str) -> Result<(), SchemaError> {
        match self.schemas.iter().position(|s| s.name == name) {
            Some(index) => {
                self.default_schema = Some(index);
                Ok(())
            }
            None => Err(SchemaError::UnknownSchema(name.to_string())),
        }
    }

    /// Returns the default schema, if one was marked.
    #[must_use]
    pub fn default_schema(&self) -> Option<&Schema> {
        self.default_schema.and_then(|i| self.schemas.get(i))
    }
}

/// A schema: a namespace owning tables, views and sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    name: String,
    tables: Vec<Table>,
    views: Vec<View>,
    sequences: Vec<Sequence>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            views: Vec::new(),
            sequences: Vec::new(),
        }
    }

    /// Returns the schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a table, rejecting duplicate names.
    pub fn add_table(&mut self, table: Table) -> Result<(), SchemaError> {
        if self.tables.iter().any(|t| t.name() == table.name()) {
            return Err(SchemaError::DuplicateName {
                kind: "table",
                name: table.name().to_string(),
            });
        }
        self.tables.push(table);
        Ok(())
    }

    /// Returns all tables.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Looks up a table by name for mutation during extraction.
    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name() == name)
    }

    /// Adds a view, rejecting duplicate names.
    pub fn add_view(&mut self, view: View) -> Result<(), SchemaError> {
        if self.views.iter().any(|v| v.name == view.name) {
            return Err(SchemaError::DuplicateName {
                kind: "view",
                name: view.name,
            });
        }
        self.views.push(view);
        Ok(())
    }

    /// Returns all views.
    #[must_use]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Looks up a view by name.
    #[must_use]
    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Looks up a view by name for mutation during extraction.
    pub fn view_mut(&mut self, name: &str) -> Option<&mut View> {
        self.views.iter_mut().find(|v| v.name == name)
    }

    /// Adds a sequence, rejecting duplicate names.
    pub fn add_sequence(&mut self, sequence: Sequence) -> Result<(), SchemaError> {
        if self.sequences.iter().any(|s| s.name == sequence.name) {
            return Err(SchemaError::DuplicateName {
                kind: "sequence",
                name: sequence.name,
            });
        }
        self.sequences.push(sequence);
        Ok(())
    }

    /// Returns all sequences.
    #[must_use]
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Looks up a sequence by name.
    #[must_use]
    pub fn sequence(&self, name: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_schema_name_rejected() {
        let mut catalog = Catalog::new("main");
        catalog.add_schema(Schema::new("app")).unwrap();
        let err = catalog.add_schema(Schema::new("app")).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateName { kind: "schema", .. }));
    }

    #[test]
    fn default_schema_must_exist() {
        let mut catalog = Catalog::new("main");
        catalog.add_schema(Schema::new("app")).unwrap();
        assert!(catalog.set_default_schema("missing").is_err());
        catalog.set_default_schema("app").unwrap();
        assert_eq!(catalog.default_schema().unwrap().name(), "app");
    }

    #[test]
    fn catalog_serializes() {
        let mut catalog = Catalog::new("main");
        let mut schema = Schema::new("app");
        schema.add_table(Table::new("orders")).unwrap();
        catalog.add_schema(schema).unwrap();

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains("orders"));
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }
}

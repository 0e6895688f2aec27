//! The storage collaborator: tables, fields and elements backed by one
//! flat JSON document per database.
//!
//! The [`Store`] trait is the narrow seam the query dispatcher calls
//! through, one method per (verb, level) pair of the query language.
//! [`JsonStore`] is the production implementation; tests substitute their
//! own recording stores.
//!
//! Storage is column-oriented: each field owns the list of its elements,
//! and row `i` is element `i` of every field in declaration order. The
//! fields of a table are therefore kept at equal length at all times.
//! Emptying resets elements to the type's empty value instead of removing
//! them, so sibling fields stay index-aligned.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::datatype::{FieldType, Value};
use crate::error::{BreezeError, Result};
use crate::persist;

// ------------- Document -------------

/// A whole database as it exists on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Document {
    pub tables: Vec<Table>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub elements: Vec<Value>,
}

impl Document {
    fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| BreezeError::Storage(format!("table '{}' does not exist", name)))
    }
    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| BreezeError::Storage(format!("table '{}' does not exist", name)))
    }
}

impl Table {
    fn field(&self, name: &str) -> Result<&Field> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| BreezeError::Storage(format!("field '{}' does not exist", name)))
    }
    fn field_mut(&mut self, name: &str) -> Result<&mut Field> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| BreezeError::Storage(format!("field '{}' does not exist", name)))
    }
    /// All fields hold one element per row, so the first field tells the
    /// number of rows.
    fn row_count(&self) -> usize {
        self.fields.first().map_or(0, |f| f.elements.len())
    }
    fn check_row(&self, index: usize) -> Result<()> {
        if index >= self.row_count() {
            return Err(BreezeError::Storage(format!(
                "row {} does not exist in table '{}'",
                index, self.name
            )));
        }
        Ok(())
    }
}

impl Field {
    /// Coerce a raw token to this field's type, reporting a storage error
    /// naming the field when the value does not fit.
    fn coerce(&self, raw: &str) -> Result<Value> {
        self.kind.coerce(raw).map_err(|_| {
            BreezeError::Storage(format!(
                "value '{}' does not fit field '{}' of type {}",
                raw, self.name, self.kind
            ))
        })
    }
}

// ------------- Store -------------

/// Storage primitives invoked by the query dispatcher.
///
/// `path` always names the database file. Errors raised here are storage
/// errors; they propagate through the dispatcher unchanged.
pub trait Store {
    fn create_db(&self, name: &str, path: &str) -> Result<()>;
    fn remove_db(&self, path: &str) -> Result<()>;
    fn get_table_list(&self, path: &str) -> Result<Vec<String>>;

    fn table_exists(&self, table: &str, path: &str) -> Result<bool>;
    fn create_table(&self, table: &str, path: &str) -> Result<()>;
    fn rename_table(&self, table: &str, path: &str, new_name: &str) -> Result<()>;
    fn remove_table(&self, table: &str, path: &str) -> Result<()>;
    fn get_field_list(&self, table: &str, path: &str) -> Result<Vec<String>>;

    fn field_exists(&self, field: &str, table: &str, path: &str) -> Result<bool>;
    fn get_field_type(&self, field: &str, table: &str, path: &str) -> Result<FieldType>;
    fn create_field(&self, field: &str, kind: FieldType, table: &str, path: &str) -> Result<()>;
    fn rename_field(&self, field: &str, table: &str, path: &str, new_name: &str) -> Result<()>;
    fn remove_field(&self, field: &str, table: &str, path: &str) -> Result<()>;
    fn empty_field(&self, field: &str, table: &str, path: &str) -> Result<()>;
    fn get_element_list(&self, field: &str, table: &str, path: &str) -> Result<Vec<Value>>;
    fn swap_fields(&self, first: usize, second: usize, table: &str, path: &str) -> Result<()>;

    fn row_exists(&self, index: usize, table: &str, path: &str) -> Result<bool>;
    fn insert_row(&self, values: &[String], table: &str, path: &str) -> Result<()>;
    fn get_row(&self, index: usize, table: &str, path: &str) -> Result<Vec<Value>>;
    fn remove_row(&self, index: usize, table: &str, path: &str) -> Result<()>;

    fn get_element(&self, index: usize, field: &str, table: &str, path: &str) -> Result<Value>;
    fn modify_element(
        &self,
        index: usize,
        field: &str,
        table: &str,
        path: &str,
        new_value: &str,
    ) -> Result<()>;
    fn empty_element(&self, index: usize, field: &str, table: &str, path: &str) -> Result<()>;
    fn search_data(
        &self,
        text: &str,
        table: &str,
        path: &str,
        field: Option<&str>,
    ) -> Result<Vec<i64>>;
}

// ------------- JsonStore -------------

/// Flat-file implementation of [`Store`]. Stateless: every operation reads
/// the document, applies the change and writes it back.
#[derive(Debug, Default)]
pub struct JsonStore;

impl JsonStore {
    pub fn new() -> Self {
        Self
    }

    fn with_doc<T>(&self, path: &str, op: impl FnOnce(&Document) -> Result<T>) -> Result<T> {
        let document = persist::read(Path::new(path))?;
        op(&document)
    }

    fn update_doc(&self, path: &str, op: impl FnOnce(&mut Document) -> Result<()>) -> Result<()> {
        let db_path = Path::new(path);
        let mut document = persist::read(db_path)?;
        op(&mut document)?;
        persist::write(db_path, &document)
    }
}

impl Store for JsonStore {
    fn create_db(&self, name: &str, path: &str) -> Result<()> {
        let parent = Path::new(path);
        if !parent.is_dir() {
            return Err(BreezeError::Storage(format!(
                "'{}' is not a directory",
                path
            )));
        }
        let db_path: PathBuf = parent.join(name);
        if db_path.exists() {
            return Err(BreezeError::Storage(format!(
                "database '{}' already exists",
                db_path.display()
            )));
        }
        debug!(db = %db_path.display(), "creating database");
        persist::write(&db_path, &Document::default())
    }

    fn remove_db(&self, path: &str) -> Result<()> {
        // refuse to delete a file that does not parse as a database
        persist::read(Path::new(path))?;
        debug!(db = %path, "removing database");
        std::fs::remove_file(path)?;
        Ok(())
    }

    fn get_table_list(&self, path: &str) -> Result<Vec<String>> {
        self.with_doc(path, |doc| {
            Ok(doc.tables.iter().map(|t| t.name.clone()).collect())
        })
    }

    fn table_exists(&self, table: &str, path: &str) -> Result<bool> {
        self.with_doc(path, |doc| Ok(doc.tables.iter().any(|t| t.name == table)))
    }

    fn create_table(&self, table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            if doc.tables.iter().any(|t| t.name == table) {
                return Err(BreezeError::Storage(format!(
                    "table '{}' already exists",
                    table
                )));
            }
            doc.tables.push(Table {
                name: table.to_owned(),
                fields: Vec::new(),
            });
            Ok(())
        })
    }

    fn rename_table(&self, table: &str, path: &str, new_name: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            if doc.tables.iter().any(|t| t.name == new_name) {
                return Err(BreezeError::Storage(format!(
                    "table '{}' already exists",
                    new_name
                )));
            }
            doc.table_mut(table)?.name = new_name.to_owned();
            Ok(())
        })
    }

    fn remove_table(&self, table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            doc.table(table)?;
            doc.tables.retain(|t| t.name != table);
            Ok(())
        })
    }

    fn get_field_list(&self, table: &str, path: &str) -> Result<Vec<String>> {
        self.with_doc(path, |doc| {
            Ok(doc
                .table(table)?
                .fields
                .iter()
                .map(|f| f.name.clone())
                .collect())
        })
    }

    fn field_exists(&self, field: &str, table: &str, path: &str) -> Result<bool> {
        self.with_doc(path, |doc| {
            Ok(doc.table(table)?.fields.iter().any(|f| f.name == field))
        })
    }

    fn get_field_type(&self, field: &str, table: &str, path: &str) -> Result<FieldType> {
        self.with_doc(path, |doc| Ok(doc.table(table)?.field(field)?.kind))
    }

    fn create_field(&self, field: &str, kind: FieldType, table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            let table = doc.table_mut(table)?;
            if table.fields.iter().any(|f| f.name == field) {
                return Err(BreezeError::Storage(format!(
                    "field '{}' already exists",
                    field
                )));
            }
            // pad to the current row count so rows stay aligned
            let elements = vec![kind.empty_value(); table.row_count()];
            table.fields.push(Field {
                name: field.to_owned(),
                kind,
                elements,
            });
            Ok(())
        })
    }

    fn rename_field(&self, field: &str, table: &str, path: &str, new_name: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            let table = doc.table_mut(table)?;
            if table.fields.iter().any(|f| f.name == new_name) {
                return Err(BreezeError::Storage(format!(
                    "field '{}' already exists",
                    new_name
                )));
            }
            table.field_mut(field)?.name = new_name.to_owned();
            Ok(())
        })
    }

    fn remove_field(&self, field: &str, table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            let table = doc.table_mut(table)?;
            table.field(field)?;
            table.fields.retain(|f| f.name != field);
            Ok(())
        })
    }

    fn empty_field(&self, field: &str, table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            let field = doc.table_mut(table)?.field_mut(field)?;
            let empty = field.kind.empty_value();
            for element in field.elements.iter_mut() {
                *element = empty.clone();
            }
            Ok(())
        })
    }

    fn get_element_list(&self, field: &str, table: &str, path: &str) -> Result<Vec<Value>> {
        self.with_doc(path, |doc| {
            Ok(doc.table(table)?.field(field)?.elements.clone())
        })
    }

    fn swap_fields(&self, first: usize, second: usize, table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            let table = doc.table_mut(table)?;
            let count = table.fields.len();
            if first >= count || second >= count {
                return Err(BreezeError::Storage(format!(
                    "field position out of range, table '{}' has {} fields",
                    table.name, count
                )));
            }
            table.fields.swap(first, second);
            Ok(())
        })
    }

    fn row_exists(&self, index: usize, table: &str, path: &str) -> Result<bool> {
        self.with_doc(path, |doc| Ok(index < doc.table(table)?.row_count()))
    }

    fn insert_row(&self, values: &[String], table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            let table = doc.table_mut(table)?;
            if values.len() != table.fields.len() {
                return Err(BreezeError::Storage(format!(
                    "table '{}' has {} fields, got {} values",
                    table.name,
                    table.fields.len(),
                    values.len()
                )));
            }
            // coerce everything up front, a row is inserted whole or not at all
            let mut coerced = Vec::with_capacity(values.len());
            for (field, raw) in table.fields.iter().zip(values) {
                coerced.push(field.coerce(raw)?);
            }
            for (field, value) in table.fields.iter_mut().zip(coerced) {
                field.elements.push(value);
            }
            Ok(())
        })
    }

    fn get_row(&self, index: usize, table: &str, path: &str) -> Result<Vec<Value>> {
        self.with_doc(path, |doc| {
            let table = doc.table(table)?;
            table.check_row(index)?;
            Ok(table
                .fields
                .iter()
                .map(|f| f.elements[index].clone())
                .collect())
        })
    }

    fn remove_row(&self, index: usize, table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            let table = doc.table_mut(table)?;
            table.check_row(index)?;
            for field in table.fields.iter_mut() {
                field.elements.remove(index);
            }
            Ok(())
        })
    }

    fn get_element(&self, index: usize, field: &str, table: &str, path: &str) -> Result<Value> {
        self.with_doc(path, |doc| {
            let table = doc.table(table)?;
            table.check_row(index)?;
            Ok(table.field(field)?.elements[index].clone())
        })
    }

    fn modify_element(
        &self,
        index: usize,
        field: &str,
        table: &str,
        path: &str,
        new_value: &str,
    ) -> Result<()> {
        self.update_doc(path, |doc| {
            let table = doc.table_mut(table)?;
            table.check_row(index)?;
            let field = table.field_mut(field)?;
            field.elements[index] = field.coerce(new_value)?;
            Ok(())
        })
    }

    fn empty_element(&self, index: usize, field: &str, table: &str, path: &str) -> Result<()> {
        self.update_doc(path, |doc| {
            let table = doc.table_mut(table)?;
            table.check_row(index)?;
            let field = table.field_mut(field)?;
            field.elements[index] = field.kind.empty_value();
            Ok(())
        })
    }

    fn search_data(
        &self,
        text: &str,
        table: &str,
        path: &str,
        field: Option<&str>,
    ) -> Result<Vec<i64>> {
        self.with_doc(path, |doc| {
            let table = doc.table(table)?;
            let needle = text.to_lowercase();
            let mut indexes = Vec::new();
            for candidate in table.fields.iter() {
                if let Some(wanted) = field {
                    if candidate.name != wanted {
                        continue;
                    }
                }
                for (index, element) in candidate.elements.iter().enumerate() {
                    if element.to_string().to_lowercase().contains(&needle) {
                        indexes.push(index as i64);
                    }
                }
            }
            if let Some(wanted) = field {
                // surface a miss on the field name instead of an empty result
                table.field(wanted)?;
            }
            indexes.sort_unstable();
            indexes.dedup();
            Ok(indexes)
        })
    }
}

use std::fs;
use std::path::PathBuf;

use crate::error::AppError;

use super::schema::{
    Category, CategoryUpdate, Parameter, ParameterUpdate, StoreDocument,
};

/// Flat-file repository over the single JSON document holding both
/// collections. Every operation is a full read/modify/write cycle; there is
/// no locking, so concurrent writers are last-write-wins.
pub struct JsonStore {
    path: PathBuf,
}

/// A category removed from the store together with the parameters that were
/// deleted along with it.
#[derive(Debug)]
pub struct RemovedCategory {
    pub category: Category,
    pub parameters: Vec<Parameter>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<StoreDocument, AppError> {
        if !self.path.exists() {
            // First access initializes an empty document, matching the
            // store's behavior on a fresh deployment.
            let document = StoreDocument::default();
            self.write(&document)?;
            return Ok(document);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write(&self, document: &StoreDocument) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(document)?)?;
        Ok(())
    }

    /// One consistent view of both collections, for callers that resolve
    /// several lookups against the same state.
    pub fn snapshot(&self) -> Result<StoreDocument, AppError> {
        self.read()
    }

    /// Overwrite the whole document. Used by the seed path and tests.
    pub fn replace(&self, document: &StoreDocument) -> Result<(), AppError> {
        self.write(document)
    }

    // -- Categories --

    pub fn categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.read()?.categories)
    }

    pub fn category_by_id(&self, id: &str) -> Result<Option<Category>, AppError> {
        Ok(self.read()?.categories.into_iter().find(|c| c.id == id))
    }

    pub fn create_category(&self, category: Category) -> Result<Category, AppError> {
        let mut document = self.read()?;
        document.categories.push(category.clone());
        self.write(&document)?;
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: &str,
        update: CategoryUpdate,
    ) -> Result<Option<Category>, AppError> {
        let mut document = self.read()?;
        let Some(category) = document.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(visibility) = update.visibility {
            category.visibility = visibility;
        }
        let updated = category.clone();
        self.write(&document)?;
        Ok(Some(updated))
    }

    /// Deleting a category cascades to its parameters: both are removed in
    /// the same write.
    pub fn delete_category(&self, id: &str) -> Result<Option<RemovedCategory>, AppError> {
        let mut document = self.read()?;
        let Some(index) = document.categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let category = document.categories.remove(index);
        let (removed, kept): (Vec<_>, Vec<_>) = document
            .parameters
            .into_iter()
            .partition(|p| p.category_id == id);
        document.parameters = kept;
        self.write(&document)?;
        Ok(Some(RemovedCategory {
            category,
            parameters: removed,
        }))
    }

    // -- Parameters --

    pub fn parameters(&self) -> Result<Vec<Parameter>, AppError> {
        Ok(self.read()?.parameters)
    }

    pub fn parameters_by_category(&self, category_id: &str) -> Result<Vec<Parameter>, AppError> {
        Ok(self
            .read()?
            .parameters
            .into_iter()
            .filter(|p| p.category_id == category_id)
            .collect())
    }

    pub fn parameter_by_id(&self, id: &str) -> Result<Option<Parameter>, AppError> {
        Ok(self.read()?.parameters.into_iter().find(|p| p.id == id))
    }

    pub fn create_parameter(&self, parameter: Parameter) -> Result<Parameter, AppError> {
        let mut document = self.read()?;
        document.parameters.push(parameter.clone());
        self.write(&document)?;
        Ok(parameter)
    }

    pub fn update_parameter(
        &self,
        id: &str,
        update: ParameterUpdate,
    ) -> Result<Option<Parameter>, AppError> {
        let mut document = self.read()?;
        let Some(parameter) = document.parameters.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            parameter.name = name;
        }
        if let Some(visibility) = update.visibility {
            parameter.visibility = visibility;
        }
        if let Some(category_id) = update.category_id {
            parameter.category_id = category_id;
        }
        if let Some(spec) = update.spec {
            parameter.spec = spec;
        }
        let updated = parameter.clone();
        self.write(&document)?;
        Ok(Some(updated))
    }

    pub fn delete_parameter(&self, id: &str) -> Result<Option<Parameter>, AppError> {
        let mut document = self.read()?;
        let Some(index) = document.parameters.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let parameter = document.parameters.remove(index);
        self.write(&document)?;
        Ok(Some(parameter))
    }
}

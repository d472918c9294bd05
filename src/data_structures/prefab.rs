//! Prefab templates, their category catalog and the key lookup used by
//! placement and scene loading.

use std::collections::HashMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Plants,
    Decorations,
    Structures,
    Pathways,
    Furniture,
    GroundCover,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Plants,
        Category::Decorations,
        Category::Structures,
        Category::Pathways,
        Category::Furniture,
        Category::GroundCover,
    ];
}

/// An instantiable model. The rendering layer owns the actual mesh; this crate
/// only needs a stable key to name it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrefabTemplate {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub category: Category,
}

impl PrefabTemplate {
    pub fn new(key: impl Into<String>, category: Category) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            category,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Templates grouped by the category buttons of the model picker.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    groups: HashMap<Category, Vec<PrefabTemplate>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_templates(templates: impl IntoIterator<Item = PrefabTemplate>) -> Self {
        let mut catalog = Self::new();
        for template in templates {
            catalog.add(template);
        }
        catalog
    }

    pub fn add(&mut self, template: PrefabTemplate) {
        self.groups.entry(template.category).or_default().push(template);
    }

    /// Models of one category in the order they were added.
    pub fn models(&self, category: Category) -> &[PrefabTemplate] {
        let models = self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[]);
        if models.is_empty() {
            warn!("No models found for category {:?}", category);
        }
        models
    }

    /// Every template, category by category in [`Category::ALL`] order.
    pub fn all_models(&self) -> impl Iterator<Item = &PrefabTemplate> {
        Category::ALL
            .iter()
            .filter_map(|category| self.groups.get(category))
            .flatten()
    }
}

/// Maps a prefab key to its template.
///
/// The first template registered under a key wins. Later duplicates are
/// reported and discarded so the result never depends on which one happened
/// to be iterated last.
#[derive(Clone, Debug, Default)]
pub struct PrefabRegistry {
    templates: HashMap<String, PrefabTemplate>,
    duplicates: Vec<String>,
}

impl PrefabRegistry {
    pub fn build<'a>(templates: impl IntoIterator<Item = &'a PrefabTemplate>) -> Self {
        let mut registry = Self::default();
        for template in templates {
            if let Err(e) = registry.register(template.clone()) {
                warn!("{}", e);
            }
        }
        info!("Prefab registry built with {} entries", registry.len());
        registry
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::build(catalog.all_models())
    }

    pub fn register(&mut self, template: PrefabTemplate) -> Result<()> {
        if self.templates.contains_key(&template.key) {
            self.duplicates.push(template.key.clone());
            return Err(SceneError::DuplicatePrefabKey(template.key));
        }
        self.templates.insert(template.key.clone(), template);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&PrefabTemplate> {
        self.templates
            .get(key)
            .ok_or_else(|| SceneError::PrefabNotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Keys that were rejected because an earlier template already used them.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

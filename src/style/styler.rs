//! Style registry and loader.

use std::collections::HashMap;
use std::path::Path;

use crate::style::image::ImageCatalog;
use crate::style::parser::{self, LoadError};
use crate::style::skin::Skin;
use crate::style::state::WidgetState;
use crate::style::styledef::StyleDef;

/// Style definitions by widget-type name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleTable {
    styles: HashMap<String, StyleDef>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The definition called `name`, created empty on first mention.
    pub fn styledef(&mut self, name: &str) -> &mut StyleDef {
        self.styles
            .entry(name.to_owned())
            .or_insert_with(|| StyleDef::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&StyleDef> {
        self.styles.get(name)
    }

    /// Copy `source`'s base skin into `target`.
    ///
    /// Returns `false`, leaving everything untouched, when `source` is not defined.
    pub fn copy_skin(&mut self, target: &str, source: &str) -> bool {
        let Some(source) = self.styles.get(source).cloned() else {
            return false;
        };
        self.styledef(target).copy_skin(&source);
        true
    }

    /// A copy with every definition cleared but still present.
    ///
    /// Reloading parses into such a copy so update counters carry over.
    pub fn cleared(&self) -> StyleTable {
        let mut table = self.clone();
        for style in table.styles.values_mut() {
            style.clear();
        }
        table
    }

    /// Bump the counter of every definition that differs from `previous`
    /// without having been reparsed, so cached resolutions notice the change.
    pub fn touch_changed(&mut self, previous: &StyleTable) {
        for (name, style) in self.styles.iter_mut() {
            let Some(old) = previous.get(name) else {
                continue;
            };
            if style.updated() == old.updated() && style != old {
                style.touch();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleDef)> {
        self.styles.iter().map(|(name, style)| (name.as_str(), style))
    }
}

/// Owns the style table and the image catalog it resolves against.
///
/// Lookups of unknown styles fall back to an empty definition, so widgets
/// without a style simply draw nothing.
#[derive(Debug)]
pub struct Styler {
    table: StyleTable,
    images: ImageCatalog,
    fallback: StyleDef,
}

impl Default for Styler {
    fn default() -> Self {
        Self::new(ImageCatalog::default())
    }
}

impl Styler {
    pub fn new(images: ImageCatalog) -> Self {
        Self {
            table: StyleTable::new(),
            images,
            fallback: StyleDef::new(""),
        }
    }

    /// Parse `source` and replace the current definitions with it.
    ///
    /// Returns the number of defined styles. On error the previous
    /// definitions stay in place.
    pub fn load_str(&mut self, source: &str) -> Result<usize, LoadError> {
        let mut staged = self.table.cleared();
        if let Err(err) = parser::compile(source, &mut staged, &mut self.images) {
            tracing::error!(error = %err, "malformed style sheet");
            return Err(err.into());
        }
        staged.touch_changed(&self.table);
        self.table = staged;
        tracing::debug!(styles = self.table.len(), "style sheet loaded");
        Ok(self.table.len())
    }

    /// Read and load a style document from disk.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "could not open style sheet");
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.load_str(&source)
    }

    /// Forget every definition.
    pub fn reset(&mut self) {
        self.table = StyleTable::new();
    }

    /// Clear every definition's attributes, keeping names and update counters.
    pub fn clear(&mut self) {
        self.table = self.table.cleared();
    }

    /// The definition called `name`, created empty on first mention.
    pub fn styledef(&mut self, name: &str) -> &mut StyleDef {
        self.table.styledef(name)
    }

    pub fn table(&self) -> &StyleTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut StyleTable {
        &mut self.table
    }

    pub fn images(&self) -> &ImageCatalog {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageCatalog {
        &mut self.images
    }

    pub fn get(&self, name: &str) -> Option<&StyleDef> {
        self.table.get(name)
    }

    /// The definition for `name`, or an empty one.
    pub fn style(&self, name: &str) -> &StyleDef {
        self.table.get(name).unwrap_or(&self.fallback)
    }

    /// The skin `name` draws in `state`.
    pub fn resolve(&self, name: &str, state: WidgetState) -> &Skin {
        self.style(name).resolve(state)
    }
}

//! Image identifiers and the default asset resolver.
//!
//! The style engine never decodes images. It interns identifiers into
//! [`ImageHandle`]s through an [`ImageResolver`]; the rendering backend maps
//! handles to GPU textures or whatever else it needs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to an image known to a resolver. Copy, lightweight (u64).
    pub struct ImageHandle;
}

/// An image identifier together with its resolved handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    /// The identifier as written in the style document, e.g. `"button"`.
    pub name: String,
    pub handle: ImageHandle,
}

/// Asset collaborator: turns image identifiers into handles.
pub trait ImageResolver {
    /// Resolve (and register if needed) the image called `name`.
    fn find_image(&mut self, name: &str) -> ImageRef;
}

/// A registered image: its identifier and where the backend should load it from.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Default [`ImageResolver`]: interns identifiers and maps them below a resource path.
///
/// Identifiers without an extension are assumed to be `.png` files.
#[derive(Debug, Default)]
pub struct ImageCatalog {
    resource_path: PathBuf,
    images: SlotMap<ImageHandle, ImageEntry>,
    by_name: HashMap<String, ImageHandle>,
}

impl ImageCatalog {
    /// Create an empty catalog resolving paths relative to `resource_path`.
    pub fn new(resource_path: impl Into<PathBuf>) -> Self {
        Self {
            resource_path: resource_path.into(),
            images: SlotMap::with_key(),
            by_name: HashMap::new(),
        }
    }

    /// The directory image paths are resolved against.
    pub fn resource_path(&self) -> &Path {
        &self.resource_path
    }

    /// Look up a registered image without registering it.
    pub fn get(&self, name: &str) -> Option<ImageRef> {
        self.by_name.get(name).map(|&handle| ImageRef {
            name: name.to_owned(),
            handle,
        })
    }

    /// The entry behind a handle.
    pub fn entry(&self, handle: ImageHandle) -> Option<&ImageEntry> {
        self.images.get(handle)
    }

    /// Number of registered images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no image has been registered.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn path_for(&self, name: &str) -> PathBuf {
        let mut path = self.resource_path.join(name);
        if path.extension().is_none() {
            path.set_extension("png");
        }
        path
    }
}

impl ImageResolver for ImageCatalog {
    fn find_image(&mut self, name: &str) -> ImageRef {
        if let Some(image) = self.get(name) {
            return image;
        }
        let path = self.path_for(name);
        let handle = self.images.insert(ImageEntry {
            name: name.to_owned(),
            path,
        });
        self.by_name.insert(name.to_owned(), handle);
        tracing::trace!(image = name, "registered image");
        ImageRef {
            name: name.to_owned(),
            handle,
        }
    }
}

//! Resource lookup for fonts, images and sounds
//!
//! A theme names assets either directly (`"DejaVuSans.ttf"`) or through an
//! alias declared in `#resources`. Lookup tries each search directory in
//! order. A missing asset is not an error: the caller gets `None` and draws
//! or plays nothing.

use crate::theme::ThemeMap;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct ResourceLocator {
    aliases: IndexMap<String, String>,
    search: Vec<PathBuf>,
}

impl ResourceLocator {
    pub fn new(search: Vec<PathBuf>) -> Self {
        Self {
            aliases: IndexMap::new(),
            search,
        }
    }

    /// Take aliases from a composed `#resources` section; non-string entries are skipped
    pub fn with_aliases(mut self, resources: &ThemeMap) -> Self {
        for (name, value) in resources {
            match value.as_str() {
                Some(file) => {
                    self.aliases.insert(name.clone(), file.to_string());
                }
                None => tracing::warn!(alias = %name, "#resources entry is not a file name"),
            }
        }
        self
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search
    }

    /// Logical name -> file name, following one level of alias
    pub fn file_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Existing file for `name`, or `None` (with a warning) if nothing matches
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let file = self.file_name(name);
        let path = Path::new(file);
        if path.is_absolute() {
            if path.is_file() {
                return Some(path.to_path_buf());
            }
        } else if let Some(found) = self
            .search
            .iter()
            .map(|dir| dir.join(file))
            .find(|candidate| candidate.is_file())
        {
            return Some(found);
        }

        tracing::warn!(resource = name, file, "resource not found");
        None
    }
}

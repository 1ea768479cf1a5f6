//! Descriptor catalog: one-time load, name uniqueness, lookups.
//!
//! The catalog is built once at startup from a descriptor source and then
//! shared (typically behind an `Arc`) across every session that needs the
//! same rule set. Loading is the only time descriptor text is read or
//! parsed.

use crate::error::{DescriptorError, Result};
use crate::parser;
use crate::types::{Diagnostic, FilterDescriptor};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// An ordered, name-unique collection of filter descriptors.
#[derive(Debug, Default)]
pub struct DescriptorCatalog {
    descriptors: Vec<FilterDescriptor>,
    diagnostics: Vec<Diagnostic>,
    by_name: HashMap<String, usize>,
}

impl DescriptorCatalog {
    /// Load and parse a descriptor file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_source(&path.display().to_string(), &text)
    }

    /// Build a catalog from descriptor text.
    ///
    /// Malformed records were already reduced to diagnostics by the
    /// parser; they are retained here for reporting. A duplicate name is
    /// fatal: it means the source itself is inconsistent and every
    /// name-keyed operation downstream would become ambiguous.
    pub fn from_source(file: &str, text: &str) -> Result<Self> {
        let loaded = parser::parse_source(file, text);

        let mut by_name = HashMap::new();
        for (idx, descriptor) in loaded.descriptors.iter().enumerate() {
            if by_name.insert(descriptor.name.clone(), idx).is_some() {
                return Err(DescriptorError::DuplicateName {
                    name: descriptor.name.clone(),
                    file: file.to_string(),
                });
            }
        }

        info!(
            "Loaded {} filter descriptors from {} ({} skipped)",
            loaded.descriptors.len(),
            file,
            loaded.diagnostics.len()
        );

        Ok(Self {
            descriptors: loaded.descriptors,
            diagnostics: loaded.diagnostics,
            by_name,
        })
    }

    /// All descriptors, in source order.
    pub fn descriptors(&self) -> &[FilterDescriptor] {
        &self.descriptors
    }

    /// Parse-time diagnostics for records that were skipped.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&FilterDescriptor> {
        self.by_name.get(name).map(|&idx| &self.descriptors[idx])
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

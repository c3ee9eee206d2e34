use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// What a complete binding file is expected to declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedCatalog {
    pub catalog_version: String,
    /// C++ namespace the bound types live in, e.g. `databento`.
    pub namespace: String,
    pub enums: Vec<EnumSpec>,
    pub supporting_types: Vec<TypeSpec>,
    pub message_types: Vec<TypeSpec>,
    pub bits_types: Vec<String>,
    pub headers: Vec<String>,
    pub expected_sizes: CatalogSizes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSpec {
    pub name: String,
    pub const_prefix: String,
    pub min_constants: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSizes {
    pub supporting_types: usize,
    pub message_types: usize,
    pub bits_types: usize,
    pub headers: usize,
}

impl ExpectedCatalog {
    /// The catalog shipped with the validator.
    pub fn phase2() -> CoreResult<Self> {
        Self::from_json_str(include_str!("catalog_phase2.json"))
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> CoreResult<Self> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Sizes actually present, to compare against `expected_sizes`.
    pub fn sizes(&self) -> CatalogSizes {
        CatalogSizes {
            supporting_types: self.supporting_types.len(),
            message_types: self.message_types.len(),
            bits_types: self.bits_types.len(),
            headers: self.headers.len(),
        }
    }

    pub fn sizes_match(&self) -> bool {
        self.sizes() == self.expected_sizes
    }

    fn validate(&self) -> CoreResult<()> {
        if self.namespace.trim().is_empty() {
            return Err(CoreError::InvalidCatalog("namespace is empty".to_string()));
        }
        for e in &self.enums {
            if e.name.trim().is_empty() || e.const_prefix.trim().is_empty() {
                return Err(CoreError::InvalidCatalog(format!(
                    "enum entry needs a name and a constant prefix: {:?}",
                    e
                )));
            }
        }
        check_type_specs("supporting_types", &self.supporting_types)?;
        check_type_specs("message_types", &self.message_types)?;
        check_names("bits_types", &self.bits_types)?;
        check_names("headers", &self.headers)?;
        Ok(())
    }
}

fn check_type_specs(section: &str, specs: &[TypeSpec]) -> CoreResult<()> {
    let mut seen = BTreeSet::new();
    for t in specs {
        if t.name.trim().is_empty() {
            return Err(CoreError::InvalidCatalog(format!(
                "{}: type with empty name",
                section
            )));
        }
        if !seen.insert(t.name.as_str()) {
            return Err(CoreError::InvalidCatalog(format!(
                "{}: duplicate type {}",
                section, t.name
            )));
        }
        if t.methods.is_empty() {
            return Err(CoreError::InvalidCatalog(format!(
                "{}: {} lists no methods",
                section, t.name
            )));
        }
        check_names(&format!("{}.{}", section, t.name), &t.methods)?;
    }
    Ok(())
}

fn check_names(section: &str, names: &[String]) -> CoreResult<()> {
    let mut seen = BTreeSet::new();
    for n in names {
        if n.trim().is_empty() {
            return Err(CoreError::InvalidCatalog(format!("{}: empty entry", section)));
        }
        if !seen.insert(n.as_str()) {
            return Err(CoreError::InvalidCatalog(format!(
                "{}: duplicate entry {}",
                section, n
            )));
        }
    }
    Ok(())
}

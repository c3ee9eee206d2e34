pub mod checklist;
pub mod render;

use crate::catalog::{CatalogSizes, EnumSpec, ExpectedCatalog, TypeSpec};
use crate::error::CoreResult;
use crate::scan::{self, Balance, RegistrationCounts};
use crate::source::SourceText;
use checklist::{check, Checklist};
use std::path::PathBuf;
use tracing::{debug, info};

pub const CHECK_SUPPORTING_TYPES: &str = "Supporting types";
pub const CHECK_MESSAGE_TYPES: &str = "Message types";
pub const CHECK_CATALOG_SIZES: &str = "Catalog sizes";
pub const CHECK_SPECIALIZATIONS: &str = "IsBits specializations";
pub const CHECK_HEADERS: &str = "All headers";
pub const CHECK_SYNTAX: &str = "Syntax valid";

/// How many of a type's listed methods must be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodRule {
    /// Supporting value types: every method.
    AllRequired,
    /// Message types: one key accessor may be absent or renamed.
    AllowOneMissing,
}

impl MethodRule {
    pub fn accepts(self, found: usize, required: usize) -> bool {
        match self {
            MethodRule::AllRequired => found == required,
            MethodRule::AllowOneMissing => found >= required.saturating_sub(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStatistics {
    pub bytes: usize,
    pub lines: usize,
    pub registrations: RegistrationCounts,
    pub balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumResult {
    pub name: String,
    pub const_prefix: String,
    pub min_constants: usize,
    pub constants: Vec<String>,
}

impl EnumResult {
    pub fn passed(&self) -> bool {
        self.constants.len() >= self.min_constants
    }

    pub fn check_name(&self) -> String {
        format!("{} enum", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeResult {
    pub name: String,
    pub rule: MethodRule,
    pub registered: bool,
    pub found_methods: Vec<String>,
    pub missing_methods: Vec<String>,
}

impl TypeResult {
    pub fn required(&self) -> usize {
        self.found_methods.len() + self.missing_methods.len()
    }

    pub fn passed(&self) -> bool {
        self.registered && self.rule.accepts(self.found_methods.len(), self.required())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializationResult {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

impl SpecializationResult {
    pub fn expected(&self) -> usize {
        self.found.len() + self.missing.len()
    }

    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderResult {
    pub header: String,
    pub present: bool,
}

/// Everything one validation run found, section by section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub source_path: PathBuf,
    pub catalog_version: String,
    pub statistics: CoreStatistics,
    pub enums: Vec<EnumResult>,
    pub supporting_types: Vec<TypeResult>,
    pub message_types: Vec<TypeResult>,
    pub specializations: SpecializationResult,
    pub headers: Vec<HeaderResult>,
    pub catalog_sizes: CatalogSizes,
    pub expected_sizes: CatalogSizes,
    pub checklist: Checklist,
}

impl ValidationReport {
    pub fn all_headers_present(&self) -> bool {
        self.headers.iter().all(|h| h.present)
    }

    pub fn exit_code(&self) -> i32 {
        self.checklist.exit_code()
    }
}

pub struct BindingValidator {
    catalog: ExpectedCatalog,
}

impl BindingValidator {
    pub fn new_phase2() -> CoreResult<Self> {
        Ok(Self::with_catalog(ExpectedCatalog::phase2()?))
    }

    pub fn with_catalog(catalog: ExpectedCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ExpectedCatalog {
        &self.catalog
    }

    pub fn validate(&self, source: &SourceText) -> CoreResult<ValidationReport> {
        let text = source.text();
        let ns = self.catalog.namespace.as_str();

        let statistics = CoreStatistics {
            bytes: source.byte_len(),
            lines: source.line_count(),
            registrations: scan::count_registrations(text)?,
            balance: Balance::of(text),
        };
        debug!(?statistics, "collected core statistics");

        let enums = self
            .catalog
            .enums
            .iter()
            .map(|e| check_enum(text, e))
            .collect::<CoreResult<Vec<_>>>()?;

        let supporting_types = self
            .catalog
            .supporting_types
            .iter()
            .map(|t| check_type(text, ns, t, MethodRule::AllRequired))
            .collect::<CoreResult<Vec<_>>>()?;

        let message_types = self
            .catalog
            .message_types
            .iter()
            .map(|t| check_type(text, ns, t, MethodRule::AllowOneMissing))
            .collect::<CoreResult<Vec<_>>>()?;

        let specializations = check_specializations(text, ns, &self.catalog.bits_types)?;
        let headers = check_headers(text, &self.catalog.headers)?;

        let catalog_sizes = self.catalog.sizes();
        let expected_sizes = self.catalog.expected_sizes;

        let checklist = build_checklist(
            &enums,
            &supporting_types,
            &message_types,
            &specializations,
            &headers,
            catalog_sizes,
            expected_sizes,
            statistics.balance,
        );
        info!(
            passed = checklist.passed(),
            total = checklist.total(),
            "validation finished"
        );

        Ok(ValidationReport {
            source_path: source.path().to_path_buf(),
            catalog_version: self.catalog.catalog_version.clone(),
            statistics,
            enums,
            supporting_types,
            message_types,
            specializations,
            headers,
            catalog_sizes,
            expected_sizes,
            checklist,
        })
    }
}

fn check_enum(text: &str, spec: &EnumSpec) -> CoreResult<EnumResult> {
    let constants = scan::enum_constants(text, &spec.const_prefix)?;
    debug!(
        enum_name = %spec.name,
        found = constants.len(),
        min = spec.min_constants,
        "enum constants"
    );
    Ok(EnumResult {
        name: spec.name.clone(),
        const_prefix: spec.const_prefix.clone(),
        min_constants: spec.min_constants,
        constants,
    })
}

fn check_type(
    text: &str,
    namespace: &str,
    spec: &TypeSpec,
    rule: MethodRule,
) -> CoreResult<TypeResult> {
    let registered = scan::has_type_registration(text, namespace, &spec.name)?;
    let mut found_methods = Vec::new();
    let mut missing_methods = Vec::new();
    for m in &spec.methods {
        if scan::has_method_registration(text, m)? {
            found_methods.push(m.clone());
        } else {
            missing_methods.push(m.clone());
        }
    }
    let result = TypeResult {
        name: spec.name.clone(),
        rule,
        registered,
        found_methods,
        missing_methods,
    };
    debug!(
        type_name = %result.name,
        ?rule,
        registered,
        found = result.found_methods.len(),
        required = result.required(),
        passed = result.passed(),
        "type bindings"
    );
    Ok(result)
}

fn check_specializations(
    text: &str,
    namespace: &str,
    expected: &[String],
) -> CoreResult<SpecializationResult> {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for t in expected {
        if scan::has_bits_specialization(text, namespace, t)? {
            found.push(t.clone());
        } else {
            missing.push(t.clone());
        }
    }
    debug!(found = found.len(), missing = ?missing, "IsBits specializations");
    Ok(SpecializationResult { found, missing })
}

fn check_headers(text: &str, headers: &[String]) -> CoreResult<Vec<HeaderResult>> {
    headers
        .iter()
        .map(|h| -> CoreResult<HeaderResult> {
            let present = scan::has_include(text, h)?;
            debug!(header = %h, present, "include");
            Ok(HeaderResult {
                header: h.clone(),
                present,
            })
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn build_checklist(
    enums: &[EnumResult],
    supporting_types: &[TypeResult],
    message_types: &[TypeResult],
    specializations: &SpecializationResult,
    headers: &[HeaderResult],
    catalog_sizes: CatalogSizes,
    expected_sizes: CatalogSizes,
    balance: Balance,
) -> Checklist {
    let mut out = Checklist::new();

    for e in enums {
        out.push(check(
            &e.check_name(),
            e.passed(),
            format!("{} constants (min {})", e.constants.len(), e.min_constants),
        ));
    }

    out.push(types_check(CHECK_SUPPORTING_TYPES, supporting_types));
    out.push(types_check(CHECK_MESSAGE_TYPES, message_types));

    let sizes_ok = catalog_sizes == expected_sizes;
    out.push(check(
        CHECK_CATALOG_SIZES,
        sizes_ok,
        if sizes_ok {
            "ok".to_string()
        } else {
            format!(
                "supporting {}/{}, message {}/{}, isbits {}/{}, headers {}/{}",
                catalog_sizes.supporting_types,
                expected_sizes.supporting_types,
                catalog_sizes.message_types,
                expected_sizes.message_types,
                catalog_sizes.bits_types,
                expected_sizes.bits_types,
                catalog_sizes.headers,
                expected_sizes.headers
            )
        },
    ));

    out.push(check(
        CHECK_SPECIALIZATIONS,
        specializations.passed(),
        format!(
            "{}/{} specializations",
            specializations.found.len(),
            specializations.expected()
        ),
    ));

    let missing_headers: Vec<&str> = headers
        .iter()
        .filter(|h| !h.present)
        .map(|h| h.header.as_str())
        .collect();
    out.push(check(
        CHECK_HEADERS,
        missing_headers.is_empty(),
        if missing_headers.is_empty() {
            "ok".to_string()
        } else {
            format!("missing: {}", missing_headers.join(", "))
        },
    ));

    out.push(check(
        CHECK_SYNTAX,
        balance.is_balanced(),
        format!(
            "braces {}/{}, parens {}/{}",
            balance.open_braces, balance.close_braces, balance.open_parens, balance.close_parens
        ),
    ));

    out
}

fn types_check(name: &str, results: &[TypeResult]) -> checklist::CheckResult {
    let failing: Vec<&str> = results
        .iter()
        .filter(|t| !t.passed())
        .map(|t| t.name.as_str())
        .collect();
    let message = if failing.is_empty() {
        format!("{}/{} types complete", results.len(), results.len())
    } else {
        format!("incomplete: {}", failing.join(", "))
    };
    check(name, failing.is_empty(), message)
}

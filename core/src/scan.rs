//! Textual probes over jlcxx-style binding source.
//!
//! These are heuristics over raw text, not a C++ parser. Names coming from the
//! catalog are always passed through `regex::escape`.

use crate::error::CoreResult;
use regex::Regex;

const ADD_BITS_CALL: &str = r"\bmod\.add_bits<";
const SET_CONST_CALL: &str = r"\bmod\.set_const\(";
const METHOD_CALL: &str = r"\bmod\.method\(";

/// Raw counts of the three registration call kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationCounts {
    pub type_registrations: usize,
    pub const_registrations: usize,
    pub method_registrations: usize,
}

pub fn count_registrations(text: &str) -> CoreResult<RegistrationCounts> {
    Ok(RegistrationCounts {
        type_registrations: count_matches(text, ADD_BITS_CALL)?,
        const_registrations: count_matches(text, SET_CONST_CALL)?,
        method_registrations: count_matches(text, METHOD_CALL)?,
    })
}

pub fn count_matches(text: &str, pattern: &str) -> CoreResult<usize> {
    let re = Regex::new(pattern)?;
    Ok(re.find_iter(text).count())
}

/// Names of constants registered with the given prefix, in file order.
pub fn enum_constants(text: &str, prefix: &str) -> CoreResult<Vec<String>> {
    let re = Regex::new(&format!(
        r#"\bmod\.set_const\(\s*"({}\w+)"\s*,"#,
        regex::escape(prefix)
    ))?;
    Ok(re
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect())
}

pub fn has_type_registration(text: &str, namespace: &str, type_name: &str) -> CoreResult<bool> {
    let re = Regex::new(&format!(
        r"\bmod\.add_bits<\s*{}::{}\s*>",
        regex::escape(namespace),
        regex::escape(type_name)
    ))?;
    Ok(re.is_match(text))
}

/// Method lookup is file-wide: any `mod.method("name"` satisfies it.
pub fn has_method_registration(text: &str, method: &str) -> CoreResult<bool> {
    let re = Regex::new(&format!(
        r#"\bmod\.method\(\s*"{}""#,
        regex::escape(method)
    ))?;
    Ok(re.is_match(text))
}

pub fn has_bits_specialization(text: &str, namespace: &str, type_name: &str) -> CoreResult<bool> {
    let re = Regex::new(&format!(
        r"template\s*<\s*>\s*struct\s+IsBits\s*<\s*{}::{}\s*>",
        regex::escape(namespace),
        regex::escape(type_name)
    ))?;
    Ok(re.is_match(text))
}

/// Only counts includes at the start of a line, so commented-out ones are missed.
pub fn has_include(text: &str, header: &str) -> CoreResult<bool> {
    let re = Regex::new(&format!(
        r"(?m)^[ \t]*#[ \t]*include[ \t]*<{}>",
        regex::escape(header)
    ))?;
    Ok(re.is_match(text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance {
    pub open_braces: usize,
    pub close_braces: usize,
    pub open_parens: usize,
    pub close_parens: usize,
}

impl Balance {
    pub fn of(text: &str) -> Self {
        let mut b = Balance::default();
        for ch in text.chars() {
            match ch {
                '{' => b.open_braces += 1,
                '}' => b.close_braces += 1,
                '(' => b.open_parens += 1,
                ')' => b.close_parens += 1,
                _ => {}
            }
        }
        b
    }

    pub fn is_balanced(&self) -> bool {
        self.open_braces == self.close_braces && self.open_parens == self.close_parens
    }
}

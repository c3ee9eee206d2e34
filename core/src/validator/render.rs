use super::{TypeResult, ValidationReport};
use std::fmt::Write;

const RULE: &str =
    "================================================================================";
const ENUM_SAMPLE: usize = 3;

/// Renders the console report, sections 1 through 7, ending with the verdict.
pub fn render_report(r: &ValidationReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, r);
    out
}

fn write_report(out: &mut String, r: &ValidationReport) -> std::fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "BINDING VALIDATION REPORT")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Source: {}", r.source_path.display())?;
    writeln!(out, "Catalog: {}", r.catalog_version)?;

    let s = &r.statistics;
    writeln!(out, "\n1. CORE STATISTICS")?;
    writeln!(out, "   File size: {} bytes", group_thousands(s.bytes))?;
    writeln!(out, "   Lines: {}", s.lines)?;
    writeln!(out, "   add_bits() calls: {}", s.registrations.type_registrations)?;
    writeln!(out, "   set_const() calls: {}", s.registrations.const_registrations)?;
    writeln!(out, "   method() calls: {}", s.registrations.method_registrations)?;
    writeln!(
        out,
        "   Braces: {} open / {} close",
        s.balance.open_braces, s.balance.close_braces
    )?;
    writeln!(
        out,
        "   Parens: {} open / {} close",
        s.balance.open_parens, s.balance.close_parens
    )?;

    writeln!(out, "\n2. ENUMS")?;
    for e in &r.enums {
        writeln!(
            out,
            "   {} {}: {} constants (min {})",
            mark(e.passed()),
            e.name,
            e.constants.len(),
            e.min_constants
        )?;
        for c in e.constants.iter().take(ENUM_SAMPLE) {
            writeln!(out, "     - {}", c)?;
        }
        if e.constants.len() > ENUM_SAMPLE {
            writeln!(out, "     ... and {} more", e.constants.len() - ENUM_SAMPLE)?;
        }
    }

    writeln!(out, "\n3. SUPPORTING TYPES")?;
    for t in &r.supporting_types {
        writeln!(
            out,
            "   {} {}: {}/{} methods{}",
            mark(t.passed()),
            t.name,
            t.found_methods.len(),
            t.required(),
            gaps(t)
        )?;
    }

    writeln!(out, "\n4. MESSAGE TYPES")?;
    for t in &r.message_types {
        let first = t.found_methods.first().map(String::as_str).unwrap_or("MISSING");
        writeln!(
            out,
            "   {} {}: {} ... ({}/{} key methods){}",
            mark(t.passed()),
            t.name,
            first,
            t.found_methods.len(),
            t.required(),
            gaps(t)
        )?;
    }

    writeln!(out, "\n5. ISBITS SPECIALIZATIONS")?;
    writeln!(
        out,
        "   Found: {}/{} specializations",
        r.specializations.found.len(),
        r.specializations.expected()
    )?;
    if !r.specializations.missing.is_empty() {
        writeln!(out, "   Missing: {}", r.specializations.missing.join(", "))?;
    }

    writeln!(out, "\n6. INCLUDES")?;
    for h in &r.headers {
        writeln!(out, "   {} {}", mark(h.present), h.header)?;
    }

    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "7. VALIDATION SUMMARY")?;
    writeln!(out, "{}", RULE)?;
    for c in r.checklist.checks() {
        let status = if c.passed { "✓ PASS" } else { "✗ FAIL" };
        writeln!(out, "  {}: {} ({})", status, c.name, c.message)?;
    }
    writeln!(
        out,
        "\nResult: {}/{} checks passed",
        r.checklist.passed(),
        r.checklist.total()
    )?;

    if r.checklist.all_passed() {
        writeln!(out, "\n✓✓✓ BINDINGS COMPLETE & VALID ✓✓✓")?;
        writeln!(out, "\nBindings are ready for Julia compilation!")?;
    } else {
        writeln!(out, "\n✗ Some checks failed")?;
    }
    Ok(())
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

fn gaps(t: &TypeResult) -> String {
    let mut parts = Vec::new();
    if !t.registered {
        parts.push("not registered".to_string());
    }
    if !t.missing_methods.is_empty() {
        parts.push(format!("missing: {}", t.missing_methods.join(", ")));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" [{}]", parts.join("; "))
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

use bindcheck_core::source::SourceText;
use bindcheck_core::validator::checklist::{EXIT_ALL_PASSED, EXIT_CHECKS_FAILED};
use bindcheck_core::validator::render::render_report;
use bindcheck_core::validator::{
    BindingValidator, ValidationReport, CHECK_HEADERS, CHECK_MESSAGE_TYPES,
    CHECK_SPECIALIZATIONS, CHECK_SUPPORTING_TYPES, CHECK_SYNTAX,
};

const COMPLETE: &str = include_str!("fixtures/databento_jl_complete.cpp");

fn validate(text: &str) -> ValidationReport {
    BindingValidator::new_phase2()
        .unwrap()
        .validate(&SourceText::from_string("databento_jl.cpp", text))
        .unwrap()
}

fn without_lines_containing(text: &str, needle: &str) -> String {
    text.lines()
        .filter(|l| !l.contains(needle))
        .collect::<Vec<_>>()
        .join("\n")
}

fn failed(r: &ValidationReport) -> Vec<String> {
    r.checklist
        .failed_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn complete_bindings_pass_every_check() {
    let r = validate(COMPLETE);
    assert!(failed(&r).is_empty(), "unexpected failures: {:?}", failed(&r));
    assert_eq!(r.checklist.total(), 9);
    assert_eq!(r.exit_code(), EXIT_ALL_PASSED);

    assert_eq!(r.statistics.registrations.type_registrations, 17);
    assert_eq!(r.statistics.registrations.const_registrations, 36);
    assert_eq!(r.statistics.registrations.method_registrations, 48);
    assert_eq!(r.enums[0].constants.len(), 23);
    assert_eq!(r.enums[1].constants.len(), 7);
    assert_eq!(r.enums[2].constants.len(), 3);
    assert_eq!(r.specializations.found.len(), 17);
    assert!(r.all_headers_present());
}

#[test]
fn removing_one_header_fails_only_the_header_check() {
    let text = without_lines_containing(COMPLETE, "#include <databento/datetime.hpp>");
    let r = validate(&text);
    assert_eq!(failed(&r), vec![CHECK_HEADERS.to_string()]);
    assert_eq!(r.exit_code(), EXIT_CHECKS_FAILED);
    let msg = &r.checklist.result_for_check(CHECK_HEADERS).unwrap().message;
    assert!(msg.contains("databento/datetime.hpp"));
}

#[test]
fn unbalanced_braces_fail_syntax_check() {
    let r = validate(&format!("{}\nnamespace extra {{\n", COMPLETE));
    assert_eq!(failed(&r), vec![CHECK_SYNTAX.to_string()]);
}

#[test]
fn unbalanced_parens_fail_syntax_check() {
    let r = validate(&format!("{}\n// trailing ) without partner\n", COMPLETE));
    assert_eq!(failed(&r), vec![CHECK_SYNTAX.to_string()]);
}

#[test]
fn message_type_missing_one_key_method_still_passes() {
    let text = without_lines_containing(COMPLETE, "mod.method(\"raw_symbol\"");
    let r = validate(&text);
    let def = r
        .message_types
        .iter()
        .find(|t| t.name == "InstrumentDefMsg")
        .unwrap();
    assert_eq!(def.found_methods.len(), 3);
    assert_eq!(def.missing_methods, vec!["raw_symbol".to_string()]);
    assert!(def.passed());
    assert!(failed(&r).is_empty());
}

#[test]
fn message_type_missing_two_key_methods_fails() {
    let text = without_lines_containing(COMPLETE, "mod.method(\"raw_symbol\"");
    let text = without_lines_containing(&text, "mod.method(\"currency\"");
    let r = validate(&text);
    assert_eq!(failed(&r), vec![CHECK_MESSAGE_TYPES.to_string()]);
    assert!(r
        .checklist
        .result_for_check(CHECK_MESSAGE_TYPES)
        .unwrap()
        .message
        .contains("InstrumentDefMsg"));
}

#[test]
fn supporting_type_missing_one_method_fails() {
    let text = without_lines_containing(COMPLETE, "mod.method(\"is_maybe_bad_book\"");
    let r = validate(&text);
    let flags = r
        .supporting_types
        .iter()
        .find(|t| t.name == "FlagSet")
        .unwrap();
    assert!(!flags.passed());
    assert_eq!(failed(&r), vec![CHECK_SUPPORTING_TYPES.to_string()]);
}

#[test]
fn unregistered_message_type_fails_despite_methods() {
    let text = without_lines_containing(COMPLETE, "mod.add_bits<databento::ImbalanceMsg>");
    let r = validate(&text);
    let imb = r
        .message_types
        .iter()
        .find(|t| t.name == "ImbalanceMsg")
        .unwrap();
    assert!(!imb.registered);
    assert_eq!(failed(&r), vec![CHECK_MESSAGE_TYPES.to_string()]);
}

#[test]
fn enum_below_minimum_fails_its_own_check() {
    let text = without_lines_containing(COMPLETE, "\"SIDE_NONE\"");
    let r = validate(&text);
    assert_eq!(failed(&r), vec!["Side enum".to_string()]);
}

#[test]
fn missing_specialization_is_named() {
    let text = without_lines_containing(COMPLETE, "IsBits<databento::TradeMsg>");
    let r = validate(&text);
    assert_eq!(r.specializations.missing, vec!["TradeMsg".to_string()]);
    assert_eq!(failed(&r), vec![CHECK_SPECIALIZATIONS.to_string()]);
}

#[test]
fn pass_count_is_bounded_and_drives_exit_code() {
    let inputs = [
        COMPLETE.to_string(),
        String::new(),
        without_lines_containing(COMPLETE, "#include"),
        COMPLETE.replace('}', ""),
    ];
    for text in &inputs {
        let r = validate(text);
        assert!(r.checklist.passed() <= r.checklist.total());
        assert_eq!(
            r.exit_code() == EXIT_ALL_PASSED,
            r.checklist.passed() == r.checklist.total()
        );
    }
}

#[test]
fn validation_of_a_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("databento_jl.cpp");
    std::fs::write(&p, COMPLETE.replace("#include <jlcxx/jlcxx.hpp>", "")).unwrap();

    let v = BindingValidator::new_phase2().unwrap();
    let first = v.validate(&SourceText::load(&p).unwrap()).unwrap();
    let second = v.validate(&SourceText::load(&p).unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(render_report(&first), render_report(&second));
    assert_eq!(first.exit_code(), EXIT_CHECKS_FAILED);
}

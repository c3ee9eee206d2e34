use serde::Serialize;

pub const EXIT_ALL_PASSED: i32 = 0;
pub const EXIT_CHECKS_FAILED: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

/// Ordered pass/fail entries; overall PASS iff every entry passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Checklist {
    checks: Vec<CheckResult>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn result_for_check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            EXIT_ALL_PASSED
        } else {
            EXIT_CHECKS_FAILED
        }
    }
}

pub fn check(name: &str, passed: bool, message: String) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        passed,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_follows_all_passed() {
        let mut c = Checklist::new();
        c.push(check("a", true, "ok".to_string()));
        c.push(check("b", true, "ok".to_string()));
        assert_eq!(c.exit_code(), EXIT_ALL_PASSED);

        c.push(check("c", false, "missing".to_string()));
        assert_eq!(c.passed(), 2);
        assert_eq!(c.total(), 3);
        assert_eq!(c.exit_code(), EXIT_CHECKS_FAILED);
        assert_eq!(c.failed_names(), vec!["c"]);
        assert_eq!(c.result_for_check("c").unwrap().message, "missing");
        assert!(c.result_for_check("zzz").is_none());
    }
}

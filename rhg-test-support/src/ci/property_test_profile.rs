//! Property-test run profile shared by the rhg property suites.
//!
//! `PROGTEST_CASES` overrides the number of cases per property and
//! `RHG_PBT_FORK` runs cases in forked subprocesses. Malformed overrides are
//! logged and ignored.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const RHG_PBT_FORK_ENV_KEY: &str = "RHG_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides from the process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhg_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::from_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Reads the overrides through `lookup`, falling back to the defaults for
    /// unset or malformed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhg_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::from_lookup(64, false, |key| {
    ///     (key == "PROGTEST_CASES").then(|| "8".to_owned())
    /// });
    /// assert_eq!(profile.cases(), 8);
    /// assert!(!profile.fork());
    /// ```
    #[must_use]
    pub fn from_lookup<F>(default_cases: u32, default_fork: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            cases: parse_override(&lookup, PROGTEST_CASES_ENV_KEY, parse_cases)
                .unwrap_or(default_cases),
            fork: parse_override(&lookup, RHG_PBT_FORK_ENV_KEY, parse_bool)
                .unwrap_or(default_fork),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn parse_override<T, L, P>(lookup: &L, key: &'static str, parse: P) -> Option<T>
where
    L: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    let raw = lookup(key)?;
    parse(&raw)
        .inspect_err(|reason| {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "ignoring malformed property-test override",
            );
        })
        .ok()
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn profile(overrides: &[(&str, &str)], default_cases: u32, default_fork: bool) -> ProptestRunProfile {
        let table: HashMap<String, String> = overrides
            .iter()
            .map(|&(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        ProptestRunProfile::from_lookup(default_cases, default_fork, |key| table.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let loaded = profile(&[], 64, false);
        assert_eq!(loaded.cases(), 64);
        assert!(!loaded.fork());
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn valid_case_overrides_apply(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(profile(&[(PROGTEST_CASES_ENV_KEY, raw)], 64, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    fn invalid_case_overrides_fall_back(#[case] raw: &str) {
        assert_eq!(profile(&[(PROGTEST_CASES_ENV_KEY, raw)], 64, false).cases(), 64);
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("1", true)]
    #[case("on", true)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("no", false)]
    #[case("off", false)]
    fn valid_fork_overrides_apply(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(profile(&[(RHG_PBT_FORK_ENV_KEY, raw)], 64, !expected).fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    #[case("2")]
    fn invalid_fork_overrides_fall_back(#[case] raw: &str) {
        assert!(profile(&[(RHG_PBT_FORK_ENV_KEY, raw)], 64, true).fork());
    }
}

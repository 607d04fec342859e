/// Fixture loader
///
/// Fixture files are JSON arrays mixing test cases with plain strings,
/// which serve as section headings.
use serde::Deserialize;
use url_detector::DetectorOptions;

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum DetectionFixture {
    /// Text to scan and the URLs expected from it, in order
    Case {
        input: String,
        /// Flag or preset names, e.g. `"QUOTE_MATCH"` or `"HTML"`
        #[serde(default)]
        options: Vec<String>,
        expected: Vec<String>,
    },
    #[allow(dead_code)]
    Comment(String),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum NormalizationFixture {
    /// A single URL and the normalized parts to compare; absent parts are
    /// not checked
    Case {
        input: String,
        #[serde(default)]
        host: Option<String>,
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        full_url: Option<String>,
    },
    #[allow(dead_code)]
    Comment(String),
}

#[derive(Debug, Clone, Default)]
pub struct FixtureResult {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<FixtureFailure>,
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct FixtureFailure {
    pub test_num: usize,
    pub input: String,
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl FixtureResult {
    pub fn summary(&self) -> String {
        format!("Passed: {}, Failed: {}", self.passed, self.failed)
    }

    pub fn record(&mut self, failures: Vec<FixtureFailure>) {
        if failures.is_empty() {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.failures.extend(failures);
        }
    }
}

/// Combine option names into one set of flags.
///
/// # Panics
///
/// On a name that is not a flag or preset, so typos fail loudly.
pub fn parse_options(names: &[String]) -> DetectorOptions {
    names.iter().fold(DetectorOptions::empty(), |options, name| {
        options
            | DetectorOptions::from_name(name)
                .unwrap_or_else(|| panic!("unknown detector option {name:?}"))
    })
}

pub fn load_detection_fixtures() -> Vec<DetectionFixture> {
    serde_json::from_str(include_str!("detection_cases.json"))
        .expect("Failed to parse detection fixtures")
}

pub fn load_normalization_fixtures() -> Vec<NormalizationFixture> {
    serde_json::from_str(include_str!("normalization_cases.json"))
        .expect("Failed to parse normalization fixtures")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options() {
        assert_eq!(parse_options(&[]), DetectorOptions::default());
        assert_eq!(
            parse_options(&["QUOTE_MATCH".to_string(), "BRACKET_MATCH".to_string()]),
            DetectorOptions::JSON
        );
        assert_eq!(parse_options(&["HTML".to_string()]), DetectorOptions::HTML);
    }

    #[test]
    fn test_fixture_result() {
        let mut result = FixtureResult::default();
        result.record(Vec::new());
        result.record(vec![FixtureFailure {
            test_num: 2,
            input: "x".to_string(),
            field: "urls".to_string(),
            expected: "[]".to_string(),
            actual: "[\"x\"]".to_string(),
        }]);
        assert_eq!(result.summary(), "Passed: 1, Failed: 1");
    }
}

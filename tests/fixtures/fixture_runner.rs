use super::fixture_loader::{
    DetectionFixture, FixtureFailure, FixtureResult, NormalizationFixture, parse_options,
};
/// Fixture runner
///
/// Runs the JSON fixtures against the detector and the normalizer
use url_detector::{NormalizedUrl, UrlBase, detect};

pub fn run_detection_fixtures(fixtures: Vec<DetectionFixture>) -> FixtureResult {
    let mut result = FixtureResult::default();
    let mut test_num = 0;

    for fixture in fixtures {
        let DetectionFixture::Case {
            input,
            options,
            expected,
        } = fixture
        else {
            continue;
        };
        test_num += 1;

        let actual: Vec<String> = match detect(&input, parse_options(&options)) {
            Ok(urls) => urls.iter().map(|url| url.original_url().to_string()).collect(),
            Err(error) => {
                result.record(vec![FixtureFailure {
                    test_num,
                    input,
                    field: "detect".to_string(),
                    expected: "success".to_string(),
                    actual: error.to_string(),
                }]);
                continue;
            }
        };

        let mut failures = Vec::new();
        if actual != expected {
            failures.push(FixtureFailure {
                test_num,
                input,
                field: "urls".to_string(),
                expected: format!("{expected:?}"),
                actual: format!("{actual:?}"),
            });
        }
        result.record(failures);
    }

    result
}

pub fn run_normalization_fixtures(fixtures: Vec<NormalizationFixture>) -> FixtureResult {
    let mut result = FixtureResult::default();
    let mut test_num = 0;

    for fixture in fixtures {
        let NormalizationFixture::Case {
            input,
            host,
            path,
            full_url,
        } = fixture
        else {
            continue;
        };
        test_num += 1;

        let url = match NormalizedUrl::create(&input) {
            Ok(url) => url,
            Err(error) => {
                result.record(vec![FixtureFailure {
                    test_num,
                    input,
                    field: "create".to_string(),
                    expected: "success".to_string(),
                    actual: error.to_string(),
                }]);
                continue;
            }
        };

        let checks = [
            ("host", host, url.host().to_string()),
            ("path", path, url.path().to_string()),
            ("full_url", full_url, url.full_url()),
        ];

        let failures = checks
            .into_iter()
            .filter_map(|(field, expected, actual)| {
                let expected = expected?;
                (expected != actual).then(|| FixtureFailure {
                    test_num,
                    input: input.clone(),
                    field: field.to_string(),
                    expected,
                    actual,
                })
            })
            .collect();
        result.record(failures);
    }

    result
}

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn sampler_command(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("eta-sampler").unwrap();
    // Run away from any developer .env so credentials come only from the test.
    cmd.current_dir(dir)
        .env_remove("GOOGLE_MAPS_API_KEY")
        .env_remove("GOOGLE_MAPS_BASE_URL")
        .env_remove("MAPS_QPS")
        .env("RUST_LOG", "info");
    cmd
}

#[test]
fn test_missing_api_key_is_fatal() {
    let dir = tempdir().unwrap();
    sampler_command(dir.path())
        .arg("3")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GOOGLE_MAPS_API_KEY"))
        .stderr(predicate::str::contains("Attempt").not());
}

#[test]
fn test_zero_count_is_rejected() {
    let dir = tempdir().unwrap();
    sampler_command(dir.path())
        .env("GOOGLE_MAPS_API_KEY", "test-key")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_non_numeric_count_is_rejected() {
    let dir = tempdir().unwrap();
    sampler_command(dir.path())
        .env("GOOGLE_MAPS_API_KEY", "test-key")
        .arg("lots")
        .assert()
        .failure();
}

#[test]
fn test_negative_radius_is_rejected() {
    let dir = tempdir().unwrap();
    sampler_command(dir.path())
        .env("GOOGLE_MAPS_API_KEY", "test-key")
        .args(["2", "--radius-km=-5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--radius-km"));
}

#[test]
fn test_help_lists_options() {
    let dir = tempdir().unwrap();
    sampler_command(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--seed"))
        .stdout(predicate::str::contains("--radius-km"))
        .stdout(predicate::str::contains("[COUNT]"));
}

/// Every request fails: water and ferry checks fail open, the matrix check fails
/// closed, so each candidate is rejected and the run ends empty after 50 attempts.
#[test]
fn test_unreachable_service_exhausts_attempts() {
    let dir = tempdir().unwrap();
    sampler_command(dir.path())
        .env("GOOGLE_MAPS_API_KEY", "SUPERSECRETKEY123")
        .env("GOOGLE_MAPS_BASE_URL", "http://127.0.0.1:9")
        .env("MAPS_QPS", "1000")
        .args(["1", "--seed", "7"])
        .timeout(std::time::Duration::from_secs(120))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not check if"))
        .stderr(predicate::str::contains("Distance matrix for driving"))
        .stderr(predicate::str::contains("SUPERSECRETKEY123").not())
        .stderr(predicate::str::contains("Attempt 50: ✗ Not all modes available"))
        .stderr(predicate::str::contains("Generated 0 valid locations in 50 attempts"))
        .stderr(predicate::str::contains("Failed to generate any valid locations"));

    assert!(!dir.path().join("sample_locations_map.svg").exists());
    assert!(!dir.path().join("sample_locations_map.html").exists());
}

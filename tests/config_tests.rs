use std::io::Write;
use std::time::Duration;

use traffic_signal::config::RuntimeOptions;

#[test]
fn defaults_match_reference_timing() {
    let options = RuntimeOptions::default().validated().unwrap();
    assert_eq!(options.startup_delay, Duration::from_secs(2));
    assert_eq!(options.presenter_poll, Duration::from_millis(500));
    assert!(options.clear_screen);
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
startup-delay: 0s
presenter-poll: 250ms
clear-screen: false
"#;
    let options: RuntimeOptions = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(options.startup_delay, Duration::ZERO);
    assert_eq!(options.presenter_poll, Duration::from_millis(250));
    assert!(!options.clear_screen);
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let options: RuntimeOptions = serde_yaml::from_str("clear-screen: false\n").unwrap();
    assert_eq!(options.startup_delay, Duration::from_secs(2));
    assert_eq!(options.presenter_poll, Duration::from_millis(500));
}

#[test]
fn phase_durations_are_not_configurable() {
    let err = serde_yaml::from_str::<RuntimeOptions>("red-dwell: 10s\n").unwrap_err();
    assert!(err.to_string().contains("red-dwell"), "{err}");
}

#[test]
fn reject_zero_presenter_poll() {
    let options: RuntimeOptions = serde_yaml::from_str("presenter-poll: 0s\n").unwrap();
    let err = options.validated().unwrap_err();
    assert!(err.to_string().contains("presenter-poll"), "{err}");
}

#[test]
fn reject_presenter_poll_beyond_shutdown_bound() {
    let options: RuntimeOptions = serde_yaml::from_str("presenter-poll: 3s\n").unwrap();
    let err = options.validated().unwrap_err();
    assert!(err.to_string().contains("must not exceed 1s"), "{err}");
}

#[test]
fn load_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "startup-delay: 1s 500ms").unwrap();
    let options = RuntimeOptions::from_yaml_file(file.path())
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(options.startup_delay, Duration::from_millis(1_500));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(RuntimeOptions::from_yaml_file(dir.path().join("absent.yaml")).is_err());
}

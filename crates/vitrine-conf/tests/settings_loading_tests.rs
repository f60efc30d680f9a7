//! Settings loaded from files and the process environment.

use std::env;
use std::path::PathBuf;

use rstest::rstest;
use serial_test::serial;
use vitrine_conf::{Settings, SettingsError};

#[rstest]
#[serial(vitrine_env)]
fn test_load_file_then_environment() {
	// Arrange
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("vitrine.toml");
	std::fs::write(
		&path,
		"port = 8080\nitems_path = \"fixtures/items.json\"\noutput_dir = \"public\"\n",
	)
	.unwrap();
	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		env::set_var("VITRINE_OUTPUT_DIR", "out");
	}

	// Act
	let settings = Settings::load(Some(&path));

	// SAFETY: See above.
	unsafe {
		env::remove_var("VITRINE_OUTPUT_DIR");
	}

	// Assert
	let settings = settings.unwrap();
	assert_eq!(settings.port, 8080);
	assert_eq!(settings.items_path, PathBuf::from("fixtures/items.json"));
	assert_eq!(settings.output_dir, PathBuf::from("out"));
}

#[rstest]
#[serial(vitrine_env)]
fn test_invalid_environment_value_fails_load() {
	// Arrange
	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		env::set_var("VITRINE_PORT", "not-a-port");
	}

	// Act
	let result = Settings::load(None);

	// SAFETY: See above.
	unsafe {
		env::remove_var("VITRINE_PORT");
	}

	// Assert
	assert!(matches!(result, Err(SettingsError::InvalidEnv { .. })));
}

#[rstest]
fn test_missing_file_reports_path() {
	// Arrange
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.toml");

	// Act
	let result = Settings::from_file(&path);

	// Assert
	match result {
		Err(SettingsError::Io { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("expected Io error, got {:?}", other),
	}
}

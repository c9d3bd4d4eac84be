use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use filehub::cli::OutputFormat;
use filehub::config::Config;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();
    assert_eq!(config.api_url, "http://localhost:8000");
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.output, OutputFormat::Table);
    assert!(config.color);
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("FILEHUB_OUTPUT", "csv");
    std::env::set_var("FILEHUB_COLOR", "false");

    let config: Config = Config::figment(None, None).extract().unwrap();
    assert_eq!(config.output, OutputFormat::Csv);
    assert!(!config.color);

    std::env::remove_var("FILEHUB_OUTPUT");
    std::env::remove_var("FILEHUB_COLOR");
}

#[test]
fn test_config_explicit_file_overrides_platform_file() {
    let temp_dir = tempdir().unwrap();
    let platform = temp_dir.path().join("platform.toml");
    let explicit = temp_dir.path().join("explicit.toml");

    fs::write(
        &platform,
        "api_url = \"http://platform:8000\"\ntimeout_secs = 7\n",
    )
    .unwrap();
    fs::write(&explicit, "api_url = \"https://files.example.com\"\n").unwrap();

    let config: Config = Config::figment(Some(&platform), Some(&explicit))
        .extract()
        .unwrap();
    assert_eq!(config.api_url, "https://files.example.com");
    assert_eq!(config.timeout_secs, 7);
}

#[test]
fn test_config_missing_layers_are_skipped() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&missing))
        .extract()
        .unwrap();
    assert_eq!(config.api_url, Config::default().api_url);
}

#[test]
fn test_config_invalid_value_is_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "timeout_secs = \"soon\"\n").unwrap();

    let result: Result<Config, _> = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract();
    assert!(result.is_err());
}

#[test]
fn test_config_load_rejects_missing_explicit_file() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_config_save_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("sub").join("config.toml");

    let config = Config {
        api_url: "http://files.local".to_string(),
        timeout_secs: 2,
        output: OutputFormat::Json,
        color: false,
    };
    config.save_to(&config_path).unwrap();

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("api_url = \"http://files.local\""));
    assert!(saved.contains("timeout_secs = 2"));
    assert!(saved.contains("output = \"json\""));
    assert!(saved.contains("color = false"));
}

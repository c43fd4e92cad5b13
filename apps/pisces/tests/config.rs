//! Tests for config parsing and resolution.

use pisces::{
    Config,
    config::{DEFAULT_CONFIG, generate_default_config, resolve},
    utils::expand_env_vars,
};

#[test]
fn default_template_parses() {
    let config = Config::from_toml(DEFAULT_CONFIG).unwrap();
    assert_eq!(config.model.name, "gemini-1.5-flash-latest");
    assert_eq!(config.model.temperature, 0.7);
    assert!(config.model.base_url.is_none());
    assert_eq!(config.image.max_dimension, 768);
}

#[test]
fn missing_sections_use_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.model.name, "gemini-1.5-flash-latest");
    assert!(config.model.api_key.is_empty());
    assert_eq!(config.image.max_dimension, 768);
}

#[test]
fn generation_settings() {
    let config = Config::from_toml(
        r#"
[model]
name = "gemini-1.5-pro"
temperature = 0.2
"#,
    )
    .unwrap();
    let generation = config.generation();
    assert_eq!(generation.model, "gemini-1.5-pro");
    assert_eq!(generation.temperature, 0.2);
}

#[test]
fn provider_requires_api_key() {
    let config = Config::from_toml("[model]\napi_key = \"  \"\n").unwrap();
    let err = config.provider(reqwest::Client::new()).err().unwrap();
    assert!(err.to_string().contains("missing api key"));
}

#[test]
fn provider_honors_base_url() {
    let config = Config::from_toml(
        r#"
[model]
api_key = "k"
base_url = "http://localhost:9000/v1"
"#,
    )
    .unwrap();
    let provider = config.provider(reqwest::Client::new()).unwrap();
    assert_eq!(
        provider.endpoint("m", false),
        "http://localhost:9000/v1/models/m:generateContent"
    );
}

#[test]
fn expands_env_vars() {
    let path = std::env::var("PATH").unwrap_or_default();
    assert_eq!(expand_env_vars("${PATH}"), path);
    assert_eq!(
        expand_env_vars("key=${PISCES_SURELY_UNSET_VARIABLE};"),
        "key=;"
    );
    assert_eq!(expand_env_vars("$HOME {x}"), "$HOME {x}");
}

#[test]
fn unterminated_reference_is_kept() {
    assert_eq!(
        expand_env_vars("api_key = \"${GEMINI_API_KEY\""),
        "api_key = \"${GEMINI_API_KEY\""
    );
    assert_eq!(expand_env_vars("tail ${"), "tail ${");
}

#[test]
fn explicit_path_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[image]\nmax_dimension = 512\n").unwrap();

    let (config, resolved) = resolve(Some(path.as_path())).unwrap();
    assert_eq!(resolved, path);
    assert_eq!(config.image.max_dimension, 512);
}

#[test]
fn explicit_missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(resolve(Some(dir.path().join("absent.toml").as_path())).is_err());
}

#[test]
fn generated_default_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("pisces.toml");
    generate_default_config(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    let config = Config::load(&path).unwrap();
    assert_eq!(config.image.max_dimension, 768);
}

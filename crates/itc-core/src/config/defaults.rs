//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "itc.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "itc.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML, ".itc.toml", ".itc.yaml"]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# itc configuration

[session]
# username = "dev@example.com"
host = "https://itunesconnect.apple.com"
# cache_dir = ".itc-cache"
# timeout_secs = 60

[apps]
primary_language = "English_CA"
"#;

use super::*;

use clap::Parser;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn flags_override_env_which_overrides_file() {
    let file = ConfigPaths {
        aws_cred: Some("file-cred".into()),
        api_config_override: Some("file-api.json".into()),
        private_key: Some("file.pem".into()),
        schema_dir: Some("file-schemas".into()),
    };
    let env_vars = HashMap::from([
        (ENV_AWS_CRED, "env-cred"),
        (ENV_API_CONFIG, "env-api.json"),
    ]);
    let flags = ConfigPaths {
        aws_cred: Some("flag-cred".into()),
        ..ConfigPaths::default()
    };

    let resolved = resolve_config_paths(
        Some(file),
        |name| env_vars.get(name).map(|v| v.to_string()),
        flags,
    );

    assert_eq!(resolved.aws_cred, Some("flag-cred".into()));
    assert_eq!(resolved.api_config_override, Some("env-api.json".into()));
    assert_eq!(resolved.private_key, Some("file.pem".into()));
    assert_eq!(resolved.schema_dir, Some("file-schemas".into()));
}

#[test]
fn blank_env_values_are_ignored() {
    let file = ConfigPaths {
        private_key: Some("file.pem".into()),
        ..ConfigPaths::default()
    };
    let resolved = resolve_config_paths(
        Some(file),
        |name| (name == ENV_PRIVATE_KEY).then(|| "  ".to_string()),
        ConfigPaths::default(),
    );
    assert_eq!(resolved.private_key, Some("file.pem".into()));
}

#[test]
fn nothing_configured_yields_empty_paths() {
    let resolved = resolve_config_paths(None, no_env, ConfigPaths::default());
    assert_eq!(resolved, ConfigPaths::default());
}

#[test]
fn reads_partial_toml_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("release_core_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("config.toml");
    fs::write(
        &path,
        "aws_cred = \"/home/ci/.aws/credentials\"\nschema_dir = \"/opt/rpm/schemas\"\n",
    )
    .expect("write config");

    let parsed = read_config_file(&path).expect("parse");
    assert_eq!(parsed.aws_cred, Some("/home/ci/.aws/credentials".into()));
    assert_eq!(parsed.schema_dir, Some("/opt/rpm/schemas".into()));
    assert_eq!(parsed.private_key, None);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let missing = env::temp_dir().join("release_core_config_test_missing/config.toml");
    let err = load_config_paths(Some(&missing), ConfigPaths::default()).expect_err("missing");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("release_core_config_bad_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("config.toml");
    fs::write(&path, "aws_cred = [not a path").expect("write config");

    let err = read_config_file(&path).expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse { .. }));

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[derive(Parser, Debug)]
struct FlagsOnly {
    #[command(flatten)]
    paths: ConfigArgs,
}

#[test]
fn cli_flags_map_onto_config_paths() {
    let cli = FlagsOnly::try_parse_from([
        "release",
        "--aws-cred",
        "/home/ci/.aws/credentials",
        "--api",
        "/etc/rpm/api.json",
        "--private",
        "/keys/release.pem",
        "--schema",
        "/opt/rpm/schemas",
    ])
    .expect("parse flags");

    assert_eq!(
        cli.paths.flags(),
        ConfigPaths {
            aws_cred: Some("/home/ci/.aws/credentials".into()),
            api_config_override: Some("/etc/rpm/api.json".into()),
            private_key: Some("/keys/release.pem".into()),
            schema_dir: Some("/opt/rpm/schemas".into()),
        }
    );
    assert_eq!(cli.paths.config, None);
}

#[test]
fn flags_win_over_explicit_config_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("release_core_config_flags_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("config.toml");
    fs::write(&path, "private_key = \"/file.pem\"\nschema_dir = \"/file-schemas\"\n")
        .expect("write config");

    let args = ConfigArgs {
        private_key: Some("/flag.pem".into()),
        config: Some(path),
        ..ConfigArgs::default()
    };
    let resolved = args.load().expect("load");
    assert_eq!(resolved.private_key, Some("/flag.pem".into()));
    if env::var(ENV_SCHEMA_DIR).map_or(true, |value| value.trim().is_empty()) {
        assert_eq!(resolved.schema_dir, Some("/file-schemas".into()));
    }

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::config::loader::load_settings;
    use crate::config::settings::LogFormat;
    use crate::utils::constants::{
        DEFAULT_TIME_SKEW_SECS, DEFAULT_TOKEN_LIFETIME_SECS, DEFAULT_WIRE_TIME_FORMAT,
    };

    fn write_settings(dir: &TempDir, yaml: &str) -> PathBuf {
        let path = dir.path().join("settings.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn full_settings_file_loads() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(
            &dir,
            r#"
generator:
  auth_key: alias/auth-key
  region: us-west-2
  token_version: 2
  token_lifetime_seconds: 900
  token_cache_file: /var/cache/token-sealer/token.json
  time_skew_seconds: 60
  wire_time_format: "%Y-%m-%dT%H:%M:%SZ"
context:
  from: service-a
  to: service-b
  user_type: service
sealing:
  endpoint: http://127.0.0.1:9099
logging:
  level: debug
  format: json
"#,
        );

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.generator.auth_key, "alias/auth-key");
        assert_eq!(settings.generator.token_lifetime_seconds, 900);
        assert_eq!(settings.generator.time_skew_seconds, 60);
        assert_eq!(settings.generator.wire_time_format, "%Y-%m-%dT%H:%M:%SZ");
        assert_eq!(
            settings.generator.token_cache_file.as_deref(),
            Some(std::path::Path::new("/var/cache/token-sealer/token.json"))
        );
        assert_eq!(settings.logging.unwrap().format, LogFormat::Json);
    }

    #[test]
    fn omitted_fields_get_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(
            &dir,
            r#"
generator:
  auth_key: alias/auth-key
  region: us-west-2
  token_version: 1
context:
  from: service-a
  to: service-b
sealing:
  endpoint: http://127.0.0.1:9099
"#,
        );

        let settings = load_settings(&path).unwrap();
        assert_eq!(
            settings.generator.token_lifetime_seconds,
            DEFAULT_TOKEN_LIFETIME_SECS
        );
        assert_eq!(settings.generator.time_skew_seconds, DEFAULT_TIME_SKEW_SECS);
        assert_eq!(settings.generator.wire_time_format, DEFAULT_WIRE_TIME_FORMAT);
        assert!(settings.generator.token_cache_file.is_none());
        assert!(settings.logging.is_none());
    }

    #[test]
    fn unknown_token_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(
            &dir,
            r#"
generator:
  auth_key: alias/auth-key
  region: us-west-2
  token_version: 3
context:
  from: service-a
  to: service-b
sealing:
  endpoint: http://127.0.0.1:9099
"#,
        );
        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn v2_without_user_type_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(
            &dir,
            r#"
generator:
  auth_key: alias/auth-key
  region: us-west-2
  token_version: 2
context:
  from: service-a
  to: service-b
sealing:
  endpoint: http://127.0.0.1:9099
"#,
        );
        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("user_type"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_settings("/nonexistent/settings.yaml").is_err());
    }
}

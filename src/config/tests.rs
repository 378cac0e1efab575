use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_review_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("REVIEW_PORT");
        env::remove_var("REVIEW_BIND_ADDR");
        env::remove_var("REVIEW_LEXICON_PATH");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.lexicon_path.is_none());
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_review_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert!(config.lexicon_path.is_none());
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_review_env();

    with_env_vars(&[("REVIEW_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_review_env();

    with_env_vars(&[("REVIEW_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_review_env();

    with_env_vars(&[("REVIEW_PORT", "not-a-port")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::PortParseError { .. })));
    });

    with_env_vars(&[("REVIEW_PORT", "0")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_bind_addr() {
    clear_review_env();

    with_env_vars(&[("REVIEW_BIND_ADDR", "localhost")], || {
        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
    });
}

#[test]
#[serial]
fn test_from_env_lexicon_path_trims_blank() {
    clear_review_env();

    with_env_vars(&[("REVIEW_LEXICON_PATH", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.lexicon_path.is_none());
    });

    with_env_vars(&[("REVIEW_LEXICON_PATH", "/etc/review/lexicon.json")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.lexicon_path,
            Some(PathBuf::from("/etc/review/lexicon.json"))
        );
    });
}

#[test]
fn test_validate_lexicon_path() {
    assert!(Config::default().validate().is_ok());

    let missing = Config {
        lexicon_path: Some(PathBuf::from("/nonexistent/lexicon.json")),
        ..Default::default()
    };
    assert!(matches!(
        missing.validate(),
        Err(ConfigError::LexiconNotFound { .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    let directory = Config {
        lexicon_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(
        directory.validate(),
        Err(ConfigError::LexiconNotAFile { .. })
    ));

    let file = tempfile::NamedTempFile::new().unwrap();
    let ok = Config {
        lexicon_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(ok.validate().is_ok());
}

#[test]
fn test_lexicon_errors_name_the_lexicon() {
    let missing = Config {
        lexicon_path: Some(PathBuf::from("/nonexistent/lexicon.json")),
        ..Default::default()
    };
    let message = missing.validate().unwrap_err().to_string();

    assert!(message.starts_with("lexicon file does not exist"));
    assert!(message.contains("/nonexistent/lexicon.json"));
}

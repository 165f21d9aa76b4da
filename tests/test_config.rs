use std::path::{Path, PathBuf};
use std::time::Duration;

use static_httpd::config::{Cli, ConfigError, Settings};

fn settings_with_root(root: &Path) -> Settings {
    Settings {
        root: Some(root.to_path_buf()),
        ..Settings::default()
    }
}

#[test]
fn test_config_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.root, None);
    assert_eq!(settings.address, "127.0.0.1");
    assert_eq!(settings.port, 8080);
    assert_eq!(settings.workers, 4);
    assert_eq!(settings.read_timeout_secs, 10);
}

#[test]
fn test_config_validate_canonicalizes_root() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("site");
    std::fs::create_dir(&nested).unwrap();

    let cfg = settings_with_root(&nested.join("..").join("site"))
        .validate()
        .unwrap();

    assert_eq!(
        cfg.document_root.path(),
        std::fs::canonicalize(&nested).unwrap()
    );
    assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
    assert_eq!(cfg.read_timeout, Duration::from_secs(10));
}

#[test]
fn test_config_negative_workers_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        workers: -1,
        ..settings_with_root(dir.path())
    };

    assert!(matches!(
        settings.validate(),
        Err(ConfigError::InvalidWorkers(-1))
    ));
}

#[test]
fn test_config_zero_workers_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        workers: 0,
        ..settings_with_root(dir.path())
    };

    assert_eq!(settings.validate().unwrap().workers, 0);
}

#[test]
fn test_config_port_range() {
    let dir = tempfile::tempdir().unwrap();

    for port in [0, -80, 65_536] {
        let settings = Settings {
            port,
            ..settings_with_root(dir.path())
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidPort(p)) if p == port
        ));
    }

    let settings = Settings {
        port: 1,
        ..settings_with_root(dir.path())
    };
    assert_eq!(settings.validate().unwrap().port, 1);
}

#[test]
fn test_config_root_must_be_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("index.html");
    std::fs::write(&file, "<html></html>").unwrap();

    assert!(matches!(
        settings_with_root(&file).validate(),
        Err(ConfigError::RootNotDirectory { .. })
    ));
    assert!(matches!(
        settings_with_root(&dir.path().join("missing")).validate(),
        Err(ConfigError::RootNotDirectory { .. })
    ));
}

#[test]
fn test_config_missing_root() {
    assert!(matches!(
        Settings::default().validate(),
        Err(ConfigError::MissingRoot)
    ));
}

#[test]
fn test_config_from_yaml() {
    let yaml = "root: /srv/www\nport: 9000\nworkers: 8\nread_timeout_secs: 3\n";
    let settings = Settings::from_yaml(yaml, Path::new("server.yaml")).unwrap();

    assert_eq!(settings.root, Some(PathBuf::from("/srv/www")));
    assert_eq!(settings.port, 9000);
    assert_eq!(settings.workers, 8);
    assert_eq!(settings.read_timeout_secs, 3);
    assert_eq!(settings.address, "127.0.0.1");
    assert_eq!(settings.write_timeout_secs, 10);
}

#[test]
fn test_config_from_yaml_rejects_unknown_keys() {
    let result = Settings::from_yaml("listen: 0.0.0.0\n", Path::new("server.yaml"));

    assert!(matches!(result, Err(ConfigError::ParseFile { .. })));
}

#[test]
fn test_config_cli_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("server.yaml");
    std::fs::write(&file, "address: 0.0.0.0\nport: 9000\nworkers: 2\n").unwrap();

    let cli = Cli {
        root: Some(dir.path().to_path_buf()),
        port: Some(3000),
        config: Some(file),
        ..Cli::default()
    };
    let settings = Settings::load(cli).unwrap();

    assert_eq!(settings.address, "0.0.0.0");
    assert_eq!(settings.port, 3000);
    assert_eq!(settings.workers, 2);
    assert_eq!(settings.root.as_deref(), Some(dir.path()));
}

#[test]
fn test_config_unreadable_file() {
    let cli = Cli {
        config: Some(PathBuf::from("/nonexistent/server.yaml")),
        ..Cli::default()
    };

    assert!(matches!(
        Settings::load(cli),
        Err(ConfigError::ReadFile { .. })
    ));
}

#[test]
fn test_config_zero_timeouts_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = "read_timeout_secs: 0\nwrite_timeout_secs: 0\n";
    let settings = Settings {
        root: Some(dir.path().to_path_buf()),
        ..Settings::from_yaml(yaml, Path::new("server.yaml")).unwrap()
    };

    assert!(matches!(
        settings.validate(),
        Err(ConfigError::InvalidTimeout("read_timeout_secs"))
    ));

    let settings = Settings {
        write_timeout_secs: 0,
        ..settings_with_root(dir.path())
    };
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::InvalidTimeout("write_timeout_secs"))
    ));
}

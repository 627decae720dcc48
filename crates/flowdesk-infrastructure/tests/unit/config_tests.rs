//! Configuration loading
//!
//! Environment changes happen inside `figment::Jail`, which serialises the
//! tests and restores the environment and working directory afterwards.

use figment::Jail;
use flowdesk_domain::Error;
use flowdesk_infrastructure::config::{AppConfig, ConfigLoader, DatabaseConfig, RepositoryProvider};

#[test]
fn test_defaults_without_sources() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("FLOWDESK__DATABASE__PROVIDER", "memory");

        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.database.provider, RepositoryProvider::Memory);
        assert_eq!(config.database.database, "ProjectManagement");
        assert_eq!(config.database.auth_source, "admin");
        assert_eq!(config.database.batch_concurrency, 1);
        assert!(!config.database.upsert_on_update);
        Ok(())
    });
}

#[test]
fn test_mongodb_requires_credentials() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("DB_URI", "localhost:27017");
        jail.set_env("DB_USERNAME", "root");

        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("DB_PASSWORD"));
        Ok(())
    });
}

#[test]
fn test_credential_variables_map_into_database() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("DB_URI", "db1:27017,db2:27017");
        jail.set_env("DB_USERNAME", "root");
        jail.set_env("DB_PASSWORD", "hunter2");

        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.database.provider, RepositoryProvider::Mongodb);
        assert_eq!(config.database.uri.as_deref(), Some("db1:27017,db2:27017"));
        assert_eq!(config.database.username.as_deref(), Some("root"));

        let settings = config.database.mongo_settings().unwrap();
        assert_eq!(settings.server_addresses().unwrap().len(), 2);
        assert!(!format!("{:?}", config.database).contains("hunter2"));
        Ok(())
    });
}

#[test]
fn test_file_then_environment_precedence() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "flowdesk.toml",
            r#"
            [logging]
            level = "debug"

            [database]
            provider = "memory"
            database = "FromFile"
            batch_concurrency = 4
            "#,
        )?;
        jail.set_env("FLOWDESK__DATABASE__DATABASE", "FromEnv");

        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.database.database, "FromEnv");
        assert_eq!(config.database.batch_concurrency, 4);
        assert_eq!(config.database.repository_options().batch_concurrency, 4);
        Ok(())
    });
}

#[test]
fn test_explicit_path_and_invalid_values() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "custom.toml",
            r#"
            [database]
            provider = "memory"
            batch_concurrency = 0
            "#,
        )?;

        let err = ConfigLoader::new()
            .with_config_path("custom.toml")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("batch_concurrency"));

        jail.create_file("bad-level.toml", "[logging]\nlevel = \"loud\"\n")?;
        jail.set_env("FLOWDESK__DATABASE__PROVIDER", "memory");
        let err = ConfigLoader::new()
            .with_config_path("bad-level.toml")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
        Ok(())
    });
}

#[test]
fn test_custom_prefix() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("BOARD__DATABASE__PROVIDER", "memory");
        jail.set_env("BOARD__DATABASE__UPSERT_ON_UPDATE", "true");

        let config = ConfigLoader::new().with_env_prefix("BOARD").load().unwrap();
        assert!(config.database.upsert_on_update);
        Ok(())
    });
}

#[test]
fn test_saved_file_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = AppConfig::default();
    config.database = DatabaseConfig {
        provider: RepositoryProvider::Memory,
        database: "Saved".to_string(),
        ..DatabaseConfig::default()
    };
    ConfigLoader::new().save_to_file(&config, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("provider = \"memory\""));

    Jail::expect_with(|jail| {
        jail.clear_env();
        let loaded = ConfigLoader::new().with_config_path(&path).load().unwrap();
        assert_eq!(loaded.database.database, "Saved");
        Ok(())
    });
}

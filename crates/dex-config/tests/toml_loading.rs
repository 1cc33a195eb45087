//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use std::path::PathBuf;

use dex_config::{ApiConfig, DexConfig, ScrapeConfig};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "http://localhost:8080/api/v2"
user_agent = "dex-test/1.0"
list_limit = 151
list_timeout_secs = 5
detail_timeout_secs = 2
"#,
        )?;

        let config: DexConfig = Figment::from(Serialized::defaults(DexConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.api,
            ApiConfig {
                base_url: "http://localhost:8080/api/v2".to_string(),
                user_agent: "dex-test/1.0".to_string(),
                list_limit: 151,
                list_timeout_secs: 5,
                detail_timeout_secs: 2,
            }
        );
        Ok(())
    });
}

#[test]
fn loads_scrape_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[scrape]
concurrency = 4
progress_every = 10
output = "out/dex.json"
placeholder_sprite = "https://img.example/unknown.png"
"#,
        )?;

        let config: DexConfig = Figment::from(Serialized::defaults(DexConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.scrape,
            ScrapeConfig {
                concurrency: 4,
                progress_every: 10,
                output: PathBuf::from("out/dex.json"),
                placeholder_sprite: "https://img.example/unknown.png".to_string(),
            }
        );
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[scrape]\nconcurrency = 8\n")?;

        let config: DexConfig = Figment::from(Serialized::defaults(DexConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.scrape.concurrency, 8);
        assert_eq!(config.scrape.progress_every, 100);
        assert_eq!(config.api, ApiConfig::default());
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".dexdump")?;
        jail.create_file(".dexdump/config.toml", "[api]\nlist_limit = 386\n")?;

        let config = DexConfig::load().expect("config loads");
        assert_eq!(config.api.list_limit, 386);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".dexdump")?;
        jail.create_file(".dexdump/config.toml", "[scrape]\nconcurrency = 8\n")?;
        jail.set_env("DEXDUMP_SCRAPE__CONCURRENCY", "3");

        let config = DexConfig::load().expect("config loads");
        assert_eq!(config.scrape.concurrency, 3);
        Ok(())
    });
}

#[test]
fn invalid_value_fails_load() {
    Jail::expect_with(|jail| {
        jail.set_env("DEXDUMP_SCRAPE__CONCURRENCY", "0");

        let err = DexConfig::load().unwrap_err();
        assert!(err.to_string().contains("scrape.concurrency"));
        Ok(())
    });
}

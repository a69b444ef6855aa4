use figment::Jail;
use om_config::OrgMatchConfig;

#[test]
fn env_sets_directory_credentials() {
    Jail::expect_with(|jail| {
        jail.set_env("ORGMATCH_DIRECTORY__API_KEY", "key-from-env");
        jail.set_env("ORGMATCH_DIRECTORY__TIMEOUT_SECS", "12");

        let config = OrgMatchConfig::load().expect("config loads");
        assert_eq!(config.directory.api_key, "key-from-env");
        assert_eq!(config.directory.timeout_secs, 12);
        assert!(config.directory.is_configured());
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".orgmatch")).expect("create .orgmatch");
        jail.create_file(
            ".orgmatch/config.toml",
            r#"
[resolution]
region_hint = "France"
"#,
        )?;
        jail.set_env("ORGMATCH_RESOLUTION__REGION_HINT", "Spain");

        let config = OrgMatchConfig::load().expect("config loads");
        assert_eq!(config.resolution.region(), Some("Spain"));
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("ORGMATCH_RESOLUTION__SIMILARITY_THRESHOLD", "2.0");
        assert!(OrgMatchConfig::load().is_err());
        Ok(())
    });
}

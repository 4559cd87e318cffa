use figment::Jail;
use strata_config::StrataConfig;

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        jail.set_env("STRATA_BOUNDARY__FAILURE_EXIT_CODE", "3");
        jail.set_env("STRATA_BOUNDARY__KIND_EXIT_CODES__CANCELLED", "130");
        jail.set_env("STRATA_DIAGNOSTICS__INCLUDE_LAYER", "true");

        let config = StrataConfig::load().expect("config loads");
        assert_eq!(config.boundary.failure_exit_code, 3);
        assert_eq!(config.boundary.kind_exit_codes.get("cancelled"), Some(&130));
        assert!(config.diagnostics.include_layer);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        jail.create_dir(".strata")?;
        jail.create_file(
            ".strata/config.toml",
            r#"
[boundary]
failure_exit_code = 4
"#,
        )?;
        jail.set_env("STRATA_BOUNDARY__FAILURE_EXIT_CODE", "5");

        let config = StrataConfig::load().expect("config loads");
        assert_eq!(config.boundary.failure_exit_code, 5);
        Ok(())
    });
}

#[test]
fn invalid_env_value_is_rejected() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        jail.set_env("STRATA_BOUNDARY__FAILURE_EXIT_CODE", "0");
        assert!(StrataConfig::load().is_err());
        Ok(())
    });
}

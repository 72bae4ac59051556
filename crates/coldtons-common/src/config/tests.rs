#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_default_heasarc_targets_nicer_all_sky() {
        let heasarc = HeasarcConfig::default();
        assert_eq!(heasarc.catalog, "nicermastr");
        assert_eq!(heasarc.spatial, "all-sky");
        assert_eq!(heasarc.retries, 1);
        assert_eq!(heasarc.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_identifier_columns_prefer_jname() {
        let columns = default_identifier_columns();
        assert_eq!(columns.first().map(String::as_str), Some("jname"));
        assert!(columns.contains(&"name".to_string()));
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:5000");
        assert_eq!(config.atnf.db_path, "data/psrcat.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [heasarc]
            catalog = "nicermastr"
            timeout_secs = 5
            identifier_columns = ["name"]

            [server]
            static_dir = "frontend/dist"
            "#,
        )
        .unwrap();
        assert_eq!(config.heasarc.timeout_secs, 5);
        assert_eq!(config.heasarc.identifier_columns, vec!["name".to_string()]);
        assert_eq!(config.heasarc.backoff_ms, 2_000);
        assert_eq!(config.server.static_dir.as_deref(), Some("frontend/dist"));
        assert_eq!(config.server.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_cone_search_is_rejected() {
        let config = Config::from_toml("[heasarc]\nspatial = \"cone\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cone"));
    }

    #[test]
    fn test_empty_alias_list_is_rejected() {
        let config = Config::from_toml("[heasarc]\nidentifier_columns = []\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_excessive_retries_rejected() {
        let config = Config::from_toml("[heasarc]\nretries = 64\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retries"));

        let config = Config::from_toml("[heasarc]\nretries = 10\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_atnf_extra_hosts() {
        let config = Config::from_toml(
            "[atnf]\ndb_url = \"https://mirror.example.org/psrcat.db\"\nextra_hosts = [\"mirror.example.org\"]\n",
        )
        .unwrap();
        assert_eq!(config.atnf.extra_hosts, vec!["mirror.example.org".to_string()]);
        assert!(Config::from_toml("").unwrap().atnf.extra_hosts.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = Config::from_toml("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, ColdtonsError::Config(_)));
    }
}

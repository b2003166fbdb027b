//! Command-line and scenario-file handling.

#[cfg(test)]
mod config_tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use rsb_dispatch::StrategyKind;
    use rsb_sim::ScenarioConfig;

    use crate::Args;

    fn write_scenario(dir: &TempDir, json: &str) -> String {
        let path = dir.path().join("scenario.json");
        fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn no_flags_gives_defaults() {
        let args = Args::try_parse_from(["sandbox"]).unwrap();
        assert_eq!(args.scenario_config().unwrap(), ScenarioConfig::default());
    }

    #[test]
    fn partial_file_is_filled_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_scenario(
            &dir,
            r#"{ "stops": 7, "grid": { "rows": 3 }, "sim": { "seed": 99 }, "strategy": "most-passengers" }"#,
        );
        let args = Args::try_parse_from(["sandbox", "--config", &path]).unwrap();
        let config = args.scenario_config().unwrap();

        let defaults = ScenarioConfig::default();
        assert_eq!(config.stops, 7);
        assert_eq!(config.grid.rows, 3);
        assert_eq!(config.grid.cols, defaults.grid.cols);
        assert_eq!(config.sim.seed, 99);
        assert_eq!(config.sim.vehicle_capacity, defaults.sim.vehicle_capacity);
        assert_eq!(config.vehicles, defaults.vehicles);
        assert_eq!(config.max_passengers, defaults.max_passengers);
        assert_eq!(config.strategy, StrategyKind::MostPassengers);
    }

    #[test]
    fn flags_override_file_values() {
        let dir = TempDir::new().unwrap();
        let path = write_scenario(
            &dir,
            r#"{ "stops": 7, "vehicles": 2, "sim": { "seed": 99, "vehicle_capacity": 4 } }"#,
        );
        let args = Args::try_parse_from([
            "sandbox",
            "--config",
            &path,
            "--vehicles",
            "5",
            "--capacity",
            "9",
            "--speed",
            "3.5",
            "--strategy",
            "best-ratio",
        ])
        .unwrap();
        let config = args.scenario_config().unwrap();

        assert_eq!(config.stops, 7, "file value without a flag is kept");
        assert_eq!(config.sim.seed, 99);
        assert_eq!(config.vehicles, 5);
        assert_eq!(config.sim.vehicle_capacity, 9);
        assert_eq!(config.sim.vehicle_speed, 3.5);
        assert_eq!(config.strategy, StrategyKind::BestRatio);
    }

    #[test]
    fn unknown_strategy_flag_is_rejected() {
        assert!(Args::try_parse_from(["sandbox", "--strategy", "fastest"]).is_err());
    }

    #[test]
    fn zero_rows_flag_is_rejected() {
        assert!(Args::try_parse_from(["sandbox", "--rows", "0"]).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let args = Args::try_parse_from(["sandbox", "--config", "/nonexistent/scenario.json"]).unwrap();
        let err = args.scenario_config().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/scenario.json"), "got {err:#}");
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_scenario(&dir, r#"{ "stops": "many" }"#);
        let args = Args::try_parse_from(["sandbox", "--config", &path]).unwrap();
        let err = args.scenario_config().unwrap_err();
        assert!(format!("{err:#}").contains("parsing scenario file"), "got {err:#}");
    }
}

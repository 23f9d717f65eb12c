#[cfg(test)]
mod dashboard_tests {
    use crate::config::SensorConfig;
    use crate::dashboard::DashboardState;
    use crate::sensors::SensorGenerator;
    use crate::tests::test_helpers::test_helpers::base_time;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dataset_created_on_first_use_and_cached() {
        let mut state = DashboardState::new(SensorConfig::default());
        assert_eq!(state.generation(), 0);

        let first = state.sensor_data().clone();
        assert_eq!(state.generation(), 1);
        assert_eq!(first.len(), 20);

        let second = state.sensor_data().clone();
        assert_eq!(state.generation(), 1);
        assert_eq!(first.readings, second.readings);
    }

    #[test]
    fn test_regenerate_replaces_dataset() {
        let config = SensorConfig { reading_count: 8, ..SensorConfig::default() };
        let mut state = DashboardState::new(config);

        state.sensor_data();
        let regenerated = state.regenerate().clone();
        assert_eq!(state.generation(), 2);
        assert_eq!(regenerated.len(), 8);
        assert_eq!(state.sensor_data().generated_at, regenerated.generated_at);
    }

    #[test]
    fn test_adopted_dataset_is_kept() {
        let config = SensorConfig { reading_count: 4, ..SensorConfig::default() };
        let dataset = SensorGenerator::new(config.clone())
            .generate_with(&mut StdRng::seed_from_u64(5), base_time());

        let mut state = DashboardState::with_dataset(config, dataset.clone());
        assert_eq!(state.sensor_data().readings, dataset.readings);
        assert_eq!(state.generation(), 1);
    }
}

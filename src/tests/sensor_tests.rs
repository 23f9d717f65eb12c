#[cfg(test)]
mod sensor_tests {
    use crate::config::SensorConfig;
    use crate::sensors::*;
    use crate::tests::test_helpers::test_helpers::base_time;
    use approx::assert_relative_eq;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reading(minutes_back: i64, humidity_pct: f64, ph: f64) -> SensorReading {
        SensorReading {
            timestamp: base_time() - Duration::minutes(minutes_back),
            humidity_pct,
            ph,
            phosphorus_present: true,
            potassium_present: false,
            pump_on: pump_should_run(humidity_pct, 50.0),
        }
    }

    #[test]
    fn test_count_and_spacing() {
        let generator = SensorGenerator::new(SensorConfig::default());

        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let dataset = generator.generate_with(&mut rng, base_time());

            assert_eq!(dataset.len(), 20);
            assert_eq!(dataset.latest().unwrap().timestamp, base_time());
            for pair in dataset.readings.windows(2) {
                assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::minutes(5));
            }
        }
    }

    #[test]
    fn test_custom_count() {
        let config = SensorConfig { reading_count: 3, ..SensorConfig::default() };
        let mut rng = StdRng::seed_from_u64(7);
        let dataset = SensorGenerator::new(config).generate_with(&mut rng, base_time());

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.readings[0].timestamp, base_time() - Duration::minutes(10));
    }

    #[test]
    fn test_zero_count_is_empty() {
        let config = SensorConfig { reading_count: 0, ..SensorConfig::default() };
        let mut rng = StdRng::seed_from_u64(1);
        let dataset = SensorGenerator::new(config).generate_with(&mut rng, base_time());

        assert!(dataset.is_empty());
        assert!(dataset.latest().is_none());
        assert!(dataset.window(ViewPeriod::Last24Hours).is_empty());
        assert!(dataset.summary(ViewPeriod::Last24Hours).is_none());
    }

    #[test]
    fn test_values_within_ranges() {
        let config = SensorConfig { reading_count: 500, ..SensorConfig::default() };
        let mut rng = StdRng::seed_from_u64(42);
        let dataset = SensorGenerator::new(config).generate_with(&mut rng, base_time());

        for r in &dataset.readings {
            assert!((30.0..=85.0).contains(&r.humidity_pct), "humidity {}", r.humidity_pct);
            assert!((5.5..=7.5).contains(&r.ph), "ph {}", r.ph);
            assert_eq!(r.pump_on, r.humidity_pct < 50.0);
        }

        // 500 fair coin flips land on both sides
        assert!(dataset.readings.iter().any(|r| r.phosphorus_present));
        assert!(dataset.readings.iter().any(|r| !r.phosphorus_present));
        assert!(dataset.readings.iter().any(|r| r.potassium_present));
        assert!(dataset.readings.iter().any(|r| !r.potassium_present));
    }

    #[test]
    fn test_same_seed_same_data() {
        let generator = SensorGenerator::new(SensorConfig::default());
        let a = generator.generate_with(&mut StdRng::seed_from_u64(9), base_time());
        let b = generator.generate_with(&mut StdRng::seed_from_u64(9), base_time());
        assert_eq!(a.readings, b.readings);
    }

    #[test]
    fn test_pump_threshold_is_strict() {
        assert!(pump_should_run(49.99, 50.0));
        assert!(!pump_should_run(50.0, 50.0));
        assert!(!pump_should_run(72.0, 50.0));
    }

    #[test]
    fn test_window_periods() {
        let mut rng = StdRng::seed_from_u64(3);
        let dataset = SensorGenerator::new(SensorConfig::default()).generate_with(&mut rng, base_time());

        // 0, 5, ..., 60 minutes back
        assert_eq!(dataset.window(ViewPeriod::LastHour).len(), 13);
        assert_eq!(dataset.window(ViewPeriod::Last6Hours).len(), 20);
        assert_eq!(dataset.window(ViewPeriod::Last24Hours).len(), 20);
        assert_eq!(dataset.window(ViewPeriod::LastHour).last(), dataset.latest());
    }

    #[test]
    fn test_summary() {
        let readings = vec![
            reading(10, 40.0, 6.0),
            reading(5, 60.0, 7.0),
            reading(0, 80.0, 6.5),
        ];
        let summary = summarize(&readings).unwrap();

        assert_eq!(summary.count, 3);
        assert_relative_eq!(summary.humidity_min, 40.0);
        assert_relative_eq!(summary.humidity_max, 80.0);
        assert_relative_eq!(summary.humidity_mean, 60.0);
        assert_relative_eq!(summary.ph_min, 6.0);
        assert_relative_eq!(summary.ph_max, 7.0);
        assert_relative_eq!(summary.ph_mean, 6.5);
        assert_eq!(summary.pump_on_count, 1);
    }
}

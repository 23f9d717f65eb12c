mod dashboard_tests;
mod sensor_tests;

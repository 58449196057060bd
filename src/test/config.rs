use crate::city::{CityConfig, DEFAULT_QUANTUM};
use crate::error::ConfigError;
use crate::queue::DEFAULT_CAPACITY;

#[test]
fn defaults_match_policy_constants() {
    let cfg = CityConfig::default();
    assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
    assert_eq!(cfg.capacity, 2000);
    assert_eq!(cfg.quantum, DEFAULT_QUANTUM);
    assert_eq!(cfg.quantum, 5);
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_json_fills_missing_fields_with_defaults() {
    let cfg: CityConfig = serde_json::from_str(r#"{ "quantum": 3 }"#).expect("parse config");
    assert_eq!(cfg.quantum, 3);
    assert_eq!(cfg.capacity, DEFAULT_CAPACITY);

    let cfg: CityConfig = serde_json::from_str("{}").expect("parse config");
    assert_eq!(cfg, CityConfig::default());
}

#[test]
fn config_json_rejects_unknown_fields() {
    assert!(serde_json::from_str::<CityConfig>(r#"{ "quantom": 3 }"#).is_err());
}

#[test]
fn validate_rejects_zero_values() {
    let cfg = CityConfig {
        capacity: 0,
        ..CityConfig::default()
    };
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroCapacity));

    let cfg = CityConfig {
        quantum: 0,
        ..CityConfig::default()
    };
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroQuantum));
}

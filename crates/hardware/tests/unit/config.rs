//! Configuration Tests.
//!
//! Verifies built-in defaults and JSON deserialization with partial input.

use pretty_assertions::assert_eq;

use uarch_core::common::{DEFAULT_ASSOCIATIVITY, DEFAULT_IPV, INST_SHIFT_AMT};
use uarch_core::config::{Config, GSelectConfig, IpvConfig};

fn parse(json: &str) -> Config {
    match serde_json::from_str(json) {
        Ok(config) => config,
        Err(e) => panic!("config did not parse: {e}"),
    }
}

#[test]
fn defaults_match_documented_values() {
    let config = Config::default();
    assert_eq!(
        config.predictor,
        GSelectConfig {
            table_size: 2048,
            counter_bits: 2,
            history_bits: 8,
            threads: 1,
            inst_shift_amt: INST_SHIFT_AMT,
            initial_counter: None,
        }
    );
    assert_eq!(config.replacement.associativity, DEFAULT_ASSOCIATIVITY);
    assert_eq!(config.replacement.ipv, DEFAULT_IPV.to_vec());
}

/// The default IPV inserts at rank 13 and has one entry per way plus insertion.
#[test]
fn default_ipv_shape() {
    assert_eq!(DEFAULT_IPV.len(), DEFAULT_ASSOCIATIVITY + 1);
    assert_eq!(DEFAULT_IPV[DEFAULT_ASSOCIATIVITY], 13);
    assert!(DEFAULT_IPV.iter().all(|&r| (r as usize) < DEFAULT_ASSOCIATIVITY));
}

#[test]
fn empty_object_yields_defaults() {
    let config = parse("{}");
    assert_eq!(config.predictor, GSelectConfig::default());
    assert_eq!(config.replacement, IpvConfig::default());
}

#[test]
fn partial_sections_fill_remaining_fields() {
    let config = parse(
        r#"{
            "predictor": { "history_bits": 4, "threads": 2, "initial_counter": 3 },
            "replacement": { "associativity": 4, "ipv": [0, 0, 1, 2, 3] }
        }"#,
    );

    assert_eq!(config.predictor.history_bits, 4);
    assert_eq!(config.predictor.threads, 2);
    assert_eq!(config.predictor.initial_counter, Some(3));
    assert_eq!(config.predictor.table_size, 2048);
    assert_eq!(config.predictor.counter_bits, 2);

    assert_eq!(
        config.replacement,
        IpvConfig {
            associativity: 4,
            ipv: vec![0, 0, 1, 2, 3],
        }
    );
}

/// Parsing does not validate; a bad table size is caught at construction.
#[test]
fn parse_accepts_values_rejected_later() {
    let config = parse(r#"{ "predictor": { "table_size": 1000 } }"#);
    assert_eq!(config.predictor.table_size, 1000);
    assert!(uarch_core::GSelectPredictor::new(&config.predictor).is_err());
}

#[test]
fn wrong_field_type_is_an_error() {
    let result: Result<Config, _> = serde_json::from_str(r#"{ "predictor": { "table_size": "big" } }"#);
    assert!(result.is_err());
}

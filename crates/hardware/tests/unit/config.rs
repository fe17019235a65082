//! # Configuration Tests
//!
//! Defaults, geometry validation and JSON deserialization of the cache and
//! simulator configuration.

use hwcache_core::common::ConfigError;
use hwcache_core::config::{CacheConfig, SimConfig};
use rstest::rstest;

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.lines, 64);
    assert_eq!(config.line_bytes, 16);
    assert_eq!(config.ways, 4);
    assert_eq!(config.backing_size, 64 * 1024);
    assert_eq!(config.irq_vector, 0);
    assert_eq!(config.hit_cycles, 0);
    assert_eq!(config.miss_cycles, 3);
    assert_eq!(config.writethrough_cycles, 5);
    assert_eq!(config.writeback_cycles, 5);
    assert_eq!(config.clear_time_writethrough_ns, 1_500_000);
    assert_eq!(config.clear_time_writeback_ns, 8_500_000);
}

#[test]
fn test_sim_config_defaults() {
    let config = SimConfig::default();
    assert_eq!(config.cache, CacheConfig::default());
    assert_eq!(config.cpu_period_ns, 250);
    assert!(config.with_irq);
}

#[test]
fn test_default_geometry() {
    let geometry = CacheConfig::default()
        .validate()
        .expect("defaults must validate");
    assert_eq!(geometry.sets, 16);
    assert_eq!(geometry.offset_bits, 4);
    assert_eq!(geometry.sets * geometry.ways, geometry.lines);
}

#[rstest]
#[case::direct_mapped(8, 4, 1, 8, 2)]
#[case::two_way(8, 4, 2, 4, 2)]
#[case::fully_associative(8, 4, 8, 1, 2)]
#[case::single_byte_lines(16, 1, 4, 4, 0)]
#[case::single_line(1, 64, 1, 1, 6)]
fn test_valid_geometry(
    #[case] lines: usize,
    #[case] line_bytes: usize,
    #[case] ways: usize,
    #[case] sets: usize,
    #[case] offset_bits: u32,
) {
    let geometry = CacheConfig::with_geometry(lines, line_bytes, ways)
        .validate()
        .expect("geometry must validate");
    assert_eq!(geometry.lines, lines);
    assert_eq!(geometry.line_bytes, line_bytes);
    assert_eq!(geometry.ways, ways);
    assert_eq!(geometry.sets, sets);
    assert_eq!(geometry.offset_bits, offset_bits);
}

#[rstest]
#[case::line_size_not_pow2(8, 12, 2, ConfigError::LineSizeNotPowerOfTwo(12))]
#[case::line_size_zero(8, 0, 2, ConfigError::LineSizeNotPowerOfTwo(0))]
#[case::line_count_not_pow2(12, 4, 2, ConfigError::LineCountNotPowerOfTwo(12))]
#[case::line_count_zero(0, 4, 1, ConfigError::LineCountNotPowerOfTwo(0))]
#[case::zero_ways(8, 4, 0, ConfigError::ZeroWays)]
#[case::ways_exceed_lines(8, 4, 16, ConfigError::WaysDoNotDivideLines { lines: 8, ways: 16 })]
#[case::ways_not_divisor(8, 4, 3, ConfigError::WaysDoNotDivideLines { lines: 8, ways: 3 })]
fn test_invalid_geometry(
    #[case] lines: usize,
    #[case] line_bytes: usize,
    #[case] ways: usize,
    #[case] expected: ConfigError,
) {
    let err = CacheConfig::with_geometry(lines, line_bytes, ways)
        .validate()
        .expect_err("geometry must be rejected");
    assert_eq!(err, expected);
}

#[test]
fn test_line_size_checked_before_line_count() {
    let err = CacheConfig::with_geometry(12, 12, 0)
        .validate()
        .expect_err("geometry must be rejected");
    assert_eq!(err, ConfigError::LineSizeNotPowerOfTwo(12));
}

#[test]
fn test_config_error_messages() {
    assert_eq!(
        ConfigError::LineSizeNotPowerOfTwo(12).to_string(),
        "cache line size 12 is not a power of two"
    );
    assert_eq!(
        ConfigError::WaysDoNotDivideLines { lines: 8, ways: 3 }.to_string(),
        "associativity 3 does not evenly divide 8 lines"
    );
}

#[test]
fn test_cache_config_partial_json() {
    let json = r#"{ "lines": 32, "ways": 8, "irq_vector": 5, "clear_time_writeback_ns": 42 }"#;
    let config: CacheConfig = serde_json::from_str(json).expect("valid JSON");
    assert_eq!(config.lines, 32);
    assert_eq!(config.ways, 8);
    assert_eq!(config.irq_vector, 5);
    assert_eq!(config.clear_time_writeback_ns, 42);
    assert_eq!(config.line_bytes, 16);
    assert_eq!(config.miss_cycles, 3);
    assert_eq!(config.clear_time_writethrough_ns, 1_500_000);
}

#[test]
fn test_sim_config_empty_json_is_default() {
    let config: SimConfig = serde_json::from_str("{}").expect("valid JSON");
    assert_eq!(config, SimConfig::default());
}

#[test]
fn test_sim_config_nested_json() {
    let json = r#"{ "cpu_period_ns": 100, "with_irq": false, "cache": { "line_bytes": 32 } }"#;
    let config: SimConfig = serde_json::from_str(json).expect("valid JSON");
    assert_eq!(config.cpu_period_ns, 100);
    assert!(!config.with_irq);
    assert_eq!(config.cache.line_bytes, 32);
    assert_eq!(config.cache.lines, 64);
}

#[test]
fn test_config_rejects_wrong_types() {
    let result: Result<CacheConfig, _> = serde_json::from_str(r#"{ "lines": "many" }"#);
    assert!(result.is_err());
}

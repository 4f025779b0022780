//! # Configuration Tests
//!
//! Defaults, JSON deserialization with missing fields, boot source aliases
//! and file loading.

use std::io::Write;

use pretty_assertions::assert_eq;
use rvmini_core::common::SimError;
use rvmini_core::config::*;
use tempfile::NamedTempFile;

#[test]
fn config_default() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_cycles, 10_000_000);
    assert_eq!(config.memory.ram_words, 1024);
    assert_eq!(config.boot.source, BootSource::Rom);
    assert_eq!(config.boot.flash_offset, 0x0020_0000);
}

#[test]
fn empty_json_matches_default() {
    assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json_str(r#"{ "memory": {}, "general": { "trace_instructions": true } }"#)
        .unwrap();
    assert!(config.general.trace_instructions);
    assert_eq!(config.general.max_cycles, 10_000_000);
    assert_eq!(config.memory.ram_words, 1024);
}

#[test]
fn full_document() {
    let json = r#"{
        "general": { "trace_instructions": false, "max_cycles": 5000 },
        "memory": { "ram_words": 256 },
        "boot": { "source": "Flash", "flash_offset": 1048576 }
    }"#;
    let config = Config::from_json_str(json).unwrap();
    assert_eq!(config.general.max_cycles, 5000);
    assert_eq!(config.memory.ram_words, 256);
    assert_eq!(config.boot.source, BootSource::Flash);
    assert_eq!(config.boot.flash_offset, 0x0010_0000);
}

#[test]
fn boot_source_aliases() {
    for name in ["Flash", "Spi", "SPI"] {
        let json = format!(r#"{{ "boot": {{ "source": "{name}" }} }}"#);
        assert_eq!(Config::from_json_str(&json).unwrap().boot.source, BootSource::Flash);
    }
    let config = Config::from_json_str(r#"{ "boot": { "source": "Rom" } }"#).unwrap();
    assert_eq!(config.boot.source, BootSource::Rom);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        Config::from_json_str(r#"{ "memory": { "ram_words": "lots" } }"#),
        Err(SimError::Config(_))
    ));
    assert!(matches!(
        Config::from_json_str(r#"{ "boot": { "source": "Tape" } }"#),
        Err(SimError::Config(_))
    ));
}

#[test]
fn from_file_reads_json() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "memory": { "ram_words": 64 } }"#).unwrap();
    file.flush().unwrap();
    assert_eq!(Config::from_file(file.path()).unwrap().memory.ram_words, 64);
}

#[test]
fn from_file_missing_is_io_error() {
    assert!(matches!(
        Config::from_file("/nonexistent/rvmini.json"),
        Err(SimError::Io { .. })
    ));
}

use std::fs;

use hufftext::{Config, Error, TableFormat, commands, persist};

fn config_in(dir: &tempfile::TempDir, text: &str, format: TableFormat) -> Config {
    let input = dir.path().join("input.txt");
    fs::write(&input, text).unwrap();
    Config::new(
        Some(input),
        Some(dir.path().join("encoded.bin")),
        None,
        Some(dir.path().join("decoded.txt")),
        format,
    )
}

#[test]
fn aaabbc_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "aaabbc", TableFormat::Json);

    commands::encode_file(&config).unwrap();
    assert_eq!(fs::read(&config.data).unwrap(), vec![0x1F, 0x00]);

    let artifact = persist::load(&config.artifact_paths()).unwrap();
    assert_eq!(artifact.payload.bit_length, 9);
    assert_eq!(artifact.table.len(), 3);

    assert_eq!(commands::decode_file(&config).unwrap(), "aaabbc");
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "aaabbc");
}

#[test]
fn single_symbol_and_empty_inputs() {
    for text in ["aaaa", ""] {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, text, TableFormat::Bincode);
        commands::roundtrip_file(&config).unwrap();
        assert_eq!(fs::read_to_string(&config.output).unwrap(), text);
    }
}

#[test]
fn unicode_text_round_trips() {
    let text = "naïve café, 東京 🚀🚀\r\n\ttabs";
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, text, TableFormat::Json);
    let stats = commands::roundtrip_file(&config).unwrap();
    assert_eq!(stats.original_bytes, text.len());
}

#[test]
fn table_format_must_match_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "hello world", TableFormat::Bincode);
    commands::encode_file(&config).unwrap();

    let mut wrong = config.clone();
    wrong.table_format = TableFormat::Json;
    let err = commands::decode_file(&wrong).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn tampered_table_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "aaabbc", TableFormat::Json);
    commands::encode_file(&config).unwrap();

    // give b the same code as c
    let record = fs::read_to_string(&config.table).unwrap();
    fs::write(&config.table, record.replace("\"11\"", "\"10\"")).unwrap();

    let err = commands::decode_file(&config).unwrap_err();
    assert!(matches!(err, Error::CorruptTable(_)));
    assert!(!config.output.exists());
}

#[test]
fn missing_artifact_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "abc", TableFormat::Json);
    let err = commands::decode_file(&config).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn blocked_data_path_leaves_no_orphan_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, "aaabbc", TableFormat::Json);
    fs::create_dir(&config.data).unwrap();

    let err = commands::encode_file(&config).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(!config.table.exists());
    assert!(config.data.is_dir());
}

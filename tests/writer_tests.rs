mod common;

use common::{RecordValues, UdfBuilder};
use std::fs;
use udf_parser::{CsvWriter, LabelTable, UdfReaderBuilder};

const LABELINFO: &str = r#"{
    "labelInfoHeader": {"seedPowerOnOff": "seed-9"},
    "labelInformation": [
        {"labelTag": 55, "labelName": "Purge", "labelDescription": "Chamber purge"}
    ]
}"#;

#[test]
fn test_write_csv_round_trip() {
    let data = UdfBuilder::new()
        .record(RecordValues {
            time_ns: 1_000_000_000,
            temperature: 23.5,
            label_tag: 55,
            sensor_index: 1,
            ..RecordValues::default()
        })
        .record(RecordValues {
            time_ns: 2_000_000_000,
            temperature: 24.0,
            sensor_index: 1,
            ..RecordValues::default()
        })
        .build();

    let records = UdfReaderBuilder::new()
        .labels(LabelTable::from_json(LABELINFO).unwrap())
        .from_bytes(data)
        .unwrap()
        .read_all()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("session.csv");
    let stats = CsvWriter::new(&out).write_with_stats(&records).unwrap();
    assert_eq!(stats.num_records, 2);

    let contents = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);

    assert!(lines[0].starts_with("Sensor Index,Sensor ID,Time Since PowerOn,Real time clock"));
    assert!(lines[0].ends_with("Label Name,Label Description,Power-On Seed"));

    // First record: labeled, ms timestamp, constant scanning-mode column.
    let first: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(first[0], "1");
    assert_eq!(first[2], "1000");
    assert_eq!(first[4], "23.5");
    assert_eq!(first[9], "true");
    assert_eq!(first[11], "55");
    assert_eq!(first[13], "Purge");
    assert_eq!(first[14], "Chamber purge");
    assert_eq!(first[15], "seed-9");

    // Second record: unlabeled cells are empty, seed still present.
    let second: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(second[2], "2000");
    assert_eq!(second[13], "");
    assert_eq!(second[15], "seed-9");
}

#[test]
fn test_write_empty_records_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.csv");
    assert!(CsvWriter::new(&out).write(&[]).is_err());
}

#[test]
fn test_write_creates_parent_directories() {
    let data = UdfBuilder::new().record(RecordValues::default()).build();
    let records = udf_parser::UdfReader::from_bytes(data)
        .unwrap()
        .read_all()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("deep").join("session.csv");
    CsvWriter::new(&out).write(&records).unwrap();
    assert!(out.exists());
}

use qc_config::{ColumnAliases, RunFilter};
use qc_ingest::*;

const EXPORT: &str = "\
serial_num,param_name,desc,comparator,param_value_float,lower,upper,pon.test_id,pon.result,test_start_time
SN001,VDD,Supply voltage,GELE,3.31,3.2,3.4,run-1,pass,2024-03-01T08:00:00
SN001,VDD,Supply voltage,GELE,3.29,3.2,3.4,run-2,pass,2024-03-02T08:00:00
SN001,VDD,Supply voltage,GELE,3.35,3.2,3.4,run-3,fail,2024-03-03T08:00:00
SN001,VDD,Supply voltage,GELE,3.30,3.2,3.4,run-4,pass,2024-03-04T08:00:00
SN002,VDD,Supply voltage,GELE,,3.2,3.4,run-5,pass,2024-03-01T09:00:00
SN002,FW,Firmware string,EQ,1.2.3,0,0,run-5,pass,2024-03-01T09:00:00
";

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn reads_aliased_export_without_filter() {
    let path = write_temp("qc_ingest_export_all.csv", EXPORT);
    let ingested = read_csv_path(&path, &ColumnAliases::default(), &RunFilter::default()).unwrap();

    assert_eq!(ingested.records.len(), 6);
    assert_eq!(ingested.records[0].serial_name, "SN001");
    assert_eq!(ingested.records[0].parameter_name, "VDD");
    assert_eq!(ingested.records[0].value, 3.31);
    assert_eq!(ingested.stats.non_numeric_values, 2);
}

#[test]
fn filters_to_latest_passing_gele_runs() {
    let path = write_temp("qc_ingest_export_filtered.csv", EXPORT);
    let filter = RunFilter {
        passing_only: true,
        max_runs_per_serial: Some(2),
        comparator: Some("GELE".to_string()),
    };
    let ingested = read_csv_path(&path, &ColumnAliases::default(), &filter).unwrap();

    let values: Vec<_> = ingested
        .records
        .iter()
        .map(|r| (r.serial_name.as_str(), r.value))
        .collect();
    // SN001 keeps run-2 and run-4 (run-3 failed); SN002 keeps its only GELE row.
    assert_eq!(values.len(), 3);
    assert_eq!(values[0], ("SN001", 3.29));
    assert_eq!(values[1], ("SN001", 3.30));
    assert_eq!(values[2].0, "SN002");
    assert_eq!(ingested.stats.rows_filtered, 3);
}

#[test]
fn missing_file_is_an_open_error() {
    let path = std::env::temp_dir().join("qc_ingest_does_not_exist.csv");
    let _ = std::fs::remove_file(&path);
    let err = read_csv_path(&path, &ColumnAliases::default(), &RunFilter::default()).unwrap_err();
    assert!(matches!(err, IngestError::Open { .. }));
}

#[test]
fn custom_alias_table() {
    let mut aliases = ColumnAliases::default();
    aliases.value.push("measurement".to_string());
    let path = write_temp(
        "qc_ingest_custom_alias.csv",
        "serial_name,parameter_name,description,measurement,lower_limit,upper_limit\nA,p,d,4,0,10\n",
    );
    let ingested = read_csv_path(&path, &aliases, &RunFilter::default()).unwrap();
    assert_eq!(ingested.records[0].value, 4.0);
}

#[test]
fn serial_summary_counts_kept_test_runs() {
    let path = write_temp("qc_ingest_export_serials.csv", EXPORT);
    let all = read_csv_path(&path, &ColumnAliases::default(), &RunFilter::default()).unwrap();
    let counts: Vec<_> = all
        .serials
        .iter()
        .map(|s| (s.serial_name.as_str(), s.total_tests, s.passing_tests))
        .collect();
    assert_eq!(counts, vec![("SN001", 4, 3), ("SN002", 1, 1)]);

    let filter = RunFilter {
        passing_only: true,
        max_runs_per_serial: Some(2),
        comparator: Some("GELE".to_string()),
    };
    let kept = read_csv_path(&path, &ColumnAliases::default(), &filter).unwrap();
    let counts: Vec<_> = kept
        .serials
        .iter()
        .map(|s| (s.serial_name.as_str(), s.total_tests, s.passing_tests))
        .collect();
    assert_eq!(counts, vec![("SN001", 2, 2), ("SN002", 1, 1)]);
}

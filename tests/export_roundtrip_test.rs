use chrono::NaiveDate;
use nci::data::{parse_complaints, ComplaintRecord, ComplaintTable, DataSource, FileSource};
use nci::export::{export_csv, export_file_name};
use nci::filter::filter;
use std::io::Write;

fn table() -> ComplaintTable {
    let day = |d| NaiveDate::from_ymd_opt(2024, 7, d).unwrap();
    ComplaintTable::new(vec![
        ComplaintRecord::new("10001", "Noise - Street/Sidewalk", Some("MANHATTAN"), day(1)),
        ComplaintRecord::new("10001", "Blocked Driveway, Partial", None, day(2)),
        ComplaintRecord::new("10002", "Heat", Some("MANHATTAN"), day(3)),
        ComplaintRecord::new("10001", "Quote \"Test\"", Some("MANHATTAN"), day(9)),
    ])
}

#[test]
fn test_export_reparses_to_same_records() {
    let table = table();
    let view = filter(&table, "10001");

    let text = export_csv(&view).unwrap();
    let reparsed = parse_complaints(text.as_bytes()).unwrap();

    let original: Vec<ComplaintRecord> = view.iter().cloned().collect();
    assert_eq!(reparsed, original);
}

#[tokio::test]
async fn test_export_file_loads_through_file_source() {
    let table = table();
    let view = filter(&table, "10001");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(export_file_name(view.key()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(export_csv(&view).unwrap().as_bytes()).unwrap();
    drop(file);

    assert!(path.ends_with("complaints_10001.csv"));
    let loaded = FileSource::new(&path).load().await.unwrap();
    assert_eq!(loaded.len(), 3);
    assert!(loaded.iter().all(|r| r.zip == "10001"));
}

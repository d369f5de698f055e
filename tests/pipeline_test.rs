use std::fs;
use std::path::Path;

use tempfile::TempDir;

use asset_consolidator::config::{Config, EmailSettings, FileSettings};
use asset_consolidator::notify::{NotifyEvent, RecordingNotifier};
use asset_consolidator::pipeline::{run_network, run_single, PipelineContext};
use asset_consolidator::reader::{read_csv_rows, read_xlsx_rows, SheetRef};
use asset_consolidator::run_log::RunLog;
use asset_consolidator::schema::Record;
use asset_consolidator::sink::{write_table, OutputFormat};
use asset_consolidator::pipeline::run_printers;
use asset_consolidator::sources::{END_USER_DEVICES, MOBILE_DEVICES, SERVERS, TERMINALS};

struct Fixture {
    _root: TempDir,
    config: Config,
    run_log: RunLog,
    notifier: RecordingNotifier,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let in_path = root.path().join("in");
        let out_path = root.path().join("out");
        let archive_path = root.path().join("archive");
        fs::create_dir_all(&in_path).unwrap();
        fs::create_dir_all(&out_path).unwrap();

        let config = Config {
            files: FileSettings {
                in_path: in_path.to_string_lossy().to_string(),
                out_path: out_path.to_string_lossy().to_string(),
                archive_path: archive_path.to_string_lossy().to_string(),
                ..FileSettings::default()
            },
            email: EmailSettings::default(),
        };
        let run_log = RunLog::new(root.path().join("logs"));

        Self {
            _root: root,
            config,
            run_log,
            notifier: RecordingNotifier::default(),
        }
    }

    fn ctx(&self) -> PipelineContext<'_> {
        PipelineContext {
            config: &self.config,
            run_log: &self.run_log,
            notifier: &self.notifier,
        }
    }

    fn in_path(&self) -> &Path {
        Path::new(&self.config.files.in_path)
    }

    fn out_path(&self) -> &Path {
        Path::new(&self.config.files.out_path)
    }

    fn archive_path(&self) -> &Path {
        Path::new(&self.config.files.archive_path)
    }
}

/// A row with `width` columns, empty except for the given (index, value) pairs.
fn sparse_row(width: usize, cells: &[(usize, &str)]) -> Vec<String> {
    let mut row = vec![String::new(); width];
    for (i, value) in cells {
        row[*i] = value.to_string();
    }
    row
}

fn sparse_record(width: usize, cells: &[(usize, &str)]) -> Record {
    Record {
        values: sparse_row(width, cells),
    }
}

fn write_csv_lines(path: &Path, rows: &[Vec<String>]) {
    let lines: Vec<String> = rows.iter().map(|r| r.join(",")).collect();
    fs::write(path, lines.join("\n")).unwrap();
}

#[test]
fn server_pipeline_normalizes_dedups_and_archives() {
    let fixture = Fixture::new();
    let rows = vec![
        sparse_row(17, &[(2, "WEB1"), (3, "S1")]),
        sparse_row(17, &[(2, "Z-VRA-WEB1"), (3, "S2")]),
        sparse_row(17, &[(2, "web2.corp.local"), (3, "S3")]),
        sparse_row(17, &[(2, "WEB1"), (3, "S4")]),
    ];
    write_csv_lines(&fixture.in_path().join("TaniumServers.csv"), &rows);

    let report = run_single(&fixture.ctx(), &SERVERS, "TaniumServers.csv", "servers.csv").unwrap();
    assert_eq!(report.rows_read, 4);
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.duplicates_removed(), 2);

    let output = read_csv_rows(&fixture.out_path().join("servers.csv"), false).unwrap();
    assert_eq!(output.rows.len(), 3);
    assert_eq!(output.rows[0][2], "Computer Name");
    // First full-list match wins, so WEB1 keeps the serial from the very
    // first row even though dedup skipped it when computing distinct keys.
    assert_eq!(output.rows[1][2], "WEB1");
    assert_eq!(output.rows[1][3], "S1");
    assert_eq!(output.rows[2][2], "web2");
    assert_eq!(output.rows[2][3], "S3");

    let archived: Vec<String> = fs::read_dir(fixture.archive_path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(archived.len(), 1);
    assert!(archived[0].starts_with("TaniumServers_"));
    assert!(archived[0].ends_with(".csv"));

    let events = fixture.notifier.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        NotifyEvent::Success { process, rows_read: 4, duplicates_removed: 2, .. }
            if process == "Servers"
    ));
}

#[test]
fn short_rows_count_toward_rows_read_but_never_map() {
    let fixture = Fixture::new();
    let rows = vec![
        sparse_row(17, &[(2, "WEB1")]),
        sparse_row(3, &[(0, "too"), (1, "short")]),
        sparse_row(17, &[(2, "WEB1")]),
    ];
    write_csv_lines(&fixture.in_path().join("TaniumServers.csv"), &rows);

    let report = run_single(&fixture.ctx(), &SERVERS, "TaniumServers.csv", "servers.csv").unwrap();
    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_written, 1);
    assert_eq!(report.duplicates_removed(), 2);
}

#[test]
fn wrong_extension_fails_before_touching_the_file() {
    let fixture = Fixture::new();
    fs::write(fixture.in_path().join("TaniumServers.xlsx"), b"not a workbook").unwrap();

    let err = run_single(&fixture.ctx(), &SERVERS, "TaniumServers.xlsx", "servers.csv");
    assert!(err.is_err());
    // Nothing archived and no output produced.
    assert!(!fixture.archive_path().exists());
    assert!(!fixture.out_path().join("servers.csv").exists());
}

#[test]
fn eud_pipeline_skips_first_raw_record_and_normalizes_names() {
    let fixture = Fixture::new();
    let rows = vec![
        sparse_row(18, &[(3, "Computer Name"), (4, "Serial Number")]),
        sparse_row(18, &[(3, "Z-VRA-PC1.corp.local"), (4, "S1"), (9, "Latitude")]),
        sparse_row(18, &[(3, "PC1"), (4, "S1")]),
    ];
    write_csv_lines(&fixture.in_path().join("TaniumEUD.csv"), &rows);

    let report = run_single(&fixture.ctx(), &END_USER_DEVICES, "TaniumEUD.csv", "eud.xlsx").unwrap();
    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_written, 1);
    assert_eq!(report.duplicates_removed(), 2);

    let output = read_xlsx_rows(
        &fixture.out_path().join("eud.xlsx"),
        SheetRef::Named("Tanium_EUD"),
        0,
    )
    .unwrap();
    assert_eq!(output.rows.len(), 2);
    // The first raw record never enters the distinct keys; S1 keeps the
    // first matching row's fields, computer name normalized.
    assert_eq!(output.rows[1][3], "PC1");
    assert_eq!(output.rows[1][4], "S1");
    assert_eq!(output.rows[1][9], "Latitude");
}

#[test]
fn mobile_pipeline_dedups_over_the_full_list_including_the_header_record() {
    let fixture = Fixture::new();
    let rows = vec![
        sparse_row(53, &[(0, "Device ID"), (8, "Serial number")]),
        sparse_row(53, &[(0, "D1"), (8, "M1"), (10, "iPhone 15")]),
        sparse_row(53, &[(0, "D2"), (8, "M1")]),
    ];
    write_csv_lines(&fixture.in_path().join("IntuneDevices.csv"), &rows);

    let report =
        run_single(&fixture.ctx(), &MOBILE_DEVICES, "IntuneDevices.csv", "mobile.xlsx").unwrap();
    assert_eq!(report.rows_read, 3);
    // No first-record skip here, so the CSV header line maps to a record of
    // its own and survives dedup alongside the real device.
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.duplicates_removed(), 1);

    let output = read_xlsx_rows(
        &fixture.out_path().join("mobile.xlsx"),
        SheetRef::Named("iOS"),
        0,
    )
    .unwrap();
    assert_eq!(output.rows.len(), 3);
    assert_eq!(output.rows[1][8], "Serial number");
    assert_eq!(output.rows[2][8], "M1");
    assert_eq!(output.rows[2][10], "iPhone 15");
}

const WIDE_TITLES: [&str; 17] = [
    "C0", "C1", "C2", "C3", "C4", "C5", "C6", "C7", "C8", "C9", "C10", "C11", "C12", "C13",
    "C14", "C15", "C16",
];

#[test]
fn terminal_pipeline_excludes_sentinel_serials() {
    let fixture = Fixture::new();
    let records = vec![
        sparse_record(17, &[(0, "TERM-A"), (1, "T100"), (10, "UTC")]),
        sparse_record(17, &[(0, "TERM-B"), (1, "N/A")]),
        sparse_record(17, &[(0, "TERM-C"), (1, "T100")]),
    ];
    write_table(
        &OutputFormat::Xlsx { sheet: "Export" },
        &fixture.in_path().join("Terminals.xlsx"),
        &WIDE_TITLES,
        &records,
    )
    .unwrap();

    let report = run_single(&fixture.ctx(), &TERMINALS, "Terminals.xlsx", "terminals.xlsx").unwrap();
    // The header row counts toward rows read.
    assert_eq!(report.rows_read, 4);
    assert_eq!(report.rows_written, 1);

    let output = read_xlsx_rows(
        &fixture.out_path().join("terminals.xlsx"),
        SheetRef::Named("Terminals"),
        0,
    )
    .unwrap();
    assert_eq!(output.rows.len(), 2);
    assert!(output.rows[0].contains(&"OimeZone".to_string()));
    assert_eq!(output.rows[1][0], "TERM-A");
    assert_eq!(output.rows[1][3], "T100");
    assert_eq!(output.rows[1][5], "UTC");
}

const NETWORK_TITLES: [&str; 12] = [
    "C0", "C1", "C2", "C3", "C4", "C5", "C6", "C7", "C8", "C9", "C10", "C11",
];

#[test]
fn network_pipeline_merges_regions_in_order() {
    let fixture = Fixture::new();

    // NA workbook: two rows for the same host once the domain is stripped.
    let na_records = vec![
        sparse_record(12, &[(0, "na1.corp.local"), (1, "10.0.0.1"), (2, "SN-A")]),
        sparse_record(12, &[(0, "na1"), (1, "10.0.0.2"), (2, "SN-B")]),
    ];
    write_table(
        &OutputFormat::Xlsx { sheet: "Export" },
        &fixture.in_path().join("Network_NA.xlsx"),
        &NETWORK_TITLES,
        &na_records,
    )
    .unwrap();

    // Asia CSV with a header line, including a host already present in NA.
    let asia_rows = vec![
        NETWORK_TITLES.iter().map(|t| t.to_string()).collect(),
        sparse_row(12, &[(0, "as1"), (3, "ip"), (7, "SN-C"), (10, "M1"), (11, "JP")]),
        sparse_row(12, &[(0, "na1"), (3, "ip"), (7, "SN-D"), (10, "M2"), (11, "CN")]),
    ];
    write_csv_lines(&fixture.in_path().join("Network_Asia.csv"), &asia_rows);

    let report = run_network(
        &fixture.ctx(),
        "Network_NA.xlsx",
        "Network_Asia.csv",
        "network.xlsx",
    )
    .unwrap();
    // 3 workbook rows (header included) plus 2 Asia data rows.
    assert_eq!(report.rows_read, 5);
    assert_eq!(report.rows_written, 3);

    let output = read_xlsx_rows(
        &fixture.out_path().join("network.xlsx"),
        SheetRef::Named("Network"),
        0,
    )
    .unwrap();
    assert_eq!(output.rows.len(), 4);
    // NA rows come first, then Asia; the shared host appears once per region.
    assert_eq!(output.rows[1][0], "North America");
    assert_eq!(output.rows[1][1], "na1");
    assert_eq!(output.rows[2][0], "Asia");
    assert_eq!(output.rows[2][1], "as1");
    assert_eq!(output.rows[3][0], "Asia");
    assert_eq!(output.rows[3][1], "na1");

    // One summary line per input file.
    let log = fs::read_to_string(fixture.run_log.path()).unwrap();
    assert!(log.contains("Network_NA.xlsx"));
    assert!(log.contains("Network_Asia.csv"));
}

const PRINTER_NA_TITLES: [&str; 22] = [
    "C0", "C1", "C2", "C3", "C4", "C5", "C6", "C7", "C8", "C9", "C10", "C11", "C12", "C13",
    "C14", "C15", "C16", "C17", "C18", "C19", "C20", "C21",
];

#[test]
fn printer_pipeline_consolidates_asia_subdirectories() {
    let fixture = Fixture::new();

    // NA master list with a repeated serial.
    let na_records = vec![
        sparse_record(22, &[(0, "US"), (9, "TAG-1"), (10, "P100"), (13, "LaserJet"), (21, "HQ")]),
        sparse_record(22, &[(0, "US"), (9, "TAG-2"), (10, "P100")]),
    ];
    write_table(
        &OutputFormat::Xlsx { sheet: "MASTER LIST" },
        &fixture.in_path().join("Printers.xlsx"),
        &PRINTER_NA_TITLES,
        &na_records,
    )
    .unwrap();

    let asia_dir = fixture.in_path().join("Asia Printers 2026");
    fs::create_dir_all(&asia_dir).unwrap();

    let china_records = vec![sparse_record(
        5,
        &[(0, "C1"), (2, "ChinaModel"), (3, "Shanghai"), (4, "InUse")],
    )];
    write_table(
        &OutputFormat::Xlsx { sheet: "Export" },
        &asia_dir.join("china_printers.xlsx"),
        &["C0", "C1", "C2", "C3", "C4"],
        &china_records,
    )
    .unwrap();

    // The Japan export carries two header rows, so the first data row below
    // the written title row is also skipped.
    let japan_records = vec![
        sparse_record(11, &[(0, "subtitle row")]),
        sparse_record(11, &[(0, "TAG-J"), (2, "JapanModel"), (3, "J1"), (6, "Owner"), (10, "Tokyo")]),
    ];
    write_table(
        &OutputFormat::Xlsx { sheet: "Export" },
        &asia_dir.join("japan_printers.xlsx"),
        &["C0", "C1", "C2", "C3", "C4", "C5", "C6", "C7", "C8", "C9", "C10"],
        &japan_records,
    )
    .unwrap();

    let report = run_printers(&fixture.ctx(), "Printers.xlsx", "printers.xlsx").unwrap();
    // NA: header + 2 rows; China: header + 1 row; Japan: header + 2 rows.
    assert_eq!(report.rows_read, 8);
    assert_eq!(report.rows_written, 3);

    let output = read_xlsx_rows(
        &fixture.out_path().join("printers.xlsx"),
        SheetRef::Named("Printers"),
        0,
    )
    .unwrap();
    assert_eq!(output.rows.len(), 4);
    // NA first, then the Asia regions in file order.
    assert_eq!(output.rows[1][3], "P100");
    assert_eq!(output.rows[1][2], "TAG-1");
    assert_eq!(output.rows[2][0], "CHI");
    assert_eq!(output.rows[2][3], "C1");
    assert_eq!(output.rows[3][0], "JAP");
    assert_eq!(output.rows[3][3], "J1");
    assert_eq!(output.rows[3][4], "Active");

    let log = fs::read_to_string(fixture.run_log.path()).unwrap();
    assert!(log.contains("Printer Asia Count: 2"));
}

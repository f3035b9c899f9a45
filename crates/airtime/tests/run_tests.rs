//! End-to-end runs over real directory trees.

use std::fs;
use std::path::Path;

use airtime::{run, Config, LogError};
use tempfile::tempdir;

/// Pad logs above the dummy threshold unless a test wants them small.
const PADDING: usize = 6000;

fn write_log(path: &Path, site: &str, start: &str, end: &str, distance: &str, padded: bool) {
    let mut text = format!(
        "AXCT001\nHFDTE150723\nHPSITSITE:{site}\nB{start}4740123N01134567EA0150001600\n"
    );
    if padded {
        for _ in 0..PADDING / 36 {
            text.push_str("B1200004740123N01134567EA0150001600\n");
        }
    }
    text.push_str(&format!("LXSX;Start:x;Dist:{distance};Alt:1600\n"));
    text.push_str(&format!("B{end}4740143N01134587EA0152001620\n"));
    fs::write(path, text).unwrap();
}

fn run_to_string(root: &Path, config: &Config) -> (String, airtime::Result<()>) {
    let mut out = Vec::new();
    let result = run(root, config, &mut out);
    (String::from_utf8(out).unwrap(), result)
}

#[test]
fn test_year_bucket_and_root_bucket() {
    let root = tempdir().unwrap();
    let year = root.path().join("2023");
    fs::create_dir(&year).unwrap();
    write_log(&year.join("a.igc"), "Brauneck", "100000", "130000", "10.5", true);
    write_log(&year.join("b.igc"), "Wank", "120000", "123000", "20.3", true);

    let (output, result) = run_to_string(root.path(), &Config::default());
    result.unwrap();

    let root_name = root.path().file_name().unwrap().to_string_lossy();
    let year_block = "\
======= 2023 =======
Number of flights:\t2
flight time:\t\t3:30:00
average flight time:\t1:45:00
distance:\t\t30.8km
average speed:\t\t10.27km/h
locations:
\t\t\tBrauneck: 1
\t\t\tWank: 1

";
    let root_block = year_block.replace("======= 2023 =======", &format!("======= {root_name} ======="));
    assert_eq!(output, format!("{year_block}{root_block}"));
}

#[test]
fn test_root_without_subdirectories_has_one_report() {
    let root = tempdir().unwrap();
    write_log(&root.path().join("x.igc"), "Tegelberg", "090000", "100000", "5.0", true);

    let (output, result) = run_to_string(root.path(), &Config::default());
    result.unwrap();

    assert_eq!(output.matches("=======").count(), 2);
    assert!(output.contains("Number of flights:\t1\n"));
    assert!(output.contains("distance:\t\t5.0km\n"));
}

#[test]
fn test_root_totals_include_loose_and_nested_logs() {
    let root = tempdir().unwrap();
    let year = root.path().join("2022");
    fs::create_dir_all(year.join("trip")).unwrap();
    write_log(&year.join("trip").join("a.igc"), "Wank", "100000", "110000", "1.0", true);
    write_log(&root.path().join("loose.igc"), "Wank", "100000", "110000", "1.0", true);

    let (output, result) = run_to_string(root.path(), &Config::default());
    result.unwrap();

    let blocks: Vec<&str> = output.split("=======").collect();
    // ["", " 2022 ", body, " <root> ", body]
    assert!(blocks[2].contains("Number of flights:\t1\n"));
    assert!(blocks[4].contains("Number of flights:\t2\n"));
    assert!(blocks[4].contains("\t\t\tWank: 2\n"));
}

#[test]
fn test_empty_bucket_prints_only_count() {
    let root = tempdir().unwrap();
    fs::create_dir(root.path().join("2020")).unwrap();
    fs::write(root.path().join("2020").join("readme.txt"), "no flights").unwrap();

    let (output, result) = run_to_string(root.path(), &Config::default());
    result.unwrap();

    assert!(output.starts_with("======= 2020 =======\nNumber of flights:\t0\n======= "));
    assert!(!output.contains("flight time"));
    assert!(!output.contains("locations"));
}

#[test]
fn test_dummy_logs_reported_after_block() {
    let root = tempdir().unwrap();
    let small = root.path().join("small.igc");
    write_log(&small, "Wank", "100000", "100500", "0.3", false);
    write_log(&root.path().join("big.igc"), "Wank", "100000", "110000", "9.0", true);

    let (output, result) = run_to_string(root.path(), &Config::default());
    result.unwrap();

    let notice = format!("\n\npossible dummy log: {}\n", small.display());
    assert!(output.ends_with(&notice));
    assert_eq!(output.matches("possible dummy log").count(), 1);
}

#[test]
fn test_missing_site_aborts_run() {
    let root = tempdir().unwrap();
    let first = root.path().join("2021");
    let second = root.path().join("2022");
    fs::create_dir(&first).unwrap();
    fs::create_dir(&second).unwrap();
    write_log(&first.join("ok.igc"), "Wank", "100000", "110000", "1.0", true);
    fs::write(second.join("bad.igc"), "B1000004740123N\nLXSX;Dist:1.0\n").unwrap();

    let (output, result) = run_to_string(root.path(), &Config::default());
    let err = result.unwrap_err();

    assert_eq!(err.log_error(), Some(&LogError::MissingSite));
    assert!(err.to_string().contains("bad.igc"));
    // 2021 is fully reported; 2022 only gets its header and count.
    assert!(output.starts_with("======= 2021 ======="));
    assert!(output.ends_with("\n======= 2022 =======\nNumber of flights:\t1\n"));
    assert!(!output.contains("possible dummy log"));
}

#[test]
fn test_include_root_disabled() {
    let root = tempdir().unwrap();
    fs::create_dir(root.path().join("2023")).unwrap();
    write_log(&root.path().join("2023").join("a.igc"), "Wank", "100000", "110000", "1.0", true);

    let mut config = Config::default();
    config.scan.include_root = false;
    let (output, result) = run_to_string(root.path(), &config);
    result.unwrap();

    assert_eq!(output.matches("=======").count(), 2);
    assert!(output.starts_with("======= 2023 ======="));
}

#[test]
fn test_loose_suffix_match() {
    let root = tempdir().unwrap();
    write_log(&root.path().join("flightigc"), "Wank", "100000", "110000", "1.0", true);
    write_log(&root.path().join("flight.IGC"), "Wank", "100000", "110000", "1.0", true);

    let (output, result) = run_to_string(root.path(), &Config::default());
    result.unwrap();

    assert!(output.contains("Number of flights:\t1\n"));
}

#[test]
fn test_missing_root_fails() {
    let root = tempdir().unwrap();
    let missing = root.path().join("nope");

    let (output, result) = run_to_string(&missing, &Config::default());
    assert!(matches!(result, Err(airtime::Error::DirectoryRead { .. })));
    assert!(output.is_empty());
}

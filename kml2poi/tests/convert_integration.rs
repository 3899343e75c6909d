//! Tests d'intégration de bout en bout: KML -> dossiers CSV

use std::fs;
use std::path::{Path, PathBuf};

use kml2poi::{cli::cmd_convert, convert_with_progress, ExportConfig, ExportError};

const DOCKS_KML: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>Pier</name>
      <styleUrl>#dock1</styleUrl>
      <Point><coordinates>-122.4,37.8,0</coordinates></Point>
    </Placemark>
    <Placemark>
      <styleUrl>#dock2</styleUrl>
      <Point><coordinates>-122.5,37.9</coordinates></Point>
    </Placemark>
    <Placemark>
      <name>Harbor Inn</name>
      <description>Rooms &amp; breakfast</description>
      <styleUrl>#hotel</styleUrl>
      <Point><coordinates>-122.41,37.81,3</coordinates></Point>
    </Placemark>
  </Document>
</kml>"##;

struct Workspace {
    _dir: tempfile::TempDir,
    input: PathBuf,
    config: ExportConfig,
}

fn workspace(kml: &str) -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input_waypoints.kml");
    fs::write(&input, kml).unwrap();

    let icon_dir = dir.path().join("bmp");
    fs::create_dir(&icon_dir).unwrap();

    let config = ExportConfig::new(dir.path().join("output"), icon_dir);
    Workspace {
        _dir: dir,
        input,
        config,
    }
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_convert_docks_scenario() {
    let ws = workspace(DOCKS_KML);

    let report = cmd_convert(&ws.input, &ws.config, None).unwrap();

    let dock_csv = ws.config.csv_path("dock");
    assert_eq!(
        fs::read_to_string(&dock_csv).unwrap(),
        "\"-122.4\",\"37.8\",\"Pier\",\"\"\n\"-122.5\",\"37.9\",\"\",\"\"\n"
    );

    let hotel_rows = read_rows(&ws.config.csv_path("hotel"));
    assert_eq!(
        hotel_rows,
        vec![vec!["-122.41", "37.81", "Harbor Inn", "Rooms & breakfast"]]
    );

    assert_eq!(entries(&ws.config.output_dir), vec!["dock", "hotel"]);
    assert_eq!(report.total_waypoints, 3);
    assert_eq!(report.categories_written, 2);
    assert_eq!(report.by_category["dock"].rows_written, 2);
}

#[test]
fn test_convert_copies_icon_when_present() {
    let ws = workspace(DOCKS_KML);
    let icon = [0x42u8, 0x4d, 0x36, 0x00, 0x01];
    fs::write(ws.config.icon_source("dock"), icon).unwrap();

    let report = cmd_convert(&ws.input, &ws.config, None).unwrap();

    assert_eq!(fs::read(ws.config.icon_target("dock")).unwrap(), icon);
    assert_eq!(
        entries(&ws.config.category_dir("dock")),
        vec!["dock.bmp", "dock.csv"]
    );
    // Pas d'icône hotel: seul le CSV est présent
    assert_eq!(entries(&ws.config.category_dir("hotel")), vec!["hotel.csv"]);
    assert_eq!(report.icons_copied, 1);
}

#[test]
fn test_convert_round_trip_row_shape() {
    let mut kml = String::from("<kml><Document>");
    for i in 0..25 {
        kml.push_str(&format!(
            "<Placemark><name>Site {i}</name><styleUrl>#campground{i}</styleUrl>\
             <coordinates>-121.{i:02},35.{i:02},0</coordinates></Placemark>"
        ));
    }
    kml.push_str("</Document></kml>");
    let ws = workspace(&kml);

    cmd_convert(&ws.input, &ws.config, None).unwrap();

    let raw = fs::read_to_string(ws.config.csv_path("campground")).unwrap();
    let rows = read_rows(&ws.config.csv_path("campground"));
    assert_eq!(rows.len(), 25);
    for (i, line) in raw.lines().enumerate() {
        assert_eq!(line.matches('"').count(), 8, "line {}: {}", i, line);
        assert_eq!(rows[i][2], format!("Site {}", i));
    }
}

#[test]
fn test_convert_empty_document_creates_nothing() {
    let ws = workspace("<kml><Document></Document></kml>");

    let report = cmd_convert(&ws.input, &ws.config, None).unwrap();

    assert_eq!(report.total_waypoints, 0);
    assert!(!ws.config.output_dir.exists());
}

#[test]
fn test_convert_invalid_number_writes_nothing() {
    let ws = workspace(
        "<kml><Placemark><styleUrl>#dock</styleUrl><coordinates>1,2</coordinates></Placemark>\
         <Placemark><styleUrl>#fuel</styleUrl><coordinates>east,2</coordinates></Placemark></kml>",
    );

    let err = cmd_convert(&ws.input, &ws.config, None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::InvalidNumber { placemark: 2, .. })
    ));
    assert!(!ws.config.output_dir.exists());
}

#[test]
fn test_convert_missing_coordinates_is_fatal() {
    let ws = workspace("<kml><Placemark><name>Ghost</name><styleUrl>#dock</styleUrl></Placemark></kml>");

    let err = cmd_convert(&ws.input, &ws.config, None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::MissingCoordinate { placemark: 1, .. })
    ));
    assert!(!ws.config.output_dir.exists());
}

#[test]
fn test_convert_skips_waypoints_without_category() {
    let ws = workspace(
        "<kml><Placemark><name>Kept</name><styleUrl>#dock</styleUrl><coordinates>1,2</coordinates></Placemark>\
         <Placemark><name>Loose</name><coordinates>3,4</coordinates></Placemark></kml>",
    );

    let report = cmd_convert(&ws.input, &ws.config, None).unwrap();

    assert_eq!(report.unset_category, 1);
    assert_eq!(read_rows(&ws.config.csv_path("dock")).len(), 1);
    assert_eq!(entries(&ws.config.output_dir), vec!["dock"]);
}

#[test]
fn test_convert_rejects_path_like_category() {
    let ws = workspace(
        "<kml><Placemark><styleUrl>../escape1</styleUrl><coordinates>1,2</coordinates></Placemark></kml>",
    );

    let err = cmd_convert(&ws.input, &ws.config, None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExportError>(),
        Some(ExportError::InvalidCategory(_))
    ));
    assert!(!ws.config.output_dir.exists());
}

#[test]
fn test_convert_is_idempotent() {
    let ws = workspace(DOCKS_KML);

    cmd_convert(&ws.input, &ws.config, None).unwrap();
    let first = fs::read(ws.config.csv_path("dock")).unwrap();
    cmd_convert(&ws.input, &ws.config, None).unwrap();
    let second = fs::read(ws.config.csv_path("dock")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_convert_missing_input() {
    let ws = workspace(DOCKS_KML);
    let missing = ws.input.with_file_name("absent.kml");

    let err = cmd_convert(&missing, &ws.config, None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<kml_waypoints::KmlError>(),
        Some(kml_waypoints::KmlError::NotFound { .. })
    ));
}

#[test]
fn test_convert_writes_json_report() {
    let ws = workspace(DOCKS_KML);
    let report_path = ws.config.icon_dir.with_file_name("report.json");

    cmd_convert(&ws.input, &ws.config, Some(&report_path)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["total_waypoints"], 3);
    assert_eq!(json["categories_written"], 2);
}

#[test]
fn test_convert_io_failure_keeps_earlier_categories() {
    let ws = workspace(DOCKS_KML);
    // Un fichier occupe la place du dossier hotel (traité après dock)
    fs::create_dir_all(&ws.config.output_dir).unwrap();
    fs::write(ws.config.category_dir("hotel"), b"not a directory").unwrap();

    let err = cmd_convert(&ws.input, &ws.config, None).unwrap_err();

    assert!(err.to_string().contains("hotel"), "unexpected error: {:#}", err);
    assert_eq!(read_rows(&ws.config.csv_path("dock")).len(), 2);
    assert!(ws.config.category_dir("hotel").is_file());
}

#[test]
fn test_convert_prints_counts_before_coercion_failure() {
    let ws = workspace(
        "<kml><Placemark><styleUrl>#dock</styleUrl><coordinates>1,2</coordinates></Placemark>\
         <Placemark><coordinates>north,2</coordinates></Placemark></kml>",
    );
    let extraction = kml_waypoints::parse(&ws.input).unwrap();
    let mut progress = Vec::new();

    let err = convert_with_progress(&extraction, &ws.config, &mut progress).unwrap_err();

    assert!(err.downcast_ref::<ExportError>().is_some());
    assert_eq!(
        String::from_utf8(progress).unwrap(),
        "2 waypoints loaded\nCounts by category:\n  dock: 1\n  (unset): 1\n"
    );
    assert!(!ws.config.output_dir.exists());
}

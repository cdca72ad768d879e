// Integration tests for College Crossref

use college_crossref::config::Settings;
use college_crossref::models::{Coordinate, ReportSummary, ScoreMode};
use college_crossref::{run, PipelineError, EARTH_RADIUS_MILES};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "Type,Name,Latitude,Longitude,City,State";

/// Point `north` and `east` miles from (0, 0)
fn offset(north: f64, east: f64) -> Coordinate {
    Coordinate::new(
        (north / EARTH_RADIUS_MILES).to_degrees(),
        (east / EARTH_RADIUS_MILES).to_degrees(),
    )
}

fn row(label: &str, name: &str, at: Coordinate, city: &str, state: &str) -> String {
    format!("{},{},{},{},{},{}", label, name, at.latitude, at.longitude, city, state)
}

fn write_csv(dir: &Path, rows: &[String]) -> std::path::PathBuf {
    let path = dir.join("colleges.csv");
    let mut body = String::from(HEADER);
    for r in rows {
        body.push('\n');
        body.push_str(r);
    }
    body.push('\n');
    fs::write(&path, body).unwrap();
    path
}

fn settings_for(dir: &TempDir, rows: &[String]) -> Settings {
    let mut settings = Settings::default();
    settings.input.path = write_csv(dir.path(), rows);
    settings.output.report_path = dir.path().join("output").join("grouping.txt");
    settings
}

/// A(med), B(pharm), C(mfa) with AB = 10, BC = 12, AC = 15 miles, plus
/// D(med) 40 miles from both B and C
fn triangle_rows() -> Vec<String> {
    let a = offset(0.0, 0.0);
    let b = offset(0.0, 10.0);
    let cx = (15.0_f64.powi(2) - 12.0_f64.powi(2) + 10.0_f64.powi(2)) / 20.0;
    let cy = (15.0_f64.powi(2) - cx * cx).sqrt();
    let c = offset(cy, cx);

    // D sits on the perpendicular bisector of BC, away from A
    let (mx, my) = ((10.0 + cx) / 2.0, cy / 2.0);
    let (dx, dy) = (cx - 10.0, cy);
    let len = (dx * dx + dy * dy).sqrt();
    let h = (40.0_f64.powi(2) - (len / 2.0).powi(2)).sqrt();
    let d = offset(my - dx / len * h, mx + dy / len * h);

    vec![
        row("Medical", "Alpha Medical School", a, "Alphaville", "AA"),
        row("Pharmacy", "Beta Pharmacy", b, "Betatown", "BB"),
        row("MFA", "Gamma Arts", c, "Gamma City", "CC"),
        row("Medical", "Delta Medicine", d, "Deltaburg", "DD"),
    ]
}

#[test]
fn test_integration_tiers_and_average() {
    let dir = TempDir::new().unwrap();
    let settings = settings_for(&dir, &triangle_rows());

    let outcome = run(&settings).unwrap();

    assert_eq!(
        outcome.tier_counts,
        vec![(25.0, 1), (50.0, 1), (75.0, 0), (100.0, 0)]
    );
    assert_eq!(outcome.load_stats.medical, 2);

    let report = fs::read_to_string(&settings.output.report_path).unwrap();
    assert_eq!(report, outcome.report);

    let expected = "Within 25 miles (1):\n\
                    Med   | Alpha Medical School | AA | Alphaville\n\
                    Pharm | Beta Pharmacy        | BB | Betatown\n\
                    MFA   | Gamma Arts           | CC | Gamma City\n\
                    Average Distance: 12.3333 miles\n\
                    \n\
                    Within 50 miles (1):\n\
                    Med   | Delta Medicine       | DD | Deltaburg\n\
                    Pharm | Beta Pharmacy        | BB | Betatown\n\
                    MFA   | Gamma Arts           | CC | Gamma City\n";
    assert!(
        report.starts_with(expected),
        "unexpected report:\n{}",
        report
    );
    assert!(report.ends_with("\nWithin 75 miles (0):\nWithin 100 miles (0):"));
}

#[test]
fn test_integration_empty_category() {
    let dir = TempDir::new().unwrap();
    let rows = vec![
        row("Medical", "Only Med", offset(0.0, 0.0), "X", "XX"),
        row("Pharmacy", "Only Pharm", offset(1.0, 0.0), "Y", "YY"),
    ];
    let settings = settings_for(&dir, &rows);

    let outcome = run(&settings).unwrap();

    assert!(outcome.tier_counts.iter().all(|(_, count)| *count == 0));
    assert_eq!(
        outcome.report,
        "Within 25 miles (0):\nWithin 50 miles (0):\nWithin 75 miles (0):\nWithin 100 miles (0):"
    );
}

#[test]
fn test_integration_unrecognized_labels_ignored() {
    let dir = TempDir::new().unwrap();
    let mut rows = triangle_rows();
    rows.push(row("Dental", "A Dental School With A Very Long Name", offset(0.0, 1.0), "Z", "ZZ"));
    let settings = settings_for(&dir, &rows);

    let outcome = run(&settings).unwrap();

    assert_eq!(outcome.load_stats.rows_skipped, 1);
    assert_eq!(outcome.tier_counts[0], (25.0, 1));
    assert!(!outcome.report.contains("Dental"));
    // The skipped row still sets the name column width
    let width = "A Dental School With A Very Long Name".len();
    assert!(outcome
        .report
        .contains(&format!("| {:<width$} |", "Beta Pharmacy", width = width)));
}

#[test]
fn test_integration_bad_coordinate_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut rows = triangle_rows();
    rows.push("Pharmacy,Broken,forty,-80.0,Nowhere,NW".to_string());
    let settings = settings_for(&dir, &rows);

    let err = run(&settings).unwrap_err();

    assert!(matches!(err, PipelineError::Load(_)));
    assert!(!settings.output.report_path.exists());
}

#[test]
fn test_integration_missing_input() {
    let dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.input.path = dir.path().join("missing.csv");
    settings.output.report_path = dir.path().join("grouping.txt");

    assert!(run(&settings).is_err());
    assert!(!settings.output.report_path.exists());
}

#[test]
fn test_integration_json_summary() {
    let dir = TempDir::new().unwrap();
    let mut settings = settings_for(&dir, &triangle_rows());
    let summary_path = dir.path().join("output").join("summary.json");
    settings.output.summary_path = Some(summary_path.clone());
    settings.matching.score_mode = ScoreMode::Mean;

    run(&settings).unwrap();

    let summary: ReportSummary =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();

    assert_eq!(summary.score_mode, ScoreMode::Mean);
    assert_eq!(summary.tiers.len(), 4);
    assert_eq!(summary.tiers[0].count, 1);

    let first = &summary.tiers[0].triplets[0];
    assert!((first.average_distance - 37.0 / 3.0).abs() < 1e-3);
    assert_eq!(first.rank_score, first.average_distance);
    assert_eq!(first.members[0].name, "Alpha Medical School");
    assert_eq!(summary.tiers[1].triplets[0].members[0].name, "Delta Medicine");
}

#[test]
fn test_integration_identical_rows_are_distinct() {
    let dir = TempDir::new().unwrap();
    let mut rows = triangle_rows();
    // A second, field-identical copy of Alpha
    rows.push(rows[0].clone());
    let settings = settings_for(&dir, &rows);

    let outcome = run(&settings).unwrap();

    assert_eq!(outcome.tier_counts[0], (25.0, 2));
    assert_eq!(outcome.report.matches("Alpha Medical School").count(), 2);
}

#[test]
fn test_integration_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let mut settings = settings_for(&dir, &triangle_rows());
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    settings.output.report_path = blocker.join("grouping.txt");

    let err = run(&settings).unwrap_err();

    assert!(matches!(err, PipelineError::Report(_)));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}

#[test]
fn test_integration_unwritable_summary_leaves_no_report() {
    let dir = TempDir::new().unwrap();
    let mut settings = settings_for(&dir, &triangle_rows());
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    settings.output.summary_path = Some(blocker.join("summary.json"));

    let err = run(&settings).unwrap_err();

    assert!(matches!(err, PipelineError::Report(_)));
    assert!(!settings.output.report_path.exists());
}

use super::*;
use crate::series::GeneratorConfig;
use time::macros::datetime;

const NOW: OffsetDateTime = datetime!(2024-12-29 10:00:00 UTC);

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn sample_table() -> PredictionTable {
    let raw = r#"
{"time":"2024-12-01 00:00","Mill #1_Real-Data":1510.0,"Mill #1_XGB":1498.5,"Mill #2_Real-Data":1200,"Mill #2_XGB":1210}
{"time":"2024-12-01 01:00","Mill #1_Real-Data":1525.0,"Mill #1_XGB":1530.0,"Mill #2_Real-Data":1190,"Mill #2_XGB":1185,"note":"shift change"}
"#;
    PredictionTable::parse_jsonl(raw).unwrap()
}

#[test]
fn weekly_dates_cover_thirteen_weeks() {
    let dates = weekly_dates();
    assert_eq!(dates.len(), 13);
    assert_eq!(dates[0].to_string(), "2024-10-06");
}

#[test]
fn throughput_chart_has_one_spline_per_mill() {
    let chart = throughput_chart(NOW);
    assert_eq!(chart.traces.len(), MILLS.len());
    for (trace, mill) in chart.traces.iter().zip(MILLS) {
        assert_eq!(trace.name, mill);
        assert_eq!(trace.shape, LineShape::Spline);
        assert_eq!(trace.x.len(), trace.y.len());
        assert_eq!(trace.y.len(), 12);
    }
    assert_eq!(chart.layout.y_axis_title, "Throughput Rate - tph");
}

#[test]
fn feed_chart_builds_named_traces_for_selection() {
    let set = series::generate(&GeneratorConfig::default(), &weekly_dates()).unwrap();
    let chart = feed_chart(&set, &owned(&DEFAULT_STOCKPILE_SELECTION), "Fe%", NOW).unwrap();

    let names: Vec<&str> = chart.traces.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Feed Belt - S1", "Feed Belt - S2", "Feed Belt - S3"]);
    for trace in &chart.traces {
        assert_eq!(trace.y.len(), 13);
        assert!(trace.y.iter().all(|v| (30.0..=70.0).contains(v)));
    }
    assert_eq!(chart.layout.y_axis_title, "Fe%");
}

#[test]
fn feed_chart_empty_selection_has_no_traces() {
    let set = series::generate(&GeneratorConfig::default(), &weekly_dates()).unwrap();
    let chart = feed_chart(&set, &[], DEFAULT_ATTRIBUTE, NOW).unwrap();
    assert!(chart.traces.is_empty());
}

#[test]
fn feed_chart_rejects_unknown_names() {
    let set = series::generate(&GeneratorConfig::default(), &weekly_dates()).unwrap();
    assert!(matches!(
        feed_chart(&set, &owned(&["S7"]), DEFAULT_ATTRIBUTE, NOW),
        Err(MillError::UnknownStockpile(s)) if s == "S7"
    ));
    assert!(matches!(
        feed_chart(&set, &owned(&["S1"]), "Gold%", NOW),
        Err(MillError::UnknownAttribute(_))
    ));
}

#[test]
fn parse_jsonl_reads_numeric_columns_and_skips_others() {
    let table = sample_table();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].time, "2024-12-01 00:00");
    assert!(!table.rows[1].columns.contains_key("note"));
    assert!((table.rows[0].columns["Mill #2_Real-Data"] - 1200.0).abs() < f64::EPSILON);
}

#[test]
fn parse_jsonl_reports_line_number() {
    let err = PredictionTable::parse_jsonl("{\"time\":\"a\"}\n\n[1,2]\n").unwrap_err();
    assert!(matches!(err, MillError::Parse { line: 3, .. }));
}

#[test]
fn parse_jsonl_requires_time() {
    let err = PredictionTable::parse_jsonl(r#"{"Mill #1_XGB": 1.0}"#).unwrap_err();
    assert!(err.to_string().contains("missing 'time'"));
}

#[test]
fn prediction_chart_pairs_real_and_predicted() {
    let chart = prediction_chart(&sample_table(), &owned(&["Mill #1", "Mill #2"]), NOW).unwrap();
    let names: Vec<&str> = chart.traces.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Mill #1 Real-Data", "Mill #1 XGB Prediction", "Mill #2 Real-Data", "Mill #2 XGB Prediction"]);
    assert_eq!(chart.traces[1].y, vec![1498.5, 1530.0]);
    assert!(chart.layout.title.ends_with("Throughput Predictions for Selected Mills "));
}

#[test]
fn prediction_chart_rejects_unknown_mill_and_missing_column() {
    let table = sample_table();
    assert!(matches!(
        prediction_chart(&table, &owned(&["Mill #9"]), NOW),
        Err(MillError::UnknownMill(_))
    ));
    assert!(matches!(
        prediction_chart(&table, &owned(&["Mill #3"]), NOW),
        Err(MillError::MissingColumn(c)) if c == "Mill #3_Real-Data"
    ));
}

#[tokio::test]
async fn shipped_table_covers_every_mill() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(crate::config::DEFAULT_PREDICTION_PATH);
    let table = PredictionTable::load(&path).await.unwrap();
    assert!(!table.rows.is_empty());

    for mill in MILLS {
        for suffix in ["_Real-Data", "_XGB"] {
            let (times, values) = table.column(&format!("{mill}{suffix}")).unwrap();
            assert_eq!(times.len(), table.rows.len(), "{mill}{suffix}");
            assert_eq!(values.len(), table.rows.len(), "{mill}{suffix}");
        }
    }

    let chart = prediction_chart(&table, &owned(&MILLS), NOW).unwrap();
    assert_eq!(chart.traces.len(), MILLS.len() * 2);
}

#[tokio::test]
async fn load_missing_file_is_io_error() {
    let err = PredictionTable::load(Path::new("/nonexistent/oretrack/prediction.jsonl"))
        .await
        .unwrap_err();
    assert!(matches!(err, MillError::Io(_)));
}

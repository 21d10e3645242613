// File: crates/history-core/tests/ingest.rs
// Purpose: Raw backend records -> chronological, labelled Series (filtering, conversion, parsing).

use history_core::ingest::{date_labels, parse_timestamp_ms, round_to};
use history_core::{ingest_records, parse_json, read_csv, HistoryError, IngestOptions, RawDate, RawPriceRecord};

const JAN_05_2025_MS: i64 = 1_736_035_200_000;

#[test]
fn drops_sentinel_missing_and_unparseable_records() {
    let records = vec![
        RawPriceRecord::new("2025-01-07", 7_500.0),
        RawPriceRecord::new("2025-01-05", -1.0),
        RawPriceRecord { date: None, price: Some(7_000.0) },
        RawPriceRecord { date: Some(RawDate::Text("2025-01-06".into())), price: None },
        RawPriceRecord::new("not a date", 6_999.0),
        RawPriceRecord::new("2025-01-08", f64::NAN),
        RawPriceRecord::new("2025-01-05", 7_999.0),
    ];
    let (series, report) = ingest_records(records, &IngestOptions::default());

    assert_eq!(series.len(), 2);
    assert_eq!(report.accepted, 2);
    assert_eq!(report.sentinel_price, 1);
    assert_eq!(report.missing_date, 1);
    assert_eq!(report.missing_price, 1);
    assert_eq!(report.bad_date, 1);
    assert_eq!(report.non_finite_price, 1);
    assert_eq!(report.dropped(), 5);

    let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![7_999.0, 7_500.0]);
    assert!(series.is_chronological());
}

#[test]
fn attaches_labels_and_times() {
    let (series, _) = ingest_records(vec![RawPriceRecord::new("2025-01-05", 5_499.0)], &IngestOptions::default());
    let p = &series.points()[0];
    assert_eq!(p.time, Some(JAN_05_2025_MS));
    assert_eq!(p.label.as_deref(), Some("Jan 05"));
    assert_eq!(p.full_date.as_deref(), Some("05 Jan 2025"));
}

#[test]
fn converts_units_and_rounds() {
    let opts = IngestOptions { price_divisor: 100.0, round_decimals: 1, ..IngestOptions::default() };
    let (series, _) = ingest_records(vec![RawPriceRecord::new("2025-01-05", 799_949.0)], &opts);
    assert_eq!(series.points()[0].price, 7_999.5);

    assert_eq!(round_to(2.344, 2), 2.34);
    assert_eq!(round_to(-2.5, 0), -3.0);
}

#[test]
fn custom_sentinel_is_honoured() {
    let opts = IngestOptions { sentinel: 0.0, ..IngestOptions::default() };
    let records = vec![RawPriceRecord::new("2025-01-05", 0.0), RawPriceRecord::new("2025-01-06", -1.0)];
    let (series, report) = ingest_records(records, &opts);
    assert_eq!(report.sentinel_price, 1);
    assert_eq!(series.points()[0].price, -1.0);
}

#[test]
fn equal_timestamps_keep_input_order() {
    let records = vec![
        RawPriceRecord::new("2025-01-06", 2.0),
        RawPriceRecord::new("2025-01-05", 10.0),
        RawPriceRecord::new("2025-01-05", 11.0),
    ];
    let (series, _) = ingest_records(records, &IngestOptions::default());
    let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![10.0, 11.0, 2.0]);
}

#[test]
fn parses_supported_date_forms() {
    let text = |s: &str| parse_timestamp_ms(&RawDate::Text(s.to_string()));
    assert_eq!(text("2025-01-05"), Some(JAN_05_2025_MS));
    assert_eq!(text("2025-01-05 00:00:00"), Some(JAN_05_2025_MS));
    assert_eq!(text("2025-01-05T00:00:00"), Some(JAN_05_2025_MS));
    assert_eq!(text("2025-01-05T00:00:00Z"), Some(JAN_05_2025_MS));
    assert_eq!(text("2025-01-05T05:30:00+05:30"), Some(JAN_05_2025_MS));
    assert_eq!(text("1736035200"), Some(JAN_05_2025_MS));
    assert_eq!(text("  "), None);
    assert_eq!(text("Jan"), None);
    assert_eq!(parse_timestamp_ms(&RawDate::Epoch(1_736_035_200)), Some(JAN_05_2025_MS));
    assert_eq!(parse_timestamp_ms(&RawDate::Epoch(JAN_05_2025_MS)), Some(JAN_05_2025_MS));
}

#[test]
fn labels_for_timestamp() {
    let (short, long) = date_labels(JAN_05_2025_MS).expect("in range");
    assert_eq!(short, "Jan 05");
    assert_eq!(long, "05 Jan 2025");
}

#[test]
fn json_bare_array_and_aliases() {
    let json = r#"[
        {"date": "2025-02-01", "price": 7500},
        {"timestamp": 1736035200000, "value": 7999.0},
        {"time": "2025-03-01", "price": null}
    ]"#;
    let recs = parse_json(json).expect("parse");
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[1].date, Some(RawDate::Epoch(JAN_05_2025_MS)));
    assert_eq!(recs[1].price, Some(7_999.0));
    assert_eq!(recs[2].price, None);

    let (series, report) = ingest_records(recs, &IngestOptions::default());
    assert_eq!(series.len(), 2);
    assert_eq!(report.missing_price, 1);
    assert_eq!(series.points()[0].price, 7_999.0);
}

#[test]
fn json_envelope() {
    let json = r#"{"title": "Desk", "priceHistory": [{"date": "2025-01-05", "price": -1}, {"date": "2025-01-06", "price": 5499}]}"#;
    let recs = parse_json(json).expect("parse");
    assert_eq!(recs.len(), 2);
    let (series, report) = ingest_records(recs, &IngestOptions::default());
    assert_eq!(series.len(), 1);
    assert_eq!(report.sentinel_price, 1);
}

#[test]
fn json_wrong_shape_is_an_error() {
    assert!(matches!(parse_json("42"), Err(HistoryError::Payload(_))));
    assert!(matches!(parse_json(r#"{"items": []}"#), Err(HistoryError::Payload(_))));
    assert!(matches!(parse_json("[{"), Err(HistoryError::Json(_))));
}

#[test]
fn csv_with_header_detection() {
    let csv = "Date, Close\n2025-01-06,7500\n2025-01-05,7999\n2025-01-07,\n,100\n";
    let recs = read_csv(csv.as_bytes()).expect("csv");
    assert_eq!(recs.len(), 4);
    assert_eq!(recs[2].price, None);
    assert_eq!(recs[3].date, None);

    let (series, report) = ingest_records(recs, &IngestOptions::default());
    assert_eq!(series.len(), 2);
    assert_eq!(report.dropped(), 2);
    assert_eq!(series.points()[0].time, Some(JAN_05_2025_MS));
}

#[test]
fn csv_missing_column() {
    let err = read_csv("when,amount\n2025-01-05,1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, HistoryError::MissingColumn { .. }));
}

#[test]
fn extreme_epochs_are_rejected_without_panicking() {
    let recs = parse_json(r#"[{"date": -9223372036854775808, "price": 5.0}, {"date": 9223372036854775807, "price": 6.0}]"#)
        .expect("parse");
    assert_eq!(parse_timestamp_ms(&RawDate::Epoch(i64::MIN)), None);
    assert_eq!(parse_timestamp_ms(&RawDate::Text(i64::MIN.to_string())), None);

    let (series, report) = ingest_records(recs, &IngestOptions::default());
    assert!(series.is_empty());
    assert_eq!(report.bad_date, 2);

    let csv = format!("date,price\n{},5\n2025-01-05,7\n", i64::MIN);
    let (series, report) = ingest_records(read_csv(csv.as_bytes()).expect("csv"), &IngestOptions::default());
    assert_eq!(series.len(), 1);
    assert_eq!(report.bad_date, 1);
}

#[test]
fn prices_that_overflow_on_conversion_are_dropped() {
    let (series, report) = ingest_records(vec![RawPriceRecord::new("2025-01-05", 1e307)], &IngestOptions::default());
    assert_eq!(report.accepted, 1);
    assert_eq!(series.points()[0].price, 1e307);
    assert_eq!(round_to(1e307, 2), 1e307);

    let opts = IngestOptions { price_divisor: 1e-300, ..IngestOptions::default() };
    let (series, report) = ingest_records(vec![RawPriceRecord::new("2025-01-05", 1e10)], &opts);
    assert!(series.is_empty());
    assert_eq!(report.accepted, 0);
    assert_eq!(report.non_finite_price, 1);
}

#[test]
fn month_only_dates_are_not_accepted() {
    // Month names alone carry no year or day, so they cannot be placed on a time axis.
    let json = r#"{"priceHistory": [
        {"date": "Jan", "price": 7999},
        {"date": "Feb", "price": 7500},
        {"date": "Mar", "price": 6999},
        {"date": "Apr", "price": 5499}
    ]}"#;
    let (series, report) = ingest_records(parse_json(json).expect("parse"), &IngestOptions::default());
    assert!(series.is_empty());
    assert_eq!(report.bad_date, 4);
    assert_eq!(report.accepted, 0);
}

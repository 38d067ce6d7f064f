//! Integration tests: records through resolution and every encoder.

use edr_protocol::{
    payload, Catalog, CollectionDescriptor, EdrError, EncodedPayload, FieldNames,
    GroupedSeries, ObservationRecord, OutputFormat, Parameter, QueryDescriptor, QueryType,
    TabularRows, Unit,
};
use test_utils::{assert_csv_rectangular, format_tokens, interleaved_records, pressure};

fn to_records(tuples: Vec<(String, String, String)>) -> Vec<ObservationRecord> {
    tuples.into_iter().map(ObservationRecord::from).collect()
}

fn pressure_catalog() -> Catalog {
    let qnh = Parameter::new("QNH", "Atmospheric pressure")
        .with_description("Atmospheric pressure")
        .with_unit(Unit::hectopascals());

    let regional = CollectionDescriptor::new("regional-pressure-settings", qnh.clone())
        .with_columns(FieldNames::new("region", "time", "qnh"))
        .with_properties(FieldNames::new("region", "time", "pressure"))
        .with_query(
            QueryDescriptor::new(
                QueryType::Area,
                vec![OutputFormat::CoverageJson],
                OutputFormat::CoverageJson,
            )
            .unwrap(),
        )
        .with_query(
            QueryDescriptor::new(
                QueryType::Locations,
                vec![
                    OutputFormat::GeoJson,
                    OutputFormat::CoverageJson,
                    OutputFormat::Csv,
                ],
                OutputFormat::GeoJson,
            )
            .unwrap(),
        );

    Catalog::new(vec![
        regional,
        CollectionDescriptor::new("open-runway", qnh.clone()),
        CollectionDescriptor::new("de-icing", qnh),
    ])
    .unwrap()
}

fn run(collection_id: &str, query: QueryType, token: Option<&str>) -> Result<EncodedPayload, EdrError> {
    let catalog = pressure_catalog();
    let format = catalog.resolve(collection_id, query, token)?;
    let collection = catalog.collection(collection_id)?;
    Ok(payload::encode(format, &to_records(pressure::records()), collection))
}

#[test]
fn test_pressure_dataset_is_valid() {
    for record in to_records(pressure::records()) {
        record.validate().unwrap();
    }
}

#[test]
fn test_csv_end_to_end() {
    let payload = run(
        "regional-pressure-settings",
        QueryType::Locations,
        Some(format_tokens::CSV),
    )
    .unwrap();
    let body = String::from_utf8(payload.to_body().unwrap()).unwrap();

    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 21);
    assert_eq!(lines[0], "region,time,qnh");
    assert_eq!(lines[1], "01,20250720T0000Z,1000");
    assert_eq!(lines[20], "12,20250720T0100Z,1002");
    assert_csv_rectangular!(&body, 3);
}

#[test]
fn test_geojson_end_to_end() {
    let payload = run(
        "regional-pressure-settings",
        QueryType::Locations,
        Some(format_tokens::GEOJSON),
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&payload.to_body().unwrap()).unwrap();

    assert_eq!(json["type"], "FeatureCollection");
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 10);

    let regions: Vec<&str> = features
        .iter()
        .map(|f| f["properties"]["region"].as_str().unwrap())
        .collect();
    assert_eq!(regions, pressure::REGIONS.to_vec());

    for feature in features {
        assert_eq!(feature["properties"]["pressure"].as_array().unwrap().len(), 2);
        assert_eq!(
            feature["properties"]["time"],
            serde_json::json!(["20250720T0000Z", "20250720T0100Z"])
        );
        assert_eq!(feature["geometry"]["type"], "Polygon");
    }
}

#[test]
fn test_coverage_end_to_end_is_stub() {
    let payload = run(
        "regional-pressure-settings",
        QueryType::Area,
        Some(format_tokens::COVERAGEJSON),
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&payload.to_body().unwrap()).unwrap();

    assert_eq!(json["type"], "CoverageJSON");
    assert_eq!(json["ranges"]["QNH"]["shape"], serde_json::json!([0, 0, 0, 0]));
    assert_eq!(json["parameters"]["QNH"]["observedProperty"]["label"]["en"], "Atmospheric pressure");
}

#[test]
fn test_default_format_is_geojson() {
    let payload = run("regional-pressure-settings", QueryType::Locations, None).unwrap();
    assert_eq!(payload.format(), OutputFormat::GeoJson);

    let payload = run("regional-pressure-settings", QueryType::Area, Some("")).unwrap();
    assert_eq!(payload.format(), OutputFormat::CoverageJson);
}

#[test]
fn test_format_tokens_are_case_insensitive() {
    for token in ["CSV", "Csv", "csv"] {
        let payload = run("regional-pressure-settings", QueryType::Locations, Some(token)).unwrap();
        assert_eq!(payload.format(), OutputFormat::Csv);
    }
}

#[test]
fn test_rejections() {
    let err = run(
        "regional-pressure-settings",
        QueryType::Locations,
        Some(format_tokens::NETCDF4),
    )
    .unwrap_err();
    assert!(matches!(err, EdrError::UnsupportedFormat { .. }));
    assert_eq!(err.status_code(), 400);

    let err = run(
        "regional-pressure-settings",
        QueryType::Locations,
        Some(format_tokens::UNKNOWN),
    )
    .unwrap_err();
    assert!(err.to_string().contains("xml"));

    let err = run("regional-pressure-settings", QueryType::Area, Some("csv")).unwrap_err();
    assert!(err.to_string().contains("CoverageJSON"));

    let err = run("open-runway", QueryType::Locations, None).unwrap_err();
    assert!(matches!(err, EdrError::UnsupportedQuery { .. }));

    let err = run("missing", QueryType::Locations, None).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn test_interleaved_grouping() {
    let grouped = GroupedSeries::group(&to_records(interleaved_records()));
    assert_eq!(grouped.get("A").unwrap().values, vec!["v1", "v3"]);
    assert_eq!(grouped.get("A").unwrap().timestamps, vec!["t1", "t3"]);
    assert_eq!(grouped.get("B").unwrap().values, vec!["v2"]);
}

#[test]
fn test_grouping_completeness_on_generated_data() {
    for (entities, steps) in [(1, 1), (3, 7), (10, 2), (25, 4)] {
        let records = to_records(test_utils::scrambled_records(entities, steps));
        let grouped = GroupedSeries::group(&records);

        assert_eq!(grouped.len(), entities);
        assert_eq!(grouped.total_pairs(), records.len());
        for (_, series) in grouped.iter() {
            assert_eq!(series.len(), steps);
            assert_eq!(series.timestamps.len(), series.values.len());
        }
    }
}

#[test]
fn test_tabular_row_count_on_generated_data() {
    for n in [0usize, 1, 5, 48] {
        let records = to_records(test_utils::synthetic_records(n, 1));
        let rows = TabularRows::encode(&records, &FieldNames::default());
        assert_eq!(rows.len(), n + 1);
    }
}

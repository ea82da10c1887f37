//! OCR response parsing.
//!
//! Walks `images[].fields[]` of the OCR service's JSON answer and turns every
//! field with non-empty `inferText` into a [`TextEntry`]. Missing or
//! wrongly-typed paths yield fewer entries, never an error: an image with no
//! detections is a normal answer.

use menuscan_core::{ExtractionResult, MenuScanError, Point, Quad, Result, TextEntry};
use serde_json::Value;

use crate::ocr::OCR_SERVICE;

/// Parse a raw OCR response body.
///
/// Only a body that is not JSON at all is an error.
pub fn parse_ocr_response(raw: &str) -> Result<ExtractionResult> {
    let root: Value = serde_json::from_str(raw)
        .map_err(|e| MenuScanError::io(OCR_SERVICE, format!("malformed OCR response: {e}")))?;
    Ok(parse_ocr_value(&root))
}

/// Parse an already-decoded OCR response.
pub fn parse_ocr_value(root: &Value) -> ExtractionResult {
    let entries = as_array(&root["images"])
        .iter()
        .flat_map(|image| as_array(&image["fields"]))
        .filter_map(parse_field)
        .collect();
    ExtractionResult { entries }
}

fn parse_field(field: &Value) -> Option<TextEntry> {
    let text = scalar_text(&field["inferText"]);
    if text.is_empty() {
        return None;
    }
    let vertices: Vec<Point> = as_array(&field["boundingPoly"]["vertices"])
        .iter()
        .map(|v| Point::new(coordinate(&v["x"]), coordinate(&v["y"])))
        .collect();
    Some(TextEntry {
        text,
        quad: Quad::from_points(&vertices),
    })
}

fn as_array(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Strings as-is, numbers and booleans in their JSON spelling, anything else empty.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Integer pixel coordinate; fractions truncate, missing or unparsable is 0.
fn coordinate(value: &Value) -> i32 {
    let raw = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
        _ => 0,
    };
    raw.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(text: &str, vertices: &[(f64, f64)]) -> Value {
        let vertices: Vec<Value> = vertices.iter().map(|(x, y)| json!({"x": x, "y": y})).collect();
        json!({ "inferText": text, "boundingPoly": { "vertices": vertices } })
    }

    const SQUARE: [(f64, f64); 4] = [(10.0, 20.0), (110.0, 20.0), (110.0, 50.0), (10.0, 50.0)];

    #[test]
    fn keeps_every_non_empty_field_in_order() {
        let body = json!({
            "images": [{ "fields": [
                field("김치찌개", &SQUARE),
                field("8,000", &SQUARE),
                field("된장찌개", &SQUARE),
            ]}]
        });
        let result = parse_ocr_value(&body);
        assert_eq!(result.texts(), vec!["김치찌개", "8,000", "된장찌개"]);
        assert!(result.entries.iter().all(|e| e.quad.is_some()));
    }

    #[test]
    fn order_spans_multiple_images() {
        let body = json!({
            "images": [
                { "fields": [field("A", &SQUARE), field("B", &SQUARE)] },
                { "fields": [field("C", &SQUARE)] },
            ]
        });
        assert_eq!(parse_ocr_value(&body).texts(), vec!["A", "B", "C"]);
    }

    #[test]
    fn empty_infer_text_is_dropped() {
        let body = json!({
            "images": [{ "fields": [
                field("", &SQUARE),
                field("Bibimbap", &SQUARE),
                { "boundingPoly": { "vertices": [] } },
            ]}]
        });
        let result = parse_ocr_value(&body);
        assert_eq!(result.len(), 1);
        assert_eq!(result.entries[0].text, "Bibimbap");
    }

    #[test]
    fn all_empty_fields_is_empty_result() {
        let body = json!({ "images": [{ "fields": [field("", &SQUARE), field("", &[])] }] });
        assert!(parse_ocr_value(&body).is_empty());
    }

    #[test]
    fn short_polygon_keeps_text_without_quad() {
        let body = json!({
            "images": [{ "fields": [field("Tea", &[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)])] }]
        });
        let result = parse_ocr_value(&body);
        assert_eq!(result.entries[0].text, "Tea");
        assert!(result.entries[0].quad.is_none());
    }

    #[test]
    fn missing_polygon_keeps_text_without_quad() {
        let body = json!({ "images": [{ "fields": [{ "inferText": "Soju" }] }] });
        let result = parse_ocr_value(&body);
        assert_eq!(result.entries[0].quad, None);
    }

    #[test]
    fn extra_vertices_are_cut_to_four_and_truncated() {
        let body = json!({
            "images": [{ "fields": [field(
                "Ramen",
                &[(1.9, 2.2), (3.5, 4.0), (5.0, 6.7), (7.0, 8.0), (99.0, 99.0)],
            )]}]
        });
        let quad = parse_ocr_value(&body).entries[0].quad.unwrap();
        assert_eq!(
            quad.points(),
            &[Point::new(1, 2), Point::new(3, 4), Point::new(5, 6), Point::new(7, 8)]
        );
    }

    #[test]
    fn missing_paths_are_not_errors() {
        assert!(parse_ocr_response("{}").unwrap().is_empty());
        assert!(parse_ocr_response(r#"{"images": null}"#).unwrap().is_empty());
        assert!(parse_ocr_response(r#"{"images": [{"inferResult": "FAILURE"}]}"#)
            .unwrap()
            .is_empty());
        assert!(parse_ocr_response("[]").unwrap().is_empty());
    }

    #[test]
    fn non_json_body_is_io_error() {
        let err = parse_ocr_response("<html>gateway timeout</html>").unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn realistic_response_parses() {
        let raw = r#"{
            "version": "V2",
            "requestId": "1718000000000",
            "timestamp": 1718000000123,
            "images": [{
                "uid": "9f1c",
                "name": "menu.jpg",
                "inferResult": "SUCCESS",
                "message": "SUCCESS",
                "fields": [{
                    "valueType": "ALL",
                    "boundingPoly": { "vertices": [
                        {"x": 112.0, "y": 80.0}, {"x": 240.0, "y": 80.0},
                        {"x": 240.0, "y": 118.0}, {"x": 112.0, "y": 118.0}
                    ]},
                    "inferText": "비빔밥",
                    "inferConfidence": 0.9998,
                    "type": "NORMAL",
                    "lineBreak": false
                }, {
                    "valueType": "ALL",
                    "boundingPoly": { "vertices": [
                        {"x": 260.0, "y": 80.0}, {"x": 350.0, "y": 80.0},
                        {"x": 350.0, "y": 118.0}, {"x": 260.0, "y": 118.0}
                    ]},
                    "inferText": "9000원",
                    "inferConfidence": 0.9991,
                    "type": "NORMAL",
                    "lineBreak": true
                }]
            }]
        }"#;
        let result = parse_ocr_response(raw).unwrap();
        assert_eq!(result.texts(), vec!["비빔밥", "9000원"]);
        assert_eq!(result.entries[0].quad.unwrap().points()[2], Point::new(240, 118));
    }
}

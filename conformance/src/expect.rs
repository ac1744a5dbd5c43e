//! Expected outcomes: a status code plus a JSON body shape.

use serde_json::Value;
use todo_core::HttpResponse;

use crate::error::Mismatch;

/// How much of an unexpected body to quote in a status mismatch.
const BODY_EXCERPT: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum BodyShape {
    /// Status only; the body is not inspected.
    Any,
    /// Exactly `{}`.
    EmptyObject,
    /// Exactly `[]`.
    EmptyArray,
    /// An array of exactly this many items.
    Length(usize),
    /// An object carrying each of these field values. Other fields are
    /// ignored.
    Fields(Vec<(&'static str, Value)>),
    /// An array whose every item has `field == value`. An empty array passes.
    EachItem { field: &'static str, value: Value },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    pub status: u16,
    pub body: BodyShape,
}

impl Expectation {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: BodyShape::Any,
        }
    }

    pub fn with_body(mut self, body: BodyShape) -> Self {
        self.body = body;
        self
    }

    pub fn check(&self, response: &HttpResponse) -> Result<(), Mismatch> {
        if response.status != self.status {
            return Err(Mismatch::Status {
                expected: self.status,
                actual: response.status,
                body: excerpt(&response.body),
            });
        }
        if self.body == BodyShape::Any {
            return Ok(());
        }
        let json: Value =
            serde_json::from_str(&response.body).map_err(|e| Mismatch::NotJson(e.to_string()))?;

        match &self.body {
            BodyShape::Any => Ok(()),
            BodyShape::EmptyObject => {
                if json.as_object().is_some_and(|map| map.is_empty()) {
                    Ok(())
                } else {
                    Err(Mismatch::Shape {
                        expected: "{}",
                        actual: json,
                    })
                }
            }
            BodyShape::EmptyArray => {
                if json.as_array().is_some_and(|items| items.is_empty()) {
                    Ok(())
                } else {
                    Err(Mismatch::Shape {
                        expected: "[]",
                        actual: json,
                    })
                }
            }
            BodyShape::Length(expected) => {
                let items = as_array(&json)?;
                if items.len() == *expected {
                    Ok(())
                } else {
                    Err(Mismatch::Length {
                        expected: *expected,
                        actual: items.len(),
                    })
                }
            }
            BodyShape::Fields(fields) => {
                if !json.is_object() {
                    return Err(Mismatch::Shape {
                        expected: "an object",
                        actual: json,
                    });
                }
                for (field, expected) in fields {
                    let actual = json.get(*field);
                    if actual != Some(expected) {
                        return Err(Mismatch::Field {
                            field: *field,
                            expected: expected.clone(),
                            actual: actual.cloned(),
                        });
                    }
                }
                Ok(())
            }
            BodyShape::EachItem { field, value } => {
                for (index, item) in as_array(&json)?.iter().enumerate() {
                    let actual = item.get(*field);
                    if actual != Some(value) {
                        return Err(Mismatch::Item {
                            index,
                            field: *field,
                            expected: value.clone(),
                            actual: actual.cloned(),
                        });
                    }
                }
                Ok(())
            }
        }
    }
}

fn as_array(json: &Value) -> Result<&Vec<Value>, Mismatch> {
    json.as_array().ok_or_else(|| Mismatch::Shape {
        expected: "an array",
        actual: json.clone(),
    })
}

fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn status_is_checked_first() {
        let err = Expectation::status(404)
            .with_body(BodyShape::EmptyObject)
            .check(&response(200, r#"{"id":1}"#))
            .unwrap_err();
        assert!(matches!(err, Mismatch::Status { expected: 404, actual: 200, .. }));
    }

    #[test]
    fn status_only_ignores_non_json_body() {
        assert!(Expectation::status(500).check(&response(500, "TypeError")).is_ok());
    }

    #[test]
    fn empty_object_rejects_empty_array() {
        let err = Expectation::status(404)
            .with_body(BodyShape::EmptyObject)
            .check(&response(404, "[]"))
            .unwrap_err();
        assert_eq!(
            err,
            Mismatch::Shape {
                expected: "{}",
                actual: json!([])
            }
        );
    }

    #[test]
    fn empty_array_passes_on_no_matches() {
        let expect = Expectation::status(200).with_body(BodyShape::EmptyArray);
        assert!(expect.check(&response(200, "[]")).is_ok());
        assert!(expect.check(&response(200, r#"[{"id":1}]"#)).is_err());
    }

    #[test]
    fn length_counts_items() {
        let expect = Expectation::status(200).with_body(BodyShape::Length(2));
        assert!(expect.check(&response(200, "[1,2]")).is_ok());
        assert_eq!(
            expect.check(&response(200, "[1]")).unwrap_err(),
            Mismatch::Length {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn fields_compare_json_values_exactly() {
        let expect = Expectation::status(200).with_body(BodyShape::Fields(vec![
            ("id", json!(1)),
            ("userId", json!("test")),
        ]));
        assert!(expect
            .check(&response(200, r#"{"id":1,"userId":"test","title":"t"}"#))
            .is_ok());
        let err = expect
            .check(&response(200, r#"{"id":"1","userId":"test"}"#))
            .unwrap_err();
        assert!(matches!(err, Mismatch::Field { field: "id", .. }));
    }

    #[test]
    fn fields_report_missing_field() {
        let err = Expectation::status(201)
            .with_body(BodyShape::Fields(vec![("id", json!(201))]))
            .check(&response(201, r#"{"title":"x"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            Mismatch::Field {
                field: "id",
                expected: json!(201),
                actual: None
            }
        );
    }

    #[test]
    fn each_item_names_first_offender() {
        let expect = Expectation::status(200).with_body(BodyShape::EachItem {
            field: "userId",
            value: json!(2),
        });
        assert!(expect.check(&response(200, "[]")).is_ok());
        let err = expect
            .check(&response(200, r#"[{"userId":2},{"userId":3}]"#))
            .unwrap_err();
        assert!(matches!(err, Mismatch::Item { index: 1, .. }));
    }

    #[test]
    fn non_json_body_is_reported() {
        let err = Expectation::status(200)
            .with_body(BodyShape::Length(200))
            .check(&response(200, "<html>"))
            .unwrap_err();
        assert!(matches!(err, Mismatch::NotJson(_)));
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let body = "я".repeat(BODY_EXCERPT + 10);
        let short = excerpt(&body);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), BODY_EXCERPT + 3);
    }
}

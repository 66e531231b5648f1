//! Row-image comparison for dirty-write detection
//!
//! Before trusting a cached before-image for compensation, the rollback
//! path re-reads the current rows and compares them against the recorded
//! after-image. Any difference means someone outside the global
//! transaction touched the rows, and compensation must stop.
//!
//! # Verdicts
//!
//! - **Equal**: same primary-key row set, every matched field equal under
//!   type-aware value equality
//! - **Unequal**: a concrete first difference, carried as text
//! - **Incomparable**: the images cover different tables; comparing them
//!   is a caller bug, not a data difference
//!
//! Fields are matched by column name, order-insensitive within a row.
//! Rows are matched by primary-key signature; rows without primary-key
//! fields are matched positionally as a whole.

use ramus_core::{Row, RowImage};
use std::collections::HashMap;

/// Result of comparing two row images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCompare {
    /// The images describe the same row set with equal values
    Equal,
    /// The images differ; `detail` spells out the first difference found
    Unequal {
        /// Human-readable first difference
        detail: String,
    },
    /// The images cover different tables and cannot be meaningfully compared
    Incomparable {
        /// Human-readable reason
        detail: String,
    },
}

impl ImageCompare {
    /// Whether the verdict is `Equal`.
    pub fn is_equal(&self) -> bool {
        matches!(self, ImageCompare::Equal)
    }
}

/// Compare two row images field by field.
///
/// Pure: neither image is mutated. Attached table metadata is ignored;
/// only captured names, roles and values participate.
pub fn compare_images(a: &RowImage, b: &RowImage) -> ImageCompare {
    if !a.table_name().eq_ignore_ascii_case(b.table_name()) {
        return ImageCompare::Incomparable {
            detail: format!(
                "images cover different tables: {} vs {}",
                a.table_name(),
                b.table_name()
            ),
        };
    }

    if a.row_count() != b.row_count() {
        return ImageCompare::Unequal {
            detail: format!(
                "row count differs: {} vs {}",
                a.row_count(),
                b.row_count()
            ),
        };
    }

    // Split both sides into keyed rows (matched by primary-key signature)
    // and unkeyed rows (matched positionally).
    let (keyed_a, unkeyed_a) = split_by_signature(a.rows());
    let (keyed_b, mut unkeyed_b_iter) = {
        let (keyed, unkeyed) = split_by_signature(b.rows());
        (keyed, unkeyed.into_iter())
    };

    if keyed_a.len() != keyed_b.len() {
        return ImageCompare::Unequal {
            detail: format!(
                "keyed row count differs: {} vs {}",
                keyed_a.len(),
                keyed_b.len()
            ),
        };
    }

    for (sig, row_a) in &keyed_a {
        let Some(row_b) = keyed_b.get(sig) else {
            return ImageCompare::Unequal {
                detail: format!("row [{}] present on one side only", sig),
            };
        };
        if let Some(detail) = row_difference(sig, row_a, row_b) {
            return ImageCompare::Unequal { detail };
        }
    }

    for (idx, row_a) in unkeyed_a.iter().enumerate() {
        // Counts line up: total and keyed counts were both checked.
        let Some(row_b) = unkeyed_b_iter.next() else {
            return ImageCompare::Unequal {
                detail: format!("unkeyed row #{} present on one side only", idx),
            };
        };
        let label = format!("#{}", idx);
        if let Some(detail) = row_difference(&label, row_a, row_b) {
            return ImageCompare::Unequal { detail };
        }
    }

    ImageCompare::Equal
}

fn split_by_signature(rows: &[Row]) -> (HashMap<String, &Row>, Vec<&Row>) {
    let mut keyed = HashMap::new();
    let mut unkeyed = Vec::new();
    for row in rows {
        match row.pk_signature() {
            Some(sig) => {
                keyed.insert(sig, row);
            }
            None => unkeyed.push(row),
        }
    }
    (keyed, unkeyed)
}

/// First difference between two rows matched as the same logical row,
/// or `None` when they are equal.
fn row_difference(label: &str, a: &Row, b: &Row) -> Option<String> {
    if a.len() != b.len() {
        return Some(format!(
            "row [{}]: field count differs ({} vs {})",
            label,
            a.len(),
            b.len()
        ));
    }

    for field_a in a.fields() {
        let Some(field_b) = b.field(field_a.name()) else {
            return Some(format!(
                "row [{}]: field {} present on one side only",
                label,
                field_a.name()
            ));
        };

        let va = field_a.value();
        let vb = field_b.value();
        if va != vb {
            if va.type_name() != vb.type_name() {
                return Some(format!(
                    "row [{}]: field {} type differs ({} vs {})",
                    label,
                    field_a.name(),
                    va.type_name(),
                    vb.type_name()
                ));
            }
            return Some(format!(
                "row [{}]: field {} differs ({} vs {})",
                label,
                field_a.name(),
                va,
                vb
            ));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramus_core::{Field, FieldValue, SqlType, Timestamp};

    fn user_row(id: i64, name: &str, age: i64) -> Row {
        Row::with_fields(vec![
            Field::primary_key("id", SqlType::BigInt, FieldValue::Int(id)),
            Field::normal("name", SqlType::Varchar, FieldValue::from(name)),
            Field::normal("age", SqlType::Integer, FieldValue::Int(age)),
        ])
    }

    fn users(rows: Vec<Row>) -> RowImage {
        RowImage::new("users", rows)
    }

    #[test]
    fn test_identical_images_equal() {
        let a = users(vec![user_row(1, "a", 30), user_row(2, "b", 40)]);
        let b = users(vec![user_row(1, "a", 30), user_row(2, "b", 40)]);
        assert!(compare_images(&a, &b).is_equal());
    }

    #[test]
    fn test_row_order_does_not_matter_for_keyed_rows() {
        let a = users(vec![user_row(1, "a", 30), user_row(2, "b", 40)]);
        let b = users(vec![user_row(2, "b", 40), user_row(1, "a", 30)]);
        assert!(compare_images(&a, &b).is_equal());
    }

    #[test]
    fn test_field_order_does_not_matter_within_row() {
        let a = users(vec![user_row(1, "a", 30)]);
        let reordered = Row::with_fields(vec![
            Field::normal("age", SqlType::Integer, FieldValue::Int(30)),
            Field::primary_key("id", SqlType::BigInt, FieldValue::Int(1)),
            Field::normal("name", SqlType::Varchar, FieldValue::from("a")),
        ]);
        let b = users(vec![reordered]);
        assert!(compare_images(&a, &b).is_equal());
    }

    #[test]
    fn test_different_tables_incomparable() {
        let a = users(vec![user_row(1, "a", 30)]);
        let b = RowImage::new("orders", vec![user_row(1, "a", 30)]);

        let verdict = compare_images(&a, &b);
        assert!(matches!(verdict, ImageCompare::Incomparable { .. }));
        if let ImageCompare::Incomparable { detail } = verdict {
            assert!(detail.contains("users"));
            assert!(detail.contains("orders"));
        }
    }

    #[test]
    fn test_table_name_comparison_is_case_insensitive() {
        let a = RowImage::new("Users", vec![user_row(1, "a", 30)]);
        let b = RowImage::new("USERS", vec![user_row(1, "a", 30)]);
        assert!(compare_images(&a, &b).is_equal());
    }

    #[test]
    fn test_row_count_mismatch_unequal() {
        let a = users(vec![user_row(1, "a", 30), user_row(2, "b", 40)]);
        let b = users(vec![user_row(1, "a", 30)]);

        let verdict = compare_images(&a, &b);
        assert!(matches!(verdict, ImageCompare::Unequal { .. }));
        if let ImageCompare::Unequal { detail } = verdict {
            assert!(detail.contains("row count"));
        }
    }

    #[test]
    fn test_missing_keyed_row_unequal() {
        let a = users(vec![user_row(1, "a", 30), user_row(2, "b", 40)]);
        let b = users(vec![user_row(1, "a", 30), user_row(3, "c", 50)]);

        let verdict = compare_images(&a, &b);
        assert!(matches!(verdict, ImageCompare::Unequal { .. }));
    }

    #[test]
    fn test_value_difference_reported_with_field_name() {
        let a = users(vec![user_row(1, "a", 30)]);
        let b = users(vec![user_row(1, "a", 31)]);

        match compare_images(&a, &b) {
            ImageCompare::Unequal { detail } => {
                assert!(detail.contains("age"), "detail was: {}", detail);
                assert!(detail.contains("30"));
                assert!(detail.contains("31"));
            }
            other => panic!("expected Unequal, got {:?}", other),
        }
    }

    #[test]
    fn test_cross_type_values_unequal_even_when_rendering_same() {
        let int_row = Row::with_fields(vec![
            Field::primary_key("id", SqlType::BigInt, FieldValue::Int(1)),
            Field::normal("v", SqlType::Numeric, FieldValue::Int(1)),
        ]);
        let float_row = Row::with_fields(vec![
            Field::primary_key("id", SqlType::BigInt, FieldValue::Int(1)),
            Field::normal("v", SqlType::Numeric, FieldValue::Float(1.0)),
        ]);

        match compare_images(&users(vec![int_row]), &users(vec![float_row])) {
            ImageCompare::Unequal { detail } => {
                assert!(detail.contains("type differs"), "detail was: {}", detail);
                assert!(detail.contains("Int"));
                assert!(detail.contains("Float"));
            }
            other => panic!("expected Unequal, got {:?}", other),
        }
    }

    #[test]
    fn test_null_equals_null() {
        let null_row = || {
            Row::with_fields(vec![
                Field::primary_key("id", SqlType::BigInt, FieldValue::Int(1)),
                Field::normal("note", SqlType::Varchar, FieldValue::Null),
            ])
        };
        assert!(compare_images(&users(vec![null_row()]), &users(vec![null_row()])).is_equal());
    }

    #[test]
    fn test_timestamp_fields_compare_by_instant() {
        let with_ts = |ts: Timestamp| {
            Row::with_fields(vec![
                Field::primary_key("id", SqlType::BigInt, FieldValue::Int(1)),
                Field::normal("gmt_create", SqlType::Timestamp, FieldValue::Timestamp(ts)),
            ])
        };

        let a = users(vec![with_ts(Timestamp::from_millis(1_500))]);
        let b = users(vec![with_ts(Timestamp::from_parts(1, 500_000_000))]);
        assert!(compare_images(&a, &b).is_equal());

        let c = users(vec![with_ts(Timestamp::from_parts(1, 500_000_001))]);
        assert!(!compare_images(&a, &c).is_equal());
    }

    #[test]
    fn test_extra_field_unequal() {
        let a = users(vec![user_row(1, "a", 30)]);
        let mut wide = user_row(1, "a", 30);
        wide.add(Field::normal("extra", SqlType::Varchar, FieldValue::Null));
        let b = users(vec![wide]);

        match compare_images(&a, &b) {
            ImageCompare::Unequal { detail } => assert!(detail.contains("field count")),
            other => panic!("expected Unequal, got {:?}", other),
        }
    }

    #[test]
    fn test_unkeyed_rows_match_positionally() {
        let note = |text: &str| {
            Row::with_fields(vec![Field::normal(
                "note",
                SqlType::Varchar,
                FieldValue::from(text),
            )])
        };

        let a = RowImage::new("audit_log", vec![note("x"), note("y")]);
        let b = RowImage::new("audit_log", vec![note("x"), note("y")]);
        assert!(compare_images(&a, &b).is_equal());

        let c = RowImage::new("audit_log", vec![note("y"), note("x")]);
        assert!(!compare_images(&a, &c).is_equal());
    }

    #[test]
    fn test_empty_images_equal() {
        let a = RowImage::new("users", vec![]);
        let b = RowImage::new("users", vec![]);
        assert!(compare_images(&a, &b).is_equal());
    }

    #[test]
    fn test_comparison_does_not_consume_inputs() {
        let a = users(vec![user_row(1, "a", 30)]);
        let b = users(vec![user_row(1, "a", 30)]);

        assert!(compare_images(&a, &b).is_equal());
        // Inputs are still whole afterwards
        assert_eq!(a.row_count(), 1);
        assert_eq!(b.row_count(), 1);
        assert!(compare_images(&a, &b).is_equal());
    }
}

//! Column-wise evaluation of `accweekdays` over Arrow data.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, FieldRef, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use chrono::TimeZone;

use crate::error::AccWeekdaysError;
use crate::weekdays::accweekdays;

/// Names of the input columns and of the appended result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub start: String,
    pub end: String,
    pub output: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            start: "start_ts".to_string(),
            end: "end_ts".to_string(),
            output: "weekday_seconds".to_string(),
        }
    }
}

/// Evaluate row by row. Null inputs and reversed intervals produce null.
pub fn accweekdays_array<Tz: TimeZone>(
    start: &Int64Array,
    end: &Int64Array,
    tz: &Tz,
) -> Result<Int64Array, AccWeekdaysError> {
    if start.len() != end.len() {
        return Err(AccWeekdaysError::InvalidData(format!(
            "column length mismatch: start has {} rows, end has {}",
            start.len(),
            end.len()
        )));
    }

    Ok(start
        .iter()
        .zip(end.iter())
        .map(|(s, e)| accweekdays(s, e, tz))
        .collect())
}

/// Schema of `input` with the nullable `Int64` result column appended.
pub fn output_schema(
    input: &Schema,
    mapping: &ColumnMapping,
) -> Result<SchemaRef, AccWeekdaysError> {
    if input.column_with_name(&mapping.output).is_some() {
        return Err(AccWeekdaysError::InvalidData(format!(
            "output column '{}' already exists",
            mapping.output
        )));
    }

    for name in [&mapping.start, &mapping.end] {
        let field = input
            .field_with_name(name)
            .map_err(|_| AccWeekdaysError::InvalidData(format!("missing column '{name}'")))?;
        if !field.data_type().is_integer() {
            return Err(AccWeekdaysError::InvalidData(format!(
                "column '{name}' must be an integer type, found {}",
                field.data_type()
            )));
        }
    }

    let mut fields: Vec<FieldRef> = input.fields().iter().cloned().collect();
    fields.push(Arc::new(Field::new(&mapping.output, DataType::Int64, true)));
    Ok(Arc::new(Schema::new_with_metadata(
        fields,
        input.metadata().clone(),
    )))
}

/// Return `batch` with the `accweekdays` result appended as a new column.
pub fn append_weekday_seconds<Tz: TimeZone>(
    batch: &RecordBatch,
    mapping: &ColumnMapping,
    tz: &Tz,
) -> Result<RecordBatch, AccWeekdaysError> {
    let schema = output_schema(batch.schema().as_ref(), mapping)?;
    append_with_schema(batch, &schema, mapping, tz)
}

/// Like [`append_weekday_seconds`], with `schema` already built by
/// [`output_schema`] for the batch's schema.
pub fn append_with_schema<Tz: TimeZone>(
    batch: &RecordBatch,
    schema: &SchemaRef,
    mapping: &ColumnMapping,
    tz: &Tz,
) -> Result<RecordBatch, AccWeekdaysError> {
    let start = int64_column(batch, &mapping.start)?;
    let end = int64_column(batch, &mapping.end)?;
    let result = accweekdays_array(downcast(&start)?, downcast(&end)?, tz)?;

    let mut columns = batch.columns().to_vec();
    columns.push(Arc::new(result));
    Ok(RecordBatch::try_new(schema.clone(), columns)?)
}

fn int64_column(batch: &RecordBatch, name: &str) -> Result<ArrayRef, AccWeekdaysError> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| AccWeekdaysError::InvalidData(format!("missing column '{name}'")))?;
    Ok(cast(column, &DataType::Int64)?)
}

fn downcast(array: &ArrayRef) -> Result<&Int64Array, AccWeekdaysError> {
    array
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| AccWeekdaysError::InvalidData("expected Int64 column".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int32Array, StringArray};
    use chrono::Utc;
    use chrono_tz::America::New_York;

    fn intervals(start: Vec<Option<i64>>, end: Vec<Option<i64>>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("start_ts", DataType::Int64, true),
            Field::new("end_ts", DataType::Int64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(start)),
                Arc::new(Int64Array::from(end)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn array_propagates_nulls() {
        let start = Int64Array::from(vec![
            Some(1_452_149_997),
            None,
            Some(1_452_150_015),
            Some(1_452_149_997),
        ]);
        let end = Int64Array::from(vec![
            Some(1_452_150_015),
            Some(1_452_150_015),
            Some(1_452_149_997),
            None,
        ]);

        let result = accweekdays_array(&start, &end, &Utc).unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result.value(0), 18);
        assert!(result.is_null(1));
        assert!(result.is_null(2));
        assert!(result.is_null(3));
    }

    #[test]
    fn array_length_mismatch() {
        let start = Int64Array::from(vec![1, 2]);
        let end = Int64Array::from(vec![3]);
        assert!(matches!(
            accweekdays_array(&start, &end, &Utc),
            Err(AccWeekdaysError::InvalidData(_))
        ));
    }

    #[test]
    fn append_adds_nullable_column() {
        let batch = intervals(
            vec![Some(1_452_149_997), None],
            vec![Some(1_452_150_015), Some(0)],
        );
        let out = append_weekday_seconds(&batch, &ColumnMapping::default(), &Utc).unwrap();

        assert_eq!(out.num_columns(), 3);
        let field = out.schema().field(2).clone();
        assert_eq!(field.name(), "weekday_seconds");
        assert_eq!(field.data_type(), &DataType::Int64);
        assert!(field.is_nullable());

        let values = out
            .column(2)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(values.value(0), 18);
        assert!(values.is_null(1));
    }

    #[test]
    fn append_uses_zone() {
        // Friday 22:00-23:00 EST, Saturday in UTC
        let batch = intervals(vec![Some(1_737_169_200)], vec![Some(1_737_172_800)]);
        let mapping = ColumnMapping::default();

        let utc = append_weekday_seconds(&batch, &mapping, &Utc).unwrap();
        let ny = append_weekday_seconds(&batch, &mapping, &New_York).unwrap();
        let value = |b: &RecordBatch| {
            b.column(2)
                .as_any()
                .downcast_ref::<Int64Array>()
                .unwrap()
                .value(0)
        };
        assert_eq!(value(&utc), 0);
        assert_eq!(value(&ny), 3_600);
    }

    #[test]
    fn append_casts_narrow_integers() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("s", DataType::Int32, false),
            Field::new("e", DataType::Int32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![1_452_149_997])),
                Arc::new(Int32Array::from(vec![1_452_150_015])),
            ],
        )
        .unwrap();
        let mapping = ColumnMapping {
            start: "s".into(),
            end: "e".into(),
            output: "secs".into(),
        };

        let out = append_weekday_seconds(&batch, &mapping, &Utc).unwrap();
        let values = out
            .column_by_name("secs")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(values.value(0), 18);
    }

    #[test]
    fn append_with_prebuilt_schema() {
        let mapping = ColumnMapping::default();
        let first = intervals(vec![Some(1_452_149_997)], vec![Some(1_452_150_015)]);
        let second = intervals(vec![None], vec![Some(1_452_150_015)]);
        let schema = output_schema(first.schema().as_ref(), &mapping).unwrap();

        for batch in [&first, &second] {
            let out = append_with_schema(batch, &schema, &mapping, &Utc).unwrap();
            assert!(Arc::ptr_eq(&out.schema(), &schema));
            assert_eq!(out.num_columns(), 3);
        }
    }

    #[test]
    fn missing_input_column() {
        let batch = intervals(vec![Some(0)], vec![Some(1)]);
        let mapping = ColumnMapping {
            start: "begin".into(),
            ..ColumnMapping::default()
        };
        let err = append_weekday_seconds(&batch, &mapping, &Utc).unwrap_err();
        assert!(err.to_string().contains("missing column 'begin'"));
    }

    #[test]
    fn existing_output_column() {
        let batch = intervals(vec![Some(0)], vec![Some(1)]);
        let mapping = ColumnMapping {
            output: "end_ts".into(),
            ..ColumnMapping::default()
        };
        let err = append_weekday_seconds(&batch, &mapping, &Utc).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn non_integer_input_column() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("start_ts", DataType::Utf8, false),
            Field::new("end_ts", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["1452149997"])),
                Arc::new(Int64Array::from(vec![1_452_150_015])),
            ],
        )
        .unwrap();
        let err = append_weekday_seconds(&batch, &ColumnMapping::default(), &Utc).unwrap_err();
        assert!(err.to_string().contains("must be an integer type"));
    }
}

use std::path::Path;

use arrow::array::Array;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use chrono::TimeZone;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::AccWeekdaysError;
use crate::kernel::{self, ColumnMapping};

/// Row counts from an [`apply_parquet`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplySummary {
    pub rows: usize,
    pub null_rows: usize,
}

pub fn read_parquet(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>), AccWeekdaysError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

fn writer_properties() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

pub fn write_parquet(
    path: &Path,
    schema: SchemaRef,
    batches: &[RecordBatch],
) -> Result<(), AccWeekdaysError> {
    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(writer_properties()))?;
    for batch in batches {
        writer.write(batch)?;
    }
    writer.close()?;

    Ok(())
}

/// Read `input`, append the weekday-seconds column and write `output`.
///
/// Batches are streamed from reader to writer one at a time.
pub fn apply_parquet<Tz: TimeZone>(
    input: &Path,
    output: &Path,
    mapping: &ColumnMapping,
    tz: &Tz,
) -> Result<ApplySummary, AccWeekdaysError> {
    let file = std::fs::File::open(input)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let out_schema = kernel::output_schema(builder.schema(), mapping)?;
    let reader = builder.build()?;

    let out_file = std::fs::File::create(output)?;
    let mut writer =
        ArrowWriter::try_new(out_file, out_schema.clone(), Some(writer_properties()))?;

    let mut summary = ApplySummary::default();
    for batch in reader {
        let out = kernel::append_with_schema(&batch?, &out_schema, mapping, tz)?;
        summary.rows += out.num_rows();
        summary.null_rows += out.column(out.num_columns() - 1).null_count();
        writer.write(&out)?;
    }
    writer.close()?;

    info!(
        "{}: wrote {} row(s), {} null, to {}",
        input.display(),
        summary.rows,
        summary.null_rows,
        output.display()
    );

    Ok(summary)
}

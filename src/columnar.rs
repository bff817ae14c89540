use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;

use crate::{error::Result, parse::Records};

/// Arrow schema for `records`: one nullable Utf8 field per header entry.
pub fn schema_for(records: &Records) -> Schema {
    Schema::new(
        records
            .header()
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    )
}

/// Lay `records` out column by column. Fields a record does not carry are null.
pub fn to_record_batch(records: &Records) -> Result<RecordBatch> {
    let schema = Arc::new(schema_for(records));

    let cols: Vec<ArrayRef> = records
        .header()
        .iter()
        .map(|name| {
            let values: StringArray = records.iter().map(|r| r.get(name)).collect();
            Arc::new(values) as ArrayRef
        })
        .collect();

    // row count must be explicit when the header is empty
    let options = RecordBatchOptions::new().with_row_count(Some(records.len()));
    let batch = RecordBatch::try_new_with_options(schema, cols, &options)?;
    Ok(batch)
}

//! Long and wide tabular views of Frost observations.

use crate::observations::response::ObservationRow;
use polars::prelude::*;
use std::collections::BTreeSet;

pub const TIME_COLUMN: &str = "time";
pub const SOURCE_COLUMN: &str = "source";
pub const ELEMENT_COLUMN: &str = "element";
pub const VALUE_COLUMN: &str = "value";
pub const UNIT_COLUMN: &str = "unit";

/// One row per observed value: `time, source, element, value, unit`.
///
/// `time` is a millisecond `Datetime` holding UTC instants.
pub fn rows_to_frame(rows: &[ObservationRow]) -> PolarsResult<DataFrame> {
    let millis: Vec<i64> = rows.iter().map(|r| r.time.timestamp_millis()).collect();
    let time = Series::new(TIME_COLUMN.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    let sources: Vec<&str> = rows.iter().map(|r| r.source.as_str()).collect();
    let elements: Vec<&str> = rows.iter().map(|r| r.element.as_str()).collect();
    let values: Vec<Option<f64>> = rows.iter().map(|r| r.value).collect();
    let units: Vec<Option<&str>> = rows.iter().map(|r| r.unit.as_deref()).collect();

    DataFrame::new(vec![
        time.into(),
        Column::new(SOURCE_COLUMN.into(), sources),
        Column::new(ELEMENT_COLUMN.into(), elements),
        Column::new(VALUE_COLUMN.into(), values),
        Column::new(UNIT_COLUMN.into(), units),
    ])
}

/// Distinct element ids in a long frame, sorted.
pub fn element_names(long: &DataFrame) -> PolarsResult<Vec<String>> {
    let names: BTreeSet<String> = long
        .column(ELEMENT_COLUMN)?
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    Ok(names.into_iter().collect())
}

/// Turns a long frame into one row per timestamp and one column per element.
///
/// Several values for the same `(time, element)` (e.g. from different sensors) are
/// averaged. Rows are sorted by time.
pub fn pivot_elements(long: &DataFrame) -> PolarsResult<LazyFrame> {
    let aggregations: Vec<Expr> = element_names(long)?
        .iter()
        .map(|element| {
            col(VALUE_COLUMN)
                .filter(col(ELEMENT_COLUMN).eq(lit(element.as_str())))
                .mean()
                .alias(element.as_str())
        })
        .collect();

    Ok(long
        .clone()
        .lazy()
        .group_by([col(TIME_COLUMN)])
        .agg(aggregations)
        .sort([TIME_COLUMN], SortMultipleOptions::default()))
}

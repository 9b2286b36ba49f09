use std::io::Write;

use crate::AmrError;

use super::super::Grid;

/// Writes a grid as delimiter-separated values with a header row.
///
/// Fields containing the delimiter, quotes or line breaks are quoted.
pub fn write_delimited_format<W: Write>(
    writer: &mut W,
    grid: &Grid,
    delimiter: u8,
) -> Result<(), AmrError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record(&grid.header)?;
    for row in &grid.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

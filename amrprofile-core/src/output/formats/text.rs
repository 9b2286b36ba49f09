use std::io::Write;

use crate::AmrError;

use super::super::Grid;

/// Writes a grid as left-aligned, space-padded columns.
pub fn write_text_format<W: Write>(writer: &mut W, grid: &Grid) -> Result<(), AmrError> {
    let mut widths: Vec<usize> = grid.header.iter().map(|h| h.chars().count()).collect();
    for row in &grid.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_aligned_line(writer, &grid.header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    write_aligned_line(writer, &rule, &widths)?;
    for row in &grid.rows {
        write_aligned_line(writer, row, &widths)?;
    }
    Ok(())
}

fn write_aligned_line<W: Write>(
    writer: &mut W,
    cells: &[String],
    widths: &[usize],
) -> Result<(), AmrError> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}

use crate::presentation::ConsoleRenderer;
use crate::presentation::presenters;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use swingtrace_engine::{SAMPLE_COLUMNS, export_rows};
use swingtrace_index::Database;

/// CSV goes to stdout unless `output` is given; only the file case renders a
/// report, so stdout stays pipeable in either format.
pub fn handle(
    db: &Database,
    prefix: &str,
    output: Option<&Path>,
    renderer: &ConsoleRenderer,
) -> Result<()> {
    let movement = super::load_movement(db, prefix)?;
    let rows = export_rows(&movement);

    match output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_rows(&mut writer, &rows)?;
            renderer.render(presenters::present_export(
                &movement,
                path.to_path_buf(),
                rows.len(),
            ))
        }
        None => {
            let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
            write_rows(&mut writer, &rows)
        }
    }
}

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, rows: &[Vec<String>]) -> Result<()> {
    writer.write_record(SAMPLE_COLUMNS)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingtrace_testing::fixtures;

    #[test]
    fn test_write_rows_emits_header_then_samples() {
        let session = fixtures::recorded_session(1, 3);
        let rows = export_rows(&session.movements()[0]);

        let mut writer = csv::Writer::from_writer(Vec::new());
        write_rows(&mut writer, &rows).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], SAMPLE_COLUMNS.join(","));
    }
}

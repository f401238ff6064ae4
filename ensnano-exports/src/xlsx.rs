/*
ENSnano, a 3d graphical application for DNA nanostructures.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use super::{ExportError, ExportResult, ExportSuccess};
use ensnano_sequence::SequencedComponent;
use simple_excel_writer::{row, Row, Workbook};
use std::path::Path;

const SHEET_NAME: &str = "Staples";

/// Write one row per staple to a spreadsheet at `path`.
pub fn export_staples_xlsx<P: AsRef<Path>>(
    staples: &[SequencedComponent],
    path: P,
) -> ExportResult {
    let path = path.as_ref().to_path_buf();
    let path_str = path
        .to_str()
        .ok_or_else(|| ExportError::InvalidPath(path.clone()))?;
    log::info!("Outputting staples to {}...", path_str);

    let rows: Vec<_> = staples
        .iter()
        .enumerate()
        .filter_map(|(i, staple)| {
            let start = staple.start()?;
            let end = staple.end()?;
            let strs = [
                format!("Staple {}", i),
                start.to_string(),
                end.to_string(),
                staple.sequence(),
            ];
            Some((strs, staple.len() as f64))
        })
        .collect();

    let mut wb = Workbook::create(path_str);
    let mut sheet = wb.create_sheet(SHEET_NAME);
    wb.write_sheet(&mut sheet, |sw| {
        sw.append_row(row!["Name", "Start", "End", "Sequence", "Length"])?;
        for (strs, length) in rows.iter() {
            sw.append_row(row![
                strs[0].as_str(),
                strs[1].as_str(),
                strs[2].as_str(),
                strs[3].as_str(),
                *length
            ])?;
        }
        Ok(())
    })?;
    wb.close()?;
    Ok(ExportSuccess::Xlsx(path))
}

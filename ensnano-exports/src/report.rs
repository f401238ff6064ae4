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
use super::ReportView;
use ensnano_sequence::{NetworkKind, SequencedComponent};
use std::io::Write;

const SUMMARY_HEADER: &str = "Start,End,Sequence,Length";

/// Render `components` in the given view.
///
/// In the summary view, strands without any base are skipped.
pub fn write_report<W: Write>(
    components: &[SequencedComponent],
    network: NetworkKind,
    view: ReportView,
    out: &mut W,
) -> std::io::Result<()> {
    match view {
        ReportView::Detailed => write_detailed(components, network, out),
        ReportView::Summary => write_summary(components, out),
    }
}

fn write_detailed<W: Write>(
    components: &[SequencedComponent],
    network: NetworkKind,
    out: &mut W,
) -> std::io::Result<()> {
    for (i, component) in components.iter().enumerate() {
        writeln!(out, "{} {}:", network.label(), i)?;
        for base in component.bases.iter() {
            writeln!(
                out,
                "[{}, {}, '{}']",
                base.coordinate.strand, base.coordinate.position, base.letter
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_summary<W: Write>(components: &[SequencedComponent], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", SUMMARY_HEADER)?;
    for component in components.iter() {
        if let (Some(start), Some(end)) = (component.start(), component.end()) {
            writeln!(
                out,
                "{},{},{},{}",
                start,
                end,
                component.sequence(),
                component.len()
            )?;
        }
    }
    Ok(())
}

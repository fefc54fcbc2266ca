use crate::config::Canvas;
use crate::layout::{MonthLabel, WeekdayLabel};
use crate::render::RenderedCalendar;
use crate::stats::ContributionStats;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct CalendarDump {
    pub mode: String,
    pub cols: usize,
    pub rows: usize,
    pub reference: Option<NaiveDate>,
    pub canvas: Canvas,
    pub stats: ContributionStats,
    pub cells: Vec<CellDump>,
    pub month_labels: Vec<MonthLabel>,
    pub weekday_labels: Vec<WeekdayLabel>,
    pub commands: usize,
}

#[derive(Debug, Serialize)]
pub struct CellDump {
    pub col: usize,
    pub row: usize,
    pub date: Option<NaiveDate>,
    pub count: u32,
    pub is_future: bool,
    pub level: Option<u8>,
    pub x: f32,
    pub y: f32,
}

impl CalendarDump {
    pub fn from_rendered(rendered: &RenderedCalendar) -> Self {
        let rows = rendered.grid.rows.max(1);
        let cells = rendered
            .cells
            .iter()
            .zip(&rendered.levels)
            .zip(&rendered.layout.positions)
            .enumerate()
            .map(|(idx, ((cell, level), (x, y)))| CellDump {
                col: idx / rows,
                row: idx % rows,
                date: cell.date,
                count: cell.count,
                is_future: cell.is_future,
                level: *level,
                x: *x,
                y: *y,
            })
            .collect();

        CalendarDump {
            mode: rendered.mode.as_str().to_string(),
            cols: rendered.grid.cols,
            rows: rendered.grid.rows,
            reference: rendered.reference,
            canvas: rendered.layout.canvas,
            stats: rendered.stats,
            cells,
            month_labels: rendered.layout.month_labels.clone(),
            weekday_labels: rendered.layout.weekday_labels.clone(),
            commands: rendered.scene.commands.len(),
        }
    }
}

pub fn write_layout_dump(path: &Path, rendered: &RenderedCalendar) -> anyhow::Result<()> {
    let dump = CalendarDump::from_rendered(rendered);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::ir::{ContributionDay, VisualMode};
    use crate::render::prepare_calendar;
    use crate::theme::ThemeStyle;

    #[test]
    fn dump_lists_every_cell_in_grid_order() {
        let series = vec![
            ContributionDay::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), 3),
            ContributionDay::new(NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(), 0),
        ];
        let config = RenderConfig {
            today: NaiveDate::from_ymd_opt(2024, 6, 11),
            ..Default::default()
        };
        let rendered =
            prepare_calendar(&series, None, &ThemeStyle::default(), VisualMode::Default, &config)
                .unwrap();
        let dump = CalendarDump::from_rendered(&rendered);
        assert_eq!(dump.cells.len(), 52 * 7);
        assert_eq!(dump.mode, "default");

        // 2024-06-10 is a Monday in the last week.
        let monday = &dump.cells[51 * 7 + 1];
        assert_eq!((monday.col, monday.row), (51, 1));
        assert_eq!(monday.count, 3);
        assert_eq!(monday.level, Some(4));

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["stats"]["total"], 3);
        assert_eq!(json["reference"], "2024-06-11");
    }
}

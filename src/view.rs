//! Text rendering of a [`FullReport`].

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::metrics::{format_duration, DurationUnit, FullReport};

const MIN_COLUMN_WIDTH: usize = 8;
const SEPARATOR: &str = " | ";

/// Output format of the report command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

/// Render `report` as aligned text tables.
///
/// Week and project totals use `total_unit` without suffix; averages always
/// use the automatic unit with suffix.
pub fn render_report_table<W: Write>(
    w: &mut W,
    report: &FullReport,
    total_unit: DurationUnit,
) -> io::Result<()> {
    if let Some(period) = period_line(report) {
        writeln!(w, "{}", period)?;
    }

    let total_header = format!("Total ({})", total_unit.label());

    for project in &report.projects {
        writeln!(w)?;
        writeln!(w, "Project : {}", project.name)?;

        let body: Vec<[String; 4]> = project
            .weeks
            .iter()
            .map(|week| {
                [
                    week.week_label.clone(),
                    format_duration(week.stats.total_duration, total_unit, false),
                    format_duration(week.avg_duration, DurationUnit::Auto, true),
                    week.stats.count.to_string(),
                ]
            })
            .collect();
        let footer = [
            "Total".to_string(),
            format_duration(project.total_duration, total_unit, false),
            "-".to_string(),
            project.total_builds.to_string(),
        ];
        let header = [
            "Week".to_string(),
            total_header.clone(),
            "Average (auto)".to_string(),
            "Builds".to_string(),
        ];
        write_table(w, &header, &body, &footer)?;
    }

    writeln!(w)?;
    writeln!(w, "Overall")?;
    let header = [
        String::new(),
        total_header,
        "Average".to_string(),
        "Builds".to_string(),
    ];
    let footer = [
        "Total".to_string(),
        format_duration(report.global_duration, total_unit, false),
        "-".to_string(),
        report.global_builds.to_string(),
    ];
    write_table(w, &header, &[], &footer)
}

/// Render `report` as pretty-printed JSON followed by a newline.
pub fn render_report_json<W: Write>(w: &mut W, report: &FullReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)
}

fn period_line(report: &FullReport) -> Option<String> {
    let options = &report.options;
    let mut parts = Vec::new();
    if let Some(since) = options.since {
        parts.push(format!("since {}", since.format("%Y-%m-%d")));
    }
    if let Some(until) = options.until {
        parts.push(format!("until {}", until.format("%Y-%m-%d")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Period: {}", parts.join(" ")))
    }
}

fn write_table<W: Write>(
    w: &mut W,
    header: &[String; 4],
    body: &[[String; 4]],
    footer: &[String; 4],
) -> io::Result<()> {
    let mut widths = [MIN_COLUMN_WIDTH; 4];
    for row in std::iter::once(header).chain(body).chain(std::iter::once(footer)) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }
    let rule_width = widths.iter().sum::<usize>() + SEPARATOR.len() * (widths.len() - 1);
    let heavy = "=".repeat(rule_width);
    let light = "-".repeat(rule_width);

    writeln!(w, "{}", heavy)?;
    write_row(w, header, &widths)?;
    writeln!(w, "{}", light)?;
    if !body.is_empty() {
        for row in body {
            write_row(w, row, &widths)?;
        }
        writeln!(w, "{}", light)?;
    }
    write_row(w, footer, &widths)?;
    writeln!(w, "{}", heavy)
}

fn write_row<W: Write>(w: &mut W, row: &[String; 4], widths: &[usize; 4]) -> io::Result<()> {
    let last = row.len() - 1;
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            line.push_str(SEPARATOR);
        }
        line.push_str(cell);
        if i < last {
            line.push_str(&" ".repeat(widths[i].saturating_sub(cell.width())));
        }
    }
    writeln!(w, "{}", line)
}

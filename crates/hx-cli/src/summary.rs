use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hx_cli::report::{AnalysisReport, MappingReport, MappingRow};
use hx_map::{AliasTable, SimilarityScore};
use hx_metrics::CleaningSchedule;
use hx_model::CanonicalField;

use crate::commands::ProjectResult;

pub fn print_mapping_report(report: &MappingReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Required"),
        header_cell("Header"),
        header_cell("Column"),
        header_cell("Confidence"),
        header_cell("Level"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for field in CanonicalField::ALL {
        let row = report.mappings.iter().find(|m| m.canonical_field == field);
        table.add_row(mapping_row(field, row));
    }
    println!("{table}");

    let summary = &report.summary;
    println!(
        "Mapped {}/{} fields ({}/{} required)",
        summary.mapped, summary.total_fields, summary.required_mapped, summary.required_total
    );
    if !report.levels.is_empty() {
        let levels: Vec<String> = report
            .levels
            .iter()
            .rev()
            .map(|(level, count)| format!("{count} {}", level.as_str()))
            .collect();
        println!("Confidence: {}", levels.join(", "));
    }
    if !report.unmapped_headers.is_empty() {
        println!("Unmapped headers: {}", report.unmapped_headers.join(", "));
    }
    match &report.message {
        Some(message) => eprintln!("{message}"),
        None => println!("All required fields mapped."),
    }
}

fn mapping_row(field: CanonicalField, row: Option<&MappingRow>) -> Vec<Cell> {
    let required = if field.is_required() {
        Cell::new("yes").fg(Color::Yellow)
    } else {
        dim_cell("no")
    };
    match row {
        Some(row) => vec![
            Cell::new(field.as_str()).add_attribute(Attribute::Bold),
            required,
            Cell::new(&row.source_header),
            Cell::new(row.source_index),
            Cell::new(format!("{:.2}", row.confidence)),
            level_cell(row.level),
        ],
        None => vec![
            Cell::new(field.as_str()),
            required,
            missing_cell(field),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ],
    }
}

pub fn print_score(left: &str, right: &str, score: &SimilarityScore) {
    println!("{left:?} vs {right:?}: {:.4}", score.value);
    println!("{}", score.explain());
}

pub fn print_fields(aliases: &AliasTable) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
        header_cell("Aliases"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in CanonicalField::ALL {
        let names = aliases.aliases(field);
        let alias_cell = if names.is_empty() {
            dim_cell("(never mapped)")
        } else {
            Cell::new(names.join(", "))
        };
        table.add_row(vec![
            Cell::new(field.as_str()).add_attribute(Attribute::Bold),
            Cell::new(field.label()),
            Cell::new(if field.is_required() { "yes" } else { "no" }),
            alias_cell,
        ]);
    }
    println!("{table}");
}

pub fn print_projection(result: &ProjectResult) {
    let Some(path) = &result.output else {
        return;
    };
    println!(
        "Wrote {} readings to {} ({} rows skipped)",
        result.readings,
        path.display(),
        result.skipped
    );
}

pub fn print_analysis(report: &AnalysisReport) {
    let metrics = &report.metrics;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Effectiveness"),
        Cell::new(format!("{:.1}%", metrics.effectiveness * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Fouling rate (m²K/W per reading)"),
        Cell::new(format!("{:.6}", metrics.fouling_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Overall U (W/m²K)"),
        Cell::new(format!("{:.2}", metrics.overall_heat_transfer_coeff)),
    ]);
    table.add_row(vec![
        Cell::new("Energy efficiency"),
        Cell::new(format!("{:.1}%", metrics.energy_efficiency)),
    ]);
    table.add_row(vec![
        Cell::new("Recommended cleaning (days)"),
        Cell::new(metrics.recommended_cleaning_days),
    ]);
    table.add_row(vec![
        Cell::new("System health").add_attribute(Attribute::Bold),
        health_cell(metrics.system_health_score),
    ]);
    println!("{table}");

    println!(
        "Analyzed {} readings ({} rows skipped)",
        report.readings, report.skipped
    );
    for insight in &report.insights {
        println!("- {insight}");
    }

    let forecast = &report.forecast;
    let schedule = forecast.cleaning_schedule.to_string();
    match forecast.cleaning_schedule {
        CleaningSchedule::Immediate => eprintln!("{schedule}"),
        _ => println!("{schedule}"),
    }
    println!(
        "Forecast confidence: {:.0}%",
        forecast.confidence_score * 100.0
    );
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn level_cell(level: Option<&str>) -> Cell {
    match level {
        Some(level @ "high") => Cell::new(level).fg(Color::Green),
        Some(level @ "medium") => Cell::new(level).fg(Color::Yellow),
        Some(level) => Cell::new(level).fg(Color::Red),
        None => dim_cell("-"),
    }
}

fn health_cell(score: f64) -> Cell {
    let color = if score > 80.0 {
        Color::Green
    } else if score > 60.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{score:.1}")).fg(color)
}

fn missing_cell(field: CanonicalField) -> Cell {
    if field.is_required() {
        Cell::new("missing")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("unmapped")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

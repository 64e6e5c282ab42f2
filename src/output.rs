use crate::error::Result;
use crate::types::{
    ExportDocument, ExportRow, FilteredView, PipelineOutput, Summary, Unit,
    ViewTableRow,
};
use crate::util::{format_cell, format_value};
use tabled::{settings::Style, Table};

pub fn table_rows(view: &FilteredView) -> Vec<ViewTableRow> {
    view.rows
        .iter()
        .enumerate()
        .map(|(idx, row)| ViewTableRow {
            rank: idx + 1,
            region: row.record.region.clone(),
            value: format_cell(row.value),
        })
        .collect()
}

pub fn render_table(view: &FilteredView) -> String {
    let rows = table_rows(view);
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows).with(Style::markdown()).to_string()
}

/// The two "most / least" sentences under the data table.
pub fn narrative(summary: &Summary, unit: Unit) -> Vec<String> {
    vec![
        format!(
            "- 選択した都道府県の中で{}が最も多いのは **{}**（{}{}）",
            summary.metric,
            summary.max.region,
            format_value(summary.max.value),
            unit.suffix()
        ),
        format!(
            "- 選択した都道府県の中で{}が最も少ないのは **{}**（{}{}）",
            summary.metric,
            summary.min.region,
            format_value(summary.min.value),
            unit.suffix()
        ),
    ]
}

pub fn print_output(out: &PipelineOutput) {
    println!("\n都道府県別 {}（多い順）  単位: {}\n", out.view.metric, out.unit.label());
    println!("{}\n", render_table(&out.view));
    match &out.summary {
        Some(summary) => {
            for line in narrative(summary, out.unit) {
                println!("{}", line);
            }
        }
        None => println!("(数値データがないため解説を省略します)"),
    }
    println!();
}

/// Pretty JSON for an external chart renderer.
pub fn to_json(out: &PipelineOutput) -> Result<String> {
    let doc = ExportDocument {
        metric: out.view.metric,
        unit: out.unit,
        unit_label: out.unit.label(),
        rows: out
            .view
            .rows
            .iter()
            .map(|r| ExportRow {
                region: &r.record.region,
                value: r.value,
            })
            .collect(),
        summary: out.summary.as_ref(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

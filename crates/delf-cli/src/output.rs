//! Rendering of results for the terminal.

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Cell, Table};
use serde::Serialize;

use delf_core::result::{EvaluationResult, Recommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_evaluation(result: &EvaluationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(result),
        OutputFormat::Table => {
            println!(
                "Score: {} / {} ({:.1}%)",
                result.score,
                result.max_score,
                result.percentage()
            );
            println!("\n{}", result.feedback);
            if !result.feedback_localized.is_empty() {
                println!("{}", result.feedback_localized);
            }

            if !result.corrections.is_empty() {
                let mut table = Table::new();
                table.set_header(vec!["Type", "Severity", "Original", "Correction", "Explanation"]);
                for c in &result.corrections {
                    table.add_row(vec![
                        Cell::new(wire_name(&c.kind)),
                        Cell::new(wire_name(&c.severity)),
                        Cell::new(&c.original),
                        Cell::new(&c.correction),
                        Cell::new(&c.explanation),
                    ]);
                }
                println!("\n{table}");
            }

            if let Some(rows) = result.detailed_results.as_ref().filter(|r| !r.is_empty()) {
                let mut table = Table::new();
                table.set_header(vec!["Question", "Correct", "Points", "Explanation"]);
                for row in rows {
                    let id = match &row.question_id {
                        Some(serde_json::Value::String(s)) => s.clone(),
                        Some(other) => other.to_string(),
                        None => "-".into(),
                    };
                    let points = match (row.points_earned, row.points_possible) {
                        (Some(earned), Some(possible)) => format!("{earned}/{possible}"),
                        (Some(earned), None) => earned.to_string(),
                        _ => "-".into(),
                    };
                    table.add_row(vec![
                        Cell::new(id),
                        Cell::new(match row.correct {
                            Some(true) => "yes",
                            Some(false) => "no",
                            None => "-",
                        }),
                        Cell::new(points),
                        Cell::new(row.explanation.as_deref().unwrap_or("")),
                    ]);
                }
                println!("\n{table}");
            }

            print_list("Strengths", &result.strengths);
            print_list("Weaknesses", &result.weaknesses);
            print_list("Recommendations", &result.recommendations);
            Ok(())
        }
    }
}

pub fn print_recommendations(items: &[Recommendation], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(items),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Priority", "Skill", "Recommendation"]);
            for r in items {
                table.add_row(vec![
                    Cell::new(wire_name(&r.priority)),
                    Cell::new(&r.skill),
                    Cell::new(&r.message),
                ]);
            }
            println!("{table}");
            Ok(())
        }
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}:");
    for item in items {
        println!("  - {item}");
    }
}

/// Serialized name of a unit enum variant (e.g. `grammar`, `high`).
fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => "-".into(),
    }
}

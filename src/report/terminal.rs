use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::Issue;

/// Render a colored summary of the issues that were written to `result_path`.
pub fn render(issues: &[Issue], result_path: &Path) {
    println!(
        "\n {} v{}",
        "jdepend-cycles".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Result: {}\n", result_path.display());

    if issues.is_empty() {
        println!(" {} No package dependency cycles reported\n", "✓".green());
        return;
    }

    println!(
        " {} {} package(s) with dependency cycles:\n",
        "[CYCLE]".red().bold(),
        issues.len()
    );

    println!("{}\n", issue_table(issues));
}

fn issue_table(issues: &[Issue]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Rule").add_attribute(Attribute::Bold),
            Cell::new("Message").add_attribute(Attribute::Bold),
        ]);

    for issue in issues {
        table.add_row(vec![
            Cell::new(&issue.rule).fg(Color::Yellow),
            Cell::new(&issue.msg),
        ]);
    }

    table
}

use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use harvest_summarizer::models::{Coordinates, Definition, FacetSummary};

/// Render a colored terminal report for one summarized document.
pub fn render(definition: &Definition, path: &Path, coordinates: &Coordinates, quiet: bool) -> Result<()> {
    let declared = definition.declared().unwrap_or("none");
    let file_count = definition.files.as_ref().map_or(0, Vec::len);

    if quiet {
        println!(
            "{}  declared: {}  files: {}",
            path.display(),
            declared.green(),
            file_count
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "harvest-summarizer".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" {} {}", "Document:".dimmed(), path.display());
    println!(" {} {}\n", "Package: ".dimmed(), coordinates.to_string().cyan());

    println!(" {} {}", "Declared license:".bold(), declared.green());
    println!(" {} {}\n", "Files listed:    ".bold(), file_count);

    render_described(definition);

    if let Some(facets) = definition.licensed.as_ref().and_then(|l| l.facets.as_ref()) {
        println!(" {} Facets:\n", "[SCAN]".cyan().bold());
        render_facets(facets.iter());
        println!();
    }

    let license_files: Vec<&str> = definition
        .files
        .iter()
        .flatten()
        .filter(|f| f.has_nature("license"))
        .map(|f| f.path.as_str())
        .collect();
    if !license_files.is_empty() {
        println!(" {} {}\n", "License files:".bold(), license_files.join(", "));
    }

    Ok(())
}

fn render_described(definition: &Definition) {
    let Some(described) = &definition.described else {
        return;
    };
    let urls = described.urls.as_ref();
    let rows = [
        ("Release date", described.release_date.as_deref()),
        ("Project website", described.project_website.as_deref()),
        ("Issue tracker", described.issue_tracker.as_deref()),
        ("Registry", urls.and_then(|u| u.registry.as_deref())),
        ("Version", urls.and_then(|u| u.version.as_deref())),
        ("Download", urls.and_then(|u| u.download.as_deref())),
        (
            "Source",
            described
                .source_location
                .as_ref()
                .and_then(|s| s.url.as_deref()),
        ),
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

    let mut any = false;
    for (label, value) in rows {
        if let Some(value) = value {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
            any = true;
        }
    }
    if any {
        println!("{}\n", table);
    }
}

fn render_facets<'a>(facets: impl Iterator<Item = (&'a String, &'a FacetSummary)>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Facet").add_attribute(Attribute::Bold),
            Cell::new("Files").add_attribute(Attribute::Bold),
            Cell::new("Discovered").add_attribute(Attribute::Bold),
            Cell::new("No license").add_attribute(Attribute::Bold),
            Cell::new("Parties").add_attribute(Attribute::Bold),
            Cell::new("No parties").add_attribute(Attribute::Bold),
        ]);

    for (name, summary) in facets {
        let unknown_color = |count: u64| if count == 0 { Color::Green } else { Color::Yellow };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(summary.files).set_alignment(CellAlignment::Right),
            Cell::new(join_or_dash(summary.discovered.expressions.as_deref())),
            Cell::new(summary.discovered.unknown)
                .fg(unknown_color(summary.discovered.unknown))
                .set_alignment(CellAlignment::Right),
            Cell::new(join_or_dash(summary.attribution.parties.as_deref())),
            Cell::new(summary.attribution.unknown)
                .fg(unknown_color(summary.attribution.unknown))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

fn join_or_dash(values: Option<&[String]>) -> String {
    match values {
        Some(values) if !values.is_empty() => values.join(", "),
        _ => "-".to_string(),
    }
}

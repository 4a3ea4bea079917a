use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement,
    Table,
};

use crate::estimation::{StandUtilization, UtilizationSet};
use crate::models::UtilizationClass;
use crate::reconcile::DiameterReconciliation;
use crate::site_index::SiteIndexEquation;

const CLASSES: [UtilizationClass; 6] = [
    UtilizationClass::Small,
    UtilizationClass::All,
    UtilizationClass::U75,
    UtilizationClass::U125,
    UtilizationClass::U175,
    UtilizationClass::O225,
];

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn heading(output: &mut String, title: &str) {
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));
}

fn utilization_table(set: &UtilizationSet) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Component")];
    header.extend(CLASSES.iter().map(|uc| Cell::new(uc.label())));
    table.set_header(header);

    for (name, vector) in set.rows() {
        let mut row = vec![Cell::new(name)];
        row.extend(CLASSES.iter().map(|&uc| {
            let precision = if name.starts_with("Trees") { 0 } else { 2 };
            Cell::new(format!("{:.*}", precision, vector[uc])).set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }
    table
}

/// Format one utilization table per species, then the layer totals.
pub fn format_utilization_report(report: &StandUtilization) -> String {
    let mut output = String::new();
    for species in &report.species {
        heading(
            &mut output,
            &format!(
                "Stand {} / genus {} ({:.1}% of base area, Lorey height {:.1} m)",
                report.stand_id,
                species.genus,
                species.fraction * 100.0,
                species.lorey_height
            ),
        );
        output.push_str(&format!("{}\n", utilization_table(&species.utilization)));
    }

    heading(&mut output, &format!("Stand {} / all species", report.stand_id));
    output.push_str(&format!("{}\n", utilization_table(&report.totals)));
    output.push_str(&format!("Lorey height: {:.2} m\n", report.lorey_height));
    if let Some(adjustment) = report.diameter_adjustment {
        output.push_str(&format!("Diameter reconciliation adjustment: {adjustment:.5}\n"));
    }
    if let Some(y) = &report.yield_estimate {
        output.push_str(&format!(
            "Yield at dominant height {:.1} m, breast-height age {:.0}: \
             base area {:.2} m²/ha, quad mean diameter {:.2} cm\n",
            y.dominant_height, y.breast_height_age, y.base_area, y.quad_mean_diameter
        ));
    }
    output
}

/// Print the utilization tables.
pub fn print_utilization_report(report: &StandUtilization) {
    print!("{}", format_utilization_report(report));
}

/// Format the site index equations with their index and citation.
pub fn format_equation_table(equations: &[SiteIndexEquation]) -> String {
    let mut output = String::new();
    heading(&mut output, "Site Index Equations");

    let mut table = new_table();
    table.set_header(vec!["Index", "Tag", "Growth intercept", "Citation"]);
    for eq in equations {
        table.add_row(vec![
            Cell::new(eq.index()).set_alignment(CellAlignment::Right),
            Cell::new(eq.tag()),
            Cell::new(if eq.is_growth_intercept() { "yes" } else { "" }),
            Cell::new(eq.citation()),
        ]);
    }
    output.push_str(&format!("{table}\n"));
    output
}

/// Print the equation listing.
pub fn print_equation_table(equations: &[SiteIndexEquation]) {
    print!("{}", format_equation_table(equations));
}

/// Format the reconciled species diameters.
pub fn format_reconciliation_table(result: &DiameterReconciliation) -> String {
    let mut output = String::new();
    heading(&mut output, "Diameter Reconciliation");

    let mut table = new_table();
    table.set_header(vec!["Genus", "Initial DQ", "Min", "Max", "DQ", "Base area", "Trees/ha"]);
    for s in &result.species {
        table.add_row(vec![
            Cell::new(&s.genus),
            Cell::new(format!("{:.2}", s.initial_quad_mean_diameter)),
            Cell::new(format!("{:.2}", s.minimum)),
            Cell::new(format!("{:.2}", s.maximum)),
            Cell::new(format!("{:.2}", s.quad_mean_diameter)),
            Cell::new(format!("{:.2}", s.base_area)),
            Cell::new(format!("{:.1}", s.trees_per_hectare)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Layer".bold()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.2}", result.quad_mean_diameter)),
        Cell::new(""),
        Cell::new(format!("{:.1}", result.trees_per_hectare)),
    ]);
    output.push_str(&format!("{table}\n"));
    output.push_str(&format!("Adjustment: {:.5}\n", result.adjustment));
    output
}

/// Print the reconciled species diameters.
pub fn print_reconciliation_table(result: &DiameterReconciliation) {
    print!("{}", format_reconciliation_table(result));
}

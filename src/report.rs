use tabled::settings::Style;
use tabled::{Table, Tabled};
use termtree::Tree;

use crate::engine::DriftResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Pretty-printed JSON.
    Structured,
    /// Human-readable block.
    Narrative,
}

/// Renders one result. Writing the text anywhere is up to the caller.
pub fn render(result: &DriftResult, mode: ReportMode) -> Result<String, serde_json::Error> {
    match mode {
        ReportMode::Structured => serde_json::to_string_pretty(result),
        ReportMode::Narrative => Ok(render_narrative(result)),
    }
}

fn render_narrative(result: &DriftResult) -> String {
    let header = format!("Drift Report for Instance ID: {}", result.instance_id());
    let rule = "=".repeat(header.chars().count());

    let mut out = format!("{rule}\n{header}\n{rule}\n");

    if !result.drift_detected() {
        out.push_str("✅ No drift detected.\n");
        return out;
    }

    out.push_str("❌ Drift detected in the following fields:\n");

    let fields = result.differences().iter().map(|(field, diff)| {
        Tree::new(field.clone()).with_leaves([
            Tree::new(format!("AWS:       {}", diff.observed)),
            Tree::new(format!("Terraform: {}", diff.declared)),
        ])
    });
    let tree = Tree::new(result.instance_id().to_string()).with_leaves(fields);
    out.push_str(&tree.to_string());

    out
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Instance")]
    instance_id: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Drifted fields")]
    fields: String,
}

/// One table row per result, sorted by instance id.
pub fn render_summary(results: &[DriftResult]) -> String {
    let mut rows: Vec<SummaryRow> = results
        .iter()
        .map(|result| SummaryRow {
            instance_id: result.instance_id().to_string(),
            status: if result.drift_detected() {
                "drift"
            } else {
                "in sync"
            },
            fields: result.drifted_fields().collect::<Vec<_>>().join(", "),
        })
        .collect();
    rows.sort_by(|a, b| a.instance_id.cmp(&b.instance_id));

    Table::new(rows).with(Style::rounded()).to_string()
}

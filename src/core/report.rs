use crate::core::engine::CheckReport;
use crate::utils::error::Result;
use std::fmt::Write;

pub fn render_json(report: &CheckReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_text(report: &CheckReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Model: {} processors, {} wires (checked {})",
        report.model.processors,
        report.model.wires,
        report.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for verdict in &report.verdicts {
        let status = if verdict.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "  [{}] {}", status, verdict.check);
        if let Some(violation) = &verdict.violation {
            let _ = writeln!(out, "         {}", violation);
        }
    }

    let open_ports: Vec<String> = report
        .basic
        .open_ports
        .iter()
        .map(|p| format!("{}[{}]:{}", p.processor, p.index, p.tag))
        .collect();
    let _ = writeln!(out, "Open ports: {}", list_or_none(&open_ports));
    let _ = writeln!(
        out,
        "Effective inputs: {}",
        list_or_none(&report.effective.inputs)
    );
    let _ = writeln!(
        out,
        "Effective outputs: {}",
        list_or_none(&report.effective.outputs)
    );

    out
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

//! Deterministic rendering of report options into the model instruction text.
//!
//! Output is a pure function of [`ReportOptions`]: no clock, no randomness, no
//! state outside the argument.

mod types;

pub use types::*;

/// Substituted for a blank age or clinical history.
pub const NOT_AVAILABLE: &str = "N/A";

const PREAMBLE: [&str; 4] = [
    "Provide a concise, structured chest radiograph report in Markdown.",
    "Write in the voice of a senior, board‑certified thoracic radiologist.",
    "Be specific and avoid hedging when findings are clear; otherwise explain uncertainty briefly.",
    "Use layperson-friendly clarification where helpful in parentheses.",
];

const CLOSING: &str = "If image quality limits interpretation, clearly state this. Do not fabricate devices or prior studies.";

/// One report section: its heading, the guidance bullet that explains it, and
/// whether the given options enable it.
pub struct ReportSection {
    pub heading: &'static str,
    pub guidance: &'static str,
    include: fn(&ReportOptions) -> bool,
}

impl ReportSection {
    pub fn is_included(&self, options: &ReportOptions) -> bool {
        (self.include)(options)
    }
}

fn always(_: &ReportOptions) -> bool {
    true
}

fn severity_enabled(o: &ReportOptions) -> bool {
    o.include_severity
}

fn differential_enabled(o: &ReportOptions) -> bool {
    o.include_differential
}

fn recommendations_enabled(o: &ReportOptions) -> bool {
    o.include_recommendations
}

/// Canonical section order. Rendering filters this table and never reorders it.
pub static SECTIONS: [ReportSection; 7] = [
    ReportSection {
        heading: "Technique",
        guidance: "Mention projection and any quality limitations (rotation, inspiration, artifacts).",
        include: always,
    },
    ReportSection {
        heading: "Comparison",
        guidance: "If no prior provided, state 'No prior available.'",
        include: always,
    },
    ReportSection {
        heading: "Findings",
        guidance: "Systematic head‑to‑toe approach (mediastinum, cardiac silhouette, lungs, pleura, diaphragm, bones, devices). Be concise.",
        include: always,
    },
    ReportSection {
        heading: "Impression",
        guidance: "Numbered, prioritized statements highlighting the most important diagnoses first.",
        include: always,
    },
    ReportSection {
        heading: "Severity",
        guidance: "If applicable (e.g., edema, consolidation), rate as mild, moderate, or severe.",
        include: severity_enabled,
    },
    ReportSection {
        heading: "Differential",
        guidance: "Provide 2‑4 most likely alternatives with brief justification.",
        include: differential_enabled,
    },
    ReportSection {
        heading: "Recommendations",
        guidance: "Actionable next steps (e.g., correlate clinically, CT, ultrasound, follow‑up timing).",
        include: recommendations_enabled,
    },
];

/// Sections enabled by `options`, in canonical order.
pub fn included_sections(
    options: &ReportOptions,
) -> impl Iterator<Item = &'static ReportSection> + '_ {
    SECTIONS.iter().filter(move |s| s.is_included(options))
}

fn or_not_available(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

pub fn build_prompt(options: &ReportOptions) -> String {
    let age = or_not_available(&options.age);
    let history = or_not_available(&options.history);

    let mut lines: Vec<String> = PREAMBLE.iter().map(|s| s.to_string()).collect();

    lines.push(format!("Patient: {} {}", age, options.sex));
    lines.push(format!("Study: {} Chest X‑ray", options.views));
    lines.push(format!("Priority: {}", options.priority));
    lines.push(format!("Clinical history: {}", history));

    lines.push("Format strictly as:".to_string());
    lines.extend(included_sections(options).map(|s| format!("## {}", s.heading)));

    lines.push("Reporting guidance:".to_string());
    lines.extend(included_sections(options).map(|s| format!("- {}: {}", s.heading, s.guidance)));

    lines.push(CLOSING.to_string());

    lines.join("\n")
}

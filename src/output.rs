//! Console presentation of trace results.

use crate::trace::{CallTarget, TraceReport};

pub const COLOR_CYAN: &str = "\x1b[36m";
pub const COLOR_BLUE: &str = "\x1b[34m";
pub const COLOR_GREEN: &str = "\x1b[32m";
pub const COLOR_RESET: &str = "\x1b[0m";

const BANNER: &str = r"
   ______   ______     ____     ___     ______   ______
  / ____/  /_  __/    / __ \   /   |   / ____/  / ____/
 / /        / /      / /_/ /  / /| |  / /      / __/
/ /___     / /      / _, _/  / ___ | / /___   / /___
\____/    /_/      /_/ |_|  /_/  |_| \____/  /_____/
";

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, COLOR_RESET)
    } else {
        text.to_string()
    }
}

/// The CTRACE banner followed by the tool's tagline
pub fn banner(color: bool) -> String {
    format!(
        "{}\n{}\n",
        paint(BANNER, COLOR_CYAN, color),
        paint("      Static Code Lifecycle Tracer", COLOR_BLUE, color)
    )
}

/// Renders a trace report as lines for the terminal
///
/// Declaration rows of the traced function are printed zero-based, as the
/// parser reports them; resolved call targets are printed one-based so they
/// can be pasted into an editor.
pub fn render_report(report: &TraceReport, color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Imports found:".to_string());
    if report.imports.is_empty() {
        lines.push("  - (none)".to_string());
    }
    for (alias, path) in &report.imports {
        lines.push(format!("  - {} -> {}", alias, path));
    }

    lines.push(format!(
        "Found function '{}' at line {} to {}",
        report.function, report.start_line, report.end_line
    ));

    lines.push(format!("Calls made by {}:", report.function));
    if report.calls.is_empty() {
        lines.push("  - (none)".to_string());
    }
    for traced in &report.calls {
        let line = match &traced.target {
            CallTarget::Resolved(location) => {
                let suffix = format!(
                    "--> defined in {}:{}",
                    location.file.display(),
                    location.line + 1
                );
                format!("  - {} {}", traced.call, paint(&suffix, COLOR_GREEN, color))
            }
            CallTarget::Unresolved { reason } => {
                format!("  - {} (unresolved: {})", traced.call, reason)
            }
            CallTarget::Skipped => format!("  - {}", traced.call),
        };
        lines.push(line);
    }

    lines
}

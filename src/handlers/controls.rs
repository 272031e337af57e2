//! Handler for the `controls` command.

use crate::audit::{Control, available_controls};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

/// Print the control catalog, including custom controls from the config.
pub fn handle_controls(json: bool, config: &Config) -> Result<()> {
    let controls = available_controls(&config.audit);
    print!("{}", render_controls(&controls, json));
    Ok(())
}

pub fn render_controls(controls: &[Control], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(controls).unwrap_or_else(|_| "[]".to_string());
    }

    let mut output = String::new();
    for control in controls {
        output.push_str(&format!(
            "{} {:<9} {}\n",
            format!("{:<8}", control.id).bold(),
            control.severity().as_str(),
            control.title
        ));
        output.push_str(&format!(
            "         {} ({})\n",
            control.expectation_text(),
            control.tags.category
        ));
    }
    output
}

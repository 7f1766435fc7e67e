use std::io::Write;

use medsimplify_core::{ErrorClass, ExtractedText};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print text pulled from a file, headed by its name and size.
pub fn print_extracted(
    w: &mut dyn Write,
    extracted: &ExtractedText,
    color: ColorMode,
) -> std::io::Result<()> {
    let header = format!(
        "── {} ({} chars) ──",
        extracted.source_filename,
        extracted.text.chars().count()
    );
    if color.enabled() {
        writeln!(w, "{}", header.dimmed())?;
    } else {
        writeln!(w, "{}", header)?;
    }
    write!(w, "{}", extracted.text)?;
    if !extracted.text.ends_with('\n') {
        writeln!(w)?;
    }
    Ok(())
}

/// Print the model's rewrite.
pub fn print_simplified(w: &mut dyn Write, result: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", "Simplified instructions:".bold().green())?;
    } else {
        writeln!(w, "Simplified instructions:")?;
    }
    writeln!(w)?;
    writeln!(w, "{}", result)?;
    Ok(())
}

/// Print a classified failure.
pub fn print_error(
    w: &mut dyn Write,
    class: ErrorClass,
    message: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    let label = format!("error[{}]:", class.as_str());
    if color.enabled() {
        writeln!(w, "{} {}", label.red().bold(), message)
    } else {
        writeln!(w, "{} {}", label, message)
    }
}

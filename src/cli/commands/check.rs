//! External tool check.

use console::style;

use crate::config::{Config, Settings};
use crate::ocr::{check_tools, OcrBackend, OcrConfig, TesseractBackend};

/// Report which PDF and OCR tools are installed.
pub fn cmd_check(settings: &Settings, config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Tool Status").bold());
    println!("{}", "-".repeat(50));

    let mut all_found = true;
    for (tool, available) in check_tools() {
        let status = if available {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    let tesseract = TesseractBackend::with_config(OcrConfig {
        language: settings.ocr_language.clone(),
    });
    if !tesseract.is_available() {
        println!("  {}", style(tesseract.availability_hint()).dim());
    }

    println!("\n{}", style("Configuration").bold());
    println!("{}", "-".repeat(50));
    match config.source_path {
        Some(ref path) => println!("  Config file:   {}", path.display()),
        None => println!("  Config file:   {}", style("none (defaults)").dim()),
    }
    println!("  Config hash:   {}", &config.hash()[..16]);
    println!("  Database:      {}", settings.database_path().display());
    println!("  OCR language:  {}", tesseract.language());
    println!("  Render DPI:    {}", settings.render_dpi);

    println!();
    if all_found {
        println!("{} All tools available", style("✓").green());
        Ok(())
    } else {
        println!(
            "{} Some tools are missing; scanned pages cannot be processed",
            style("!").yellow()
        );
        println!("  Install with: apt install poppler-utils tesseract-ocr");
        anyhow::bail!("missing external tools")
    }
}

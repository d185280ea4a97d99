//! Config command implementation.
//!
//! Shows the effective settings.

use anyhow::Result;

use crate::config::Settings;

/// Show the effective settings.
pub fn show(settings: &Settings) -> Result<()> {
    let symbols = settings.symbols();

    println!("Zindagi Settings");
    println!("{:-<40}", "");
    println!(
        "Rules:            {}",
        settings.rules.as_deref().unwrap_or("B3/S23 (default)")
    );
    println!("Algorithm:        {}", settings.algorithm.unwrap_or_default());
    println!("Alive marker:     {:?}", symbols.alive);
    println!("Dead marker:      {:?}", symbols.dead);
    println!("Column delimiter: {:?}", symbols.column_delimiter);
    println!("Row delimiter:    {:?}", symbols.row_delimiter);
    println!("Random grid:      {}", settings.grid());
    println!(
        "Stitched edges:   {}",
        settings.stitched_edges.unwrap_or(false)
    );
    println!("Delay:            {} ms", settings.delay().as_millis());
    println!(
        "Render as:        {:?} / {:?}",
        settings.render_alive(),
        settings.render_dead()
    );

    if let Some(path) = Settings::settings_file_path() {
        println!("\nSettings file: {}", path.display());
    }

    Ok(())
}

//! `whatsai personalities` - list the preset personalities.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use whatsai_core::personality::PersonalityManager;
use whatsai_types::personality::Personality;

pub fn list_personalities(json: bool) -> Result<()> {
    let presets = PersonalityManager::presets();

    if json {
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    println!();
    println!("{}", render_table(&presets));
    println!();
    println!(
        "  {}",
        style("Switch with PUT /api/v1/personality {\"type\": \"<Type>\"}").dim()
    );
    println!();
    Ok(())
}

fn render_table(presets: &[Personality]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Type").fg(Color::White),
        Cell::new("Style").fg(Color::White),
    ]);

    for p in presets {
        table.add_row(vec![
            Cell::new(p.personality_type.to_string()).fg(Color::Cyan),
            Cell::new(&p.description),
        ]);
    }
    table
}

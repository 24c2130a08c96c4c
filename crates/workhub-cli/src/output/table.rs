use anyhow::Result;
use comfy_table::{ContentArrangement, Row, Table, presets::UTF8_FULL};

/// A table with the header set, sized to the terminal.
pub fn new_table<T: Into<Row>>(header: T) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn print_table(table: Table) -> Result<()> {
    println!("{table}");
    Ok(())
}

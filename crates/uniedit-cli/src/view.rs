//! Transposed record table for the `view` command.
//!
//! Fields run down the first column and each requested record occupies one
//! column, which keeps long question answers readable side by side.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use uniedit_model::{
    QUESTION_INDEX_END, QUESTION_INDEX_START, RecordStore,
};

/// Builds the field-by-record table for the given IDs.
///
/// Callers are responsible for validating that every ID exists; unknown IDs
/// render as empty columns here.
#[must_use]
pub fn record_table(store: &RecordStore, ids: &[String]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Field")];
    header.extend(ids.iter().map(|id| header_cell(id)));
    table.set_header(header);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut id_row = vec![Cell::new("ID").add_attribute(Attribute::Bold)];
    id_row.extend(ids.iter().map(Cell::new));
    table.add_row(id_row);

    for index in QUESTION_INDEX_START..=QUESTION_INDEX_END {
        let field = format!("Q{index}");
        let mut row = vec![Cell::new(index.to_string()).add_attribute(Attribute::Bold)];
        for id in ids {
            row.push(Cell::new(store.field_value(id, &field).unwrap_or("")));
        }
        table.add_row(row);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

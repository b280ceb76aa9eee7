//! JSON-file deal store.
//!
//! The persistence collaborator of the engine: an opaque document holding
//! the full deal collection. All lifecycle logic (upsert keyed on company
//! and name, delete by id) lives in `value_case_core::deal`; this module
//! only reads and writes the file.

use std::fs;
use std::path::Path;

use value_case_core::deal::SimulationDeal;

/// Load the deal collection. A missing store file is an empty collection;
/// a corrupt one is an error rather than silent data loss.
pub fn load_deals(path: &str) -> Result<Vec<SimulationDeal>, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        return Ok(Vec::new());
    }
    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read store '{path}': {e}"))?;
    let deals = serde_json::from_str(&contents)
        .map_err(|e| format!("Deal store '{path}' is not valid: {e}"))?;
    Ok(deals)
}

/// Write the full deal collection back to the store file.
pub fn save_deals(path: &str, deals: &[SimulationDeal]) -> Result<(), Box<dyn std::error::Error>> {
    let contents = serde_json::to_string_pretty(deals)?;
    fs::write(path, contents).map_err(|e| format!("Failed to write store '{path}': {e}"))?;
    Ok(())
}

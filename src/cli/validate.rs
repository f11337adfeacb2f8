//! Board validation command implementation.

use super::CliError;
use conquest::Board;
use conquest::game::BoardDescription;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the document cannot be read or describes an invalid board.
pub(crate) fn execute(map: &Path) -> Result<(), CliError> {
    println!("Validating: {}", map.display());
    println!();

    let desc = match BoardDescription::load(map) {
        Ok(desc) => {
            print_check("JSON document", true);
            desc
        }
        Err(e) => {
            print_check("JSON document", false);
            return Err(e.into());
        }
    };

    let board = match Board::from_description(&desc) {
        Ok(board) => {
            print_check("Board graph", true);
            board
        }
        Err(e) => {
            print_check("Board graph", false);
            return Err(e.into());
        }
    };

    // One-way listings are accepted and mirrored, but worth pointing out
    let listed: usize = desc.territories.values().map(|t| t.neighbors.len()).sum();
    print_check(
        "Borders listed in both directions",
        listed == desc.edge_count() * 2,
    );

    println!();
    println!("Summary:");
    println!("  Territories:  {}", board.len());
    println!("  Continents:   {}", board.continents().len());
    println!("  Borders:      {}", board.edge_count());
    for continent in board.continents() {
        println!(
            "    {:<16} {:>2} territories, bonus {}",
            continent.name,
            continent.len(),
            continent.bonus
        );
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}

//! Loaders that turn serialized puzzle definitions into a [`Collection`].
//!
//! Two formats are understood:
//! - JSON: an array of containers, each an array of colour names listed
//!   bottom first, e.g. `[["RED","RED","GREEN","GREEN"],[]]`.
//! - Compact notation: one string per container, one letter per item
//!   (see [`Colour::to_char`]), `.` or an empty string for an empty container.

use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::collection::Collection;
use crate::colour::{Colour, Item};
use crate::error::PuzzleError;

/// Checks that every colour present fills exactly `expected` slots.
///
/// This is a loader-level sanity check; the solvers work on unbalanced
/// puzzles too and simply report them as unsolvable.
///
/// # Returns
/// `Err(PuzzleError::UnbalancedColour)` for the first offending colour in palette order.
pub fn check_colour_balance(collection: &Collection, expected: usize) -> Result<(), PuzzleError> {
    let mut counts: BTreeMap<Colour, usize> = BTreeMap::new();
    for container in collection.containers() {
        for item in container.items() {
            *counts.entry(item.colour()).or_insert(0) += 1;
        }
    }
    match counts.into_iter().find(|&(_, count)| count != expected) {
        Some((colour, count)) => Err(PuzzleError::UnbalancedColour {
            colour,
            count,
            expected,
        }),
        None => Ok(()),
    }
}

fn finish(collection: Collection, capacity: usize, reject_invalid: bool) -> Result<Collection, PuzzleError> {
    if reject_invalid {
        check_colour_balance(&collection, capacity)?;
    }
    debug!("Loaded puzzle with {} containers", collection.len());
    Ok(collection)
}

/// Parses a JSON puzzle document.
///
/// Colour names are matched case-insensitively. Every container gets `capacity`.
///
/// # Examples
/// ```
/// use water_sort_solver::utils::collection_from_json;
///
/// let puzzle = collection_from_json(r#"[["RED","RED","GREEN","GREEN"],["RED","RED","GREEN","GREEN"],[]]"#, 4, true).unwrap();
/// assert_eq!(puzzle.len(), 3);
///
/// let bad = r#"[["RED","RED","GREEN","GREEN"],["RED","RED","RED","GREEN"],[]]"#;
/// assert!(collection_from_json(bad, 4, false).is_ok());
/// assert!(collection_from_json(bad, 4, true).is_err());
/// ```
pub fn collection_from_json(json: &str, capacity: usize, reject_invalid: bool) -> Result<Collection, PuzzleError> {
    let rows: Vec<Vec<String>> = serde_json::from_str(json)?;
    collection_from_names(&rows, capacity, reject_invalid)
}

/// Like [`collection_from_json`], reading the document from `reader`.
pub fn collection_from_reader<R: Read>(
    reader: R,
    capacity: usize,
    reject_invalid: bool,
) -> Result<Collection, PuzzleError> {
    let rows: Vec<Vec<String>> = serde_json::from_reader(reader)?;
    collection_from_names(&rows, capacity, reject_invalid)
}

fn collection_from_names(
    rows: &[Vec<String>],
    capacity: usize,
    reject_invalid: bool,
) -> Result<Collection, PuzzleError> {
    let colours = rows
        .iter()
        .map(|row| row.iter().map(|name| name.parse::<Colour>()).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;
    finish(Collection::from_colours(&colours, capacity)?, capacity, reject_invalid)
}

/// Parses the compact letter notation, one string per container.
///
/// Whitespace inside a row is ignored, so `"R R G G"` and `"RRGG"` are the same
/// container. A row consisting of `.` (or nothing) is an empty container.
///
/// # Examples
/// ```
/// use water_sort_solver::colour::Colour;
/// use water_sort_solver::utils::collection_from_str_array;
///
/// let puzzle = collection_from_str_array(&["RRGG", "RRGG", "."], 4).unwrap();
/// assert_eq!(puzzle[0].head().unwrap().colour(), Colour::Green);
/// assert!(puzzle[2].is_empty());
/// assert!(collection_from_str_array(&["RXGG"], 4).is_err());
/// ```
pub fn collection_from_str_array(rows: &[&str], capacity: usize) -> Result<Collection, PuzzleError> {
    let mut colours = Vec::with_capacity(rows.len());
    for row in rows {
        let row = row.trim();
        if row == "." {
            colours.push(Vec::new());
            continue;
        }
        let parsed = row
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| Colour::from_char(ch).ok_or_else(|| PuzzleError::UnknownColour(ch.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        colours.push(parsed);
    }
    Collection::from_colours(&colours, capacity)
}

/// Renders a collection in the compact letter notation accepted by
/// [`collection_from_str_array`].
pub fn collection_to_str_array(collection: &Collection) -> Vec<String> {
    collection
        .containers()
        .iter()
        .map(|container| {
            if container.is_empty() {
                ".".to_string()
            } else {
                container.items().iter().map(|item: &Item| item.colour().to_char()).collect()
            }
        })
        .collect()
}

/// Loads a puzzle file, choosing the format by extension.
///
/// `.json` files are parsed as JSON documents; anything else is read as
/// compact notation with one container per non-empty line (`.` for an empty
/// container). Lines starting with `#` are comments.
pub fn load_puzzle_file(path: &Path, capacity: usize, reject_invalid: bool) -> Result<Collection, PuzzleError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return collection_from_json(&content, capacity, reject_invalid);
    }
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    finish(collection_from_str_array(&lines, capacity)?, capacity, reject_invalid)
}

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Common font names
//!
//! `fontdb` does not consult the system font configuration when resolving
//! generic families (its defaults are "Times New Roman", "Arial" and so on).
//! We therefore select preferred fonts for each category among those
//! available on a system.
//!
//! Fonts are chosen based on the following criteria:
//!
//! 1.  Default alias target of a common fontconfig setup (e.g. "Sans" →
//!     "DejaVu Sans")
//! 2.  Included by default with at least one recent operating system
//!
//! Font family ordering indicates usage preference.

use fontdb::Database;
use log::info;

const DEFAULT_SERIF: [&str; 10] = [
    "DejaVu Serif",
    "Noto Serif",
    "Liberation Serif",
    "Droid Serif",
    "Times New Roman",
    "Times",
    "Georgia",
    "Palatino Linotype",
    "Palatino",
    "Hoefler Text",
];

const DEFAULT_SANS_SERIF: [&str; 14] = [
    "DejaVu Sans",
    "Noto Sans",
    "Liberation Sans",
    "Cantarell",
    "Open Sans",
    "Droid Sans",
    "Roboto",
    "Lato",
    "Arial",
    "Helvetica",
    "Verdana",
    "Tahoma",
    "Segoe UI",
    "Lucida Sans Unicode",
];

const DEFAULT_MONOSPACE: [&str; 12] = [
    "DejaVu Sans Mono",
    "Noto Sans Mono",
    "Liberation Mono",
    "Droid Sans Mono",
    "Roboto Mono",
    "Source Code Pro",
    "Consolas",
    "Menlo",
    "Monaco",
    "Lucida Console",
    "Courier New",
    "Courier",
];

/// Find the first family of `names` installed in `db`
///
/// Comparison is case-insensitive. Returns the name as spelled by the font.
fn first_installed<'a>(db: &'a Database, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        db.faces()
            .flat_map(|face| face.families.iter())
            .map(|(family, _)| family.as_str())
            .find(|family| family.eq_ignore_ascii_case(name))
    })
}

/// Fall back to the family of the first loaded face
fn any_family(db: &Database) -> Option<String> {
    db.faces()
        .find_map(|face| face.families.first())
        .map(|(family, _)| family.clone())
}

/// Use this to set default font families after loading fonts
///
/// Generic families without any installed candidate are pointed at the first
/// loaded family, so that a generic query can still resolve (the usual
/// silent substitution of system font matching).
pub fn set_defaults(db: &mut Database) {
    let fallback = any_family(db);

    let serif = first_installed(db, &DEFAULT_SERIF)
        .map(str::to_string)
        .or_else(|| fallback.clone());
    if let Some(name) = serif {
        info!("Default serif font: {name}");
        db.set_serif_family(name);
    }

    let sans_serif = first_installed(db, &DEFAULT_SANS_SERIF)
        .map(str::to_string)
        .or_else(|| fallback.clone());
    if let Some(name) = sans_serif {
        info!("Default sans-serif font: {name}");
        db.set_sans_serif_family(name);
    }

    let monospace = first_installed(db, &DEFAULT_MONOSPACE)
        .map(str::to_string)
        .or(fallback);
    if let Some(name) = monospace {
        info!("Default monospace font: {name}");
        db.set_monospace_family(name);
    }
}

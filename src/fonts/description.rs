// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font descriptions
//!
//! A [`FontDescription`] names the font to use in the form popularised by
//! Pango and fontconfig: `"[FAMILY-LIST] [STYLE-OPTIONS] [SIZE]"`, for example
//! `"Sans 20"` or `"DejaVu Sans, Serif, Bold Italic 12px"`.

use fontdb::{Family, Stretch, Style, Weight};
use std::fmt;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A generic font family
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
}

impl GenericFamily {
    fn parse(name: &str) -> Option<Self> {
        const NAMES: [(&str, GenericFamily); 7] = [
            ("sans", GenericFamily::SansSerif),
            ("sans-serif", GenericFamily::SansSerif),
            ("serif", GenericFamily::Serif),
            ("monospace", GenericFamily::Monospace),
            ("mono", GenericFamily::Monospace),
            ("cursive", GenericFamily::Cursive),
            ("fantasy", GenericFamily::Fantasy),
        ];
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, g)| *g)
    }

    fn name(self) -> &'static str {
        match self {
            GenericFamily::Serif => "Serif",
            GenericFamily::SansSerif => "Sans",
            GenericFamily::Monospace => "Monospace",
            GenericFamily::Cursive => "Cursive",
            GenericFamily::Fantasy => "Fantasy",
        }
    }
}

/// Family descriptor
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FamilyName {
    /// A family named with a `String`
    Named(String),
    /// A generic family
    Generic(GenericFamily),
}

impl FamilyName {
    /// Construct from a name, recognising generic family aliases
    pub fn new(name: &str) -> Self {
        match GenericFamily::parse(name) {
            Some(generic) => FamilyName::Generic(generic),
            None => FamilyName::Named(name.to_string()),
        }
    }

    /// Get as a `fontdb` query family
    pub fn as_query(&self) -> Family<'_> {
        match self {
            FamilyName::Named(name) => Family::Name(name),
            FamilyName::Generic(GenericFamily::Serif) => Family::Serif,
            FamilyName::Generic(GenericFamily::SansSerif) => Family::SansSerif,
            FamilyName::Generic(GenericFamily::Monospace) => Family::Monospace,
            FamilyName::Generic(GenericFamily::Cursive) => Family::Cursive,
            FamilyName::Generic(GenericFamily::Fantasy) => Family::Fantasy,
        }
    }
}

impl From<GenericFamily> for FamilyName {
    fn from(generic: GenericFamily) -> Self {
        FamilyName::Generic(generic)
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamilyName::Named(name) => f.write_str(name),
            FamilyName::Generic(generic) => f.write_str(generic.name()),
        }
    }
}

/// Font size
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontSize {
    /// Size in points (converted to pixels via the environment's DPP)
    Points(f32),
    /// Size in pixels per Em
    Pixels(f32),
}

/// Font description parse failure
#[derive(Error, Debug, PartialEq)]
pub enum DescriptionError {
    #[error("font description is empty")]
    Empty,
    #[error("invalid font size: {0}")]
    InvalidSize(String),
}

/// A font description: family list, style and size
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescription {
    families: Vec<FamilyName>,
    weight: Weight,
    style: Style,
    stretch: Stretch,
    size: Option<FontSize>,
}

impl Default for FontDescription {
    fn default() -> Self {
        FontDescription {
            families: vec![],
            weight: Weight::NORMAL,
            style: Style::Normal,
            stretch: Stretch::Normal,
            size: None,
        }
    }
}

#[derive(Clone, Copy)]
enum StyleWord {
    Normal,
    Weight(Weight),
    Style(Style),
    Stretch(Stretch),
}

fn parse_style_word(word: &str) -> Option<StyleWord> {
    const WORDS: [(&str, StyleWord); 29] = [
        ("normal", StyleWord::Normal),
        ("regular", StyleWord::Normal),
        ("roman", StyleWord::Style(Style::Normal)),
        ("italic", StyleWord::Style(Style::Italic)),
        ("oblique", StyleWord::Style(Style::Oblique)),
        ("thin", StyleWord::Weight(Weight::THIN)),
        ("ultra-light", StyleWord::Weight(Weight::EXTRA_LIGHT)),
        ("extra-light", StyleWord::Weight(Weight::EXTRA_LIGHT)),
        ("light", StyleWord::Weight(Weight::LIGHT)),
        ("semi-light", StyleWord::Weight(Weight(350))),
        ("demi-light", StyleWord::Weight(Weight(350))),
        ("book", StyleWord::Weight(Weight(380))),
        ("medium", StyleWord::Weight(Weight::MEDIUM)),
        ("semi-bold", StyleWord::Weight(Weight::SEMIBOLD)),
        ("demi-bold", StyleWord::Weight(Weight::SEMIBOLD)),
        ("bold", StyleWord::Weight(Weight::BOLD)),
        ("ultra-bold", StyleWord::Weight(Weight::EXTRA_BOLD)),
        ("extra-bold", StyleWord::Weight(Weight::EXTRA_BOLD)),
        ("heavy", StyleWord::Weight(Weight::BLACK)),
        ("black", StyleWord::Weight(Weight::BLACK)),
        ("ultra-heavy", StyleWord::Weight(Weight(1000))),
        ("ultra-condensed", StyleWord::Stretch(Stretch::UltraCondensed)),
        ("extra-condensed", StyleWord::Stretch(Stretch::ExtraCondensed)),
        ("condensed", StyleWord::Stretch(Stretch::Condensed)),
        ("semi-condensed", StyleWord::Stretch(Stretch::SemiCondensed)),
        ("semi-expanded", StyleWord::Stretch(Stretch::SemiExpanded)),
        ("expanded", StyleWord::Stretch(Stretch::Expanded)),
        ("extra-expanded", StyleWord::Stretch(Stretch::ExtraExpanded)),
        ("ultra-expanded", StyleWord::Stretch(Stretch::UltraExpanded)),
    ];
    WORDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))
        .map(|(_, value)| *value)
}

fn parse_size(word: &str) -> Result<Option<FontSize>, DescriptionError> {
    let (num, px) = match word.strip_suffix("px") {
        Some(num) => (num, true),
        None => (word, false),
    };
    if !num.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Ok(None);
    }
    match num.parse::<f32>() {
        Ok(size) if size.is_finite() && size > 0.0 => Ok(Some(if px {
            FontSize::Pixels(size)
        } else {
            FontSize::Points(size)
        })),
        _ => Err(DescriptionError::InvalidSize(word.to_string())),
    }
}

impl FontDescription {
    /// Construct with default properties (no families, no size)
    #[inline]
    pub fn new() -> Self {
        FontDescription::default()
    }

    /// Parse a description string
    ///
    /// Options are read from the end of the string: first an optional size
    /// (a number, with optional `px` suffix for absolute sizes), then any
    /// style words (e.g. `Bold`, `Italic`, `Condensed`). The rest is a
    /// comma-separated family list.
    pub fn parse(s: &str) -> Result<Self, DescriptionError> {
        let mut desc = FontDescription::new();
        let mut rest = s.trim();
        if rest.is_empty() {
            return Err(DescriptionError::Empty);
        }

        let mut first = true;
        loop {
            let (head, word) = match rest.rfind(|c: char| c.is_whitespace() || c == ',') {
                Some(pos) => (&rest[..pos + 1], &rest[pos + 1..]),
                None => ("", rest),
            };
            if word.is_empty() {
                break;
            }

            if first {
                first = false;
                if let Some(size) = parse_size(word)? {
                    desc.size = Some(size);
                    rest = head.trim_end();
                    continue;
                }
            }

            match parse_style_word(word) {
                Some(StyleWord::Normal) => (),
                Some(StyleWord::Weight(w)) => desc.weight = w,
                Some(StyleWord::Style(s)) => desc.style = s,
                Some(StyleWord::Stretch(s)) => desc.stretch = s,
                None => break,
            }
            rest = head.trim_end();
        }

        desc.families = rest
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(FamilyName::new)
            .collect();
        Ok(desc)
    }

    /// Family list, in order of preference
    pub fn families(&self) -> &[FamilyName] {
        &self.families
    }

    /// Set family name(s)
    ///
    /// If multiple names are passed, the first to successfully resolve a font
    /// is used. If an empty vector is passed, the generic sans-serif family is
    /// used.
    pub fn set_families(&mut self, families: impl IntoIterator<Item: Into<FamilyName>>) {
        self.families = families.into_iter().map(|item| item.into()).collect();
    }

    /// Weight
    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Set weight
    #[inline]
    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    /// Style
    #[inline]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Set style
    #[inline]
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Stretch
    #[inline]
    pub fn stretch(&self) -> Stretch {
        self.stretch
    }

    /// Set stretch
    #[inline]
    pub fn set_stretch(&mut self, stretch: Stretch) {
        self.stretch = stretch;
    }

    /// Size, if specified
    #[inline]
    pub fn size(&self) -> Option<FontSize> {
        self.size
    }

    /// Set size
    #[inline]
    pub fn set_size(&mut self, size: FontSize) {
        self.size = Some(size);
    }
}

impl std::str::FromStr for FontDescription {
    type Err = DescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontDescription::parse(s)
    }
}

impl fmt::Display for FontDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for (i, family) in self.families.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{family}")?;
            sep = " ";
        }

        let weight = match self.weight.0 {
            400 => None,
            100 => Some("Thin"),
            200 => Some("Ultra-Light"),
            300 => Some("Light"),
            350 => Some("Semi-Light"),
            380 => Some("Book"),
            500 => Some("Medium"),
            600 => Some("Semi-Bold"),
            700 => Some("Bold"),
            800 => Some("Ultra-Bold"),
            900 => Some("Heavy"),
            1000 => Some("Ultra-Heavy"),
            _ => None,
        };
        if let Some(word) = weight {
            write!(f, "{sep}{word}")?;
            sep = " ";
        }
        match self.style {
            Style::Normal => (),
            Style::Italic => {
                write!(f, "{sep}Italic")?;
                sep = " ";
            }
            Style::Oblique => {
                write!(f, "{sep}Oblique")?;
                sep = " ";
            }
        }
        let stretch = match self.stretch {
            Stretch::UltraCondensed => Some("Ultra-Condensed"),
            Stretch::ExtraCondensed => Some("Extra-Condensed"),
            Stretch::Condensed => Some("Condensed"),
            Stretch::SemiCondensed => Some("Semi-Condensed"),
            Stretch::Normal => None,
            Stretch::SemiExpanded => Some("Semi-Expanded"),
            Stretch::Expanded => Some("Expanded"),
            Stretch::ExtraExpanded => Some("Extra-Expanded"),
            Stretch::UltraExpanded => Some("Ultra-Expanded"),
        };
        if let Some(word) = stretch {
            write!(f, "{sep}{word}")?;
            sep = " ";
        }

        match self.size {
            Some(FontSize::Points(size)) => write!(f, "{sep}{size}"),
            Some(FontSize::Pixels(size)) => write!(f, "{sep}{size}px"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sans_20() {
        let desc = FontDescription::parse("Sans 20").unwrap();
        assert_eq!(
            desc.families(),
            &[FamilyName::Generic(GenericFamily::SansSerif)]
        );
        assert_eq!(desc.size(), Some(FontSize::Points(20.0)));
        assert_eq!(desc.weight(), Weight::NORMAL);
        assert_eq!(desc.style(), Style::Normal);
        assert_eq!(desc.to_string(), "Sans 20");
    }

    #[test]
    fn family_list_and_style() {
        let desc = FontDescription::parse("DejaVu Sans, serif, Bold Italic 12.5px").unwrap();
        assert_eq!(
            desc.families(),
            &[
                FamilyName::Named("DejaVu Sans".to_string()),
                FamilyName::Generic(GenericFamily::Serif),
            ]
        );
        assert_eq!(desc.weight(), Weight::BOLD);
        assert_eq!(desc.style(), Style::Italic);
        assert_eq!(desc.size(), Some(FontSize::Pixels(12.5)));
        assert_eq!(desc.to_string(), "DejaVu Sans,Serif Bold Italic 12.5px");
    }

    #[test]
    fn no_size() {
        let desc = FontDescription::parse("Noto Sans Mono Condensed").unwrap();
        assert_eq!(
            desc.families(),
            &[FamilyName::Named("Noto Sans Mono".to_string())]
        );
        assert_eq!(desc.stretch(), Stretch::Condensed);
        assert_eq!(desc.size(), None);
    }

    #[test]
    fn style_only() {
        let desc = FontDescription::parse("bold 9").unwrap();
        assert!(desc.families().is_empty());
        assert_eq!(desc.weight(), Weight::BOLD);
        assert_eq!(desc.size(), Some(FontSize::Points(9.0)));
    }

    #[test]
    fn errors() {
        assert_eq!(FontDescription::parse("  "), Err(DescriptionError::Empty));
        assert_eq!(
            FontDescription::parse("Sans 0"),
            Err(DescriptionError::InvalidSize("0".to_string()))
        );
        assert_eq!(
            FontDescription::parse("Sans 1.2.3"),
            Err(DescriptionError::InvalidSize("1.2.3".to_string()))
        );
    }
}

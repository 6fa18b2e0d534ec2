// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font library

use super::{families, FaceRef, FontDescription};
use crate::conv::{to_u32, to_usize};
use fontdb::{Database, Family, Query, ID};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
pub(crate) use ttf_parser::Face;

/// Font loading errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font load error")]
    TtfParser(#[from] ttf_parser::FaceParsingError),
    #[error("font load error")]
    AbGlyph(#[from] ab_glyph::InvalidFont),
    #[cfg(feature = "fontdue")]
    #[error("font load error: {0}")]
    Fontdue(&'static str),
    #[error("font data unavailable")]
    Unavailable,
}

/// No matching font found
///
/// Only observable when no usable font face is installed at all.
#[derive(Error, Debug)]
#[error("no font match")]
pub struct NoFontMatch;

/// Font face identifier
///
/// Identifies a loaded font face within the [`FontLibrary`] by index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(pub(crate) u32);
impl FaceId {
    /// Get as `usize`
    pub fn get(self) -> usize {
        to_usize(self.0)
    }
}

/// A store of data for a font face, supporting various backends
///
/// Face data is never freed: a loaded face lives until program exit.
pub struct FaceStore {
    family: String,
    index: u32,
    face: Face<'static>,
    ab_glyph: ab_glyph::FontRef<'static>,
    #[cfg(feature = "fontdue")]
    fontdue: fontdue::Font,
}

impl std::fmt::Debug for FaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceStore")
            .field("family", &self.family)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl FaceStore {
    /// Construct, given the loaded face data and the face index
    fn new(family: String, data: Vec<u8>, index: u32) -> Result<Self, FontError> {
        let data: &'static [u8] = Box::leak(data.into_boxed_slice());

        let face = Face::parse(data, index)?;

        Ok(FaceStore {
            family,
            index,
            face,
            ab_glyph: ab_glyph::FontRef::try_from_slice_and_index(data, index)?,
            #[cfg(feature = "fontdue")]
            fontdue: {
                let settings = fontdue::FontSettings {
                    collection_index: index,
                    ..Default::default()
                };
                fontdue::Font::from_bytes(data, settings).map_err(FontError::Fontdue)?
            },
        })
    }

    /// The face's (first) family name
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Index of the face within its collection file
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Access the [`Face`] object
    pub fn face(&self) -> &Face<'static> {
        &self.face
    }

    /// Access a [`FaceRef`] object
    pub fn face_ref(&self) -> FaceRef<'_> {
        FaceRef(&self.face)
    }

    /// Access the [`ab_glyph`] object
    pub fn ab_glyph(&self) -> &ab_glyph::FontRef<'static> {
        &self.ab_glyph
    }

    /// Access the [`fontdue`] object
    #[cfg(feature = "fontdue")]
    pub fn fontdue(&self) -> &fontdue::Font {
        &self.fontdue
    }
}

/// Library of installed and loaded fonts
///
/// The library wraps a [`fontdb::Database`] (installed faces) and the list
/// of faces loaded from it.
pub struct FontLibrary {
    db: Database,
    faces: Vec<Arc<FaceStore>>,
    loaded: HashMap<ID, FaceId>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        FontLibrary::new()
    }
}

impl FontLibrary {
    /// Construct, loading system fonts
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        FontLibrary::from_database(db)
    }

    /// Construct over a prepared database
    ///
    /// Generic families (serif, sans-serif, monospace) are assigned here.
    pub fn from_database(mut db: Database) -> Self {
        log::info!("Found {} fonts", db.len());
        families::set_defaults(&mut db);

        FontLibrary {
            db,
            faces: vec![],
            loaded: HashMap::new(),
        }
    }

    /// Access the font database
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// True if no font faces are installed
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// List available font family names
    ///
    /// Each face contributes its first (usually English) family name. The
    /// result is sorted and de-duplicated.
    pub fn families(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .db
            .faces()
            .filter_map(|face| face.families.first())
            .map(|(name, _)| name.as_str())
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Number of loaded faces
    pub fn num_loaded(&self) -> usize {
        self.faces.len()
    }

    /// Select and load a font face
    ///
    /// Families of `desc` are tried in order. If none match, the generic
    /// sans-serif family and then any installed face are substituted. Loaded
    /// faces are cached.
    pub fn select(&mut self, desc: &FontDescription) -> Result<FaceId, NoFontMatch> {
        log::debug!("select(): {desc}");

        let mut candidates: Vec<ID> = vec![];
        for family in desc.families() {
            if let Some(id) = self.query(desc, family.as_query()) {
                candidates.push(id);
            }
        }
        if candidates.is_empty() {
            if !desc.families().is_empty() {
                log::debug!("no match for {desc}; substituting sans-serif");
            }
            if let Some(id) = self.query(desc, Family::SansSerif) {
                candidates.push(id);
            }
        }
        candidates.extend(self.db.faces().map(|face| face.id));

        for id in candidates {
            if let Some(face_id) = self.loaded.get(&id) {
                return Ok(*face_id);
            }

            match self.load(id) {
                Ok(face_id) => {
                    self.loaded.insert(id, face_id);
                    return Ok(face_id);
                }
                Err(err) => log::error!("Failed to load font: {err}"),
            }
        }

        Err(NoFontMatch)
    }

    fn query(&self, desc: &FontDescription, family: Family<'_>) -> Option<ID> {
        let families = [family];
        let query = Query {
            families: &families,
            weight: desc.weight(),
            stretch: desc.stretch(),
            style: desc.style(),
        };
        self.db.query(&query)
    }

    fn load(&mut self, id: ID) -> Result<FaceId, FontError> {
        let family = self
            .db
            .face(id)
            .and_then(|info| info.families.first())
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or(FontError::Unavailable)?;

        let store = FaceStore::new(family, data, index)?;
        log::debug!("match: {}", store.family());

        let face_id = FaceId(to_u32(self.faces.len()));
        self.faces.push(Arc::new(store));
        Ok(face_id)
    }

    /// Get a font face from its identifier
    ///
    /// Panics if `id` is not valid (required: `id.get() < self.num_loaded()`).
    pub fn get_face(&self, id: FaceId) -> FaceRef<'_> {
        self.faces[id.get()].face_ref()
    }

    /// Get access to the [`FaceStore`]
    ///
    /// Panics if `id` is not valid (required: `id.get() < self.num_loaded()`).
    pub fn get_face_store(&self, id: FaceId) -> Arc<FaceStore> {
        assert!(id.get() < self.faces.len(), "FontLibrary: invalid {id:?}!");
        self.faces[id.get()].clone()
    }
}

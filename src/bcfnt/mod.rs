// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! BCFNT font inspection
//!
//! A BCFNT ("CFNT") font is a bitmap font: glyphs are stored as cells of one
//! or more sheet images, with a character map from code points to glyph
//! indices and a width table. This module reads fonts dumped from shared
//! memory, where the file is preceded by a 128-byte prefix and section
//! offsets are absolute addresses relative to [`BASE_ADDRESS`].
//!
//! Layout, in file order:
//!
//! -   the [`Header`] (`CFNT`, `CFNU` or `FFNT`), version 3 only
//! -   `FINF` ([`FontInfo`])
//! -   `TGLP` ([`GlyphSheetInfo`]), directly after the `FINF` section
//! -   `CWDH` ([`WidthTable`]), directly after the `TGLP` section
//! -   one or more `CMAP` sections ([`CharMap`]), back to back; the last has a
//!     zero `next_cmap_offset`
//!
//! Sheet image data lives elsewhere, at `sheet_data_offset`.

mod report;
mod sections;

pub use sections::{
    CharMap, CharWidth, FontInfo, GlyphSheetInfo, Header, Mapping, SheetFormat, WidthTable,
    HEADER_MAGICS,
};

use sections::Reader;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Address at which the font is mapped
pub const BASE_ADDRESS: u32 = 0x1800_0000;

/// Length of the shared memory prefix preceding the font header
pub const PREFIX_LEN: u32 = 128;

/// BCFNT parse errors
#[derive(Error, Debug)]
pub enum BcfntError {
    #[error("unexpected end of font data")]
    Truncated,
    #[error("bad {section} magic: {found:?}")]
    BadMagic {
        section: &'static str,
        found: [u8; 4],
    },
    #[error("bad byte order mark: {0:#06X}")]
    ByteOrder(u16),
    #[error("bad header size: {0}")]
    HeaderSize(u16),
    #[error("unsupported version: {0:#010X}")]
    Version(u32),
    #[error("{section} section too small: {size} bytes")]
    SectionSize { section: &'static str, size: u32 },
    #[error("address {0:#X} is below the base address")]
    Address(u32),
    #[error("unknown mapping method: {0}")]
    MappingMethod(u16),
    #[error("scan mapping must cover 0x0000 to 0xFFFF, found {0:#06X} to {1:#06X}")]
    ScanRange(u16, u16),
    #[error("unknown sheet format: {0}")]
    SheetFormat(u16),
    #[error("I/O error")]
    Io(#[source] io::Error),
}

impl From<io::Error> for BcfntError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => BcfntError::Truncated,
            _ => BcfntError::Io(err),
        }
    }
}

/// Parse options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Number of bytes preceding the header
    pub prefix: u32,
    /// Address at which the file is mapped
    pub base: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            prefix: PREFIX_LEN,
            base: BASE_ADDRESS,
        }
    }
}

/// A parsed BCFNT font
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    base: u32,
    pub header: Header,
    pub finf: FontInfo,
    pub tglp: GlyphSheetInfo,
    pub cwdh: WidthTable,
    pub cmaps: Vec<CharMap>,
}

impl Font {
    /// Parse with default options
    pub fn parse(data: &[u8]) -> Result<Self, BcfntError> {
        Font::parse_with(data, ParseOptions::default())
    }

    /// Parse
    pub fn parse_with(data: &[u8], options: ParseOptions) -> Result<Self, BcfntError> {
        let mut r = Reader::new(data);
        r.seek(options.prefix.into())?;
        let header = Header::read(&mut r)?;

        let finf_start = r.position();
        let finf = FontInfo::read(&mut r)?;
        r.seek(finf_start + u64::from(finf.section_size))?;

        let tglp_start = r.position();
        let tglp = GlyphSheetInfo::read(&mut r)?;
        r.seek(tglp_start + u64::from(tglp.section_size))?;

        let cwdh_start = r.position();
        let cwdh = WidthTable::read(&mut r)?;
        r.seek(cwdh_start + u64::from(cwdh.section_size))?;

        let mut cmaps = vec![];
        loop {
            let cmap_start = r.position();
            let cmap = CharMap::read(&mut r)?;
            r.seek(cmap_start + u64::from(cmap.section_size))?;
            let last = cmap.next_cmap_offset == 0;
            cmaps.push(cmap);
            if last {
                break;
            }
        }

        let font = Font {
            base: options.base,
            header,
            finf,
            tglp,
            cwdh,
            cmaps,
        };

        // every address we report must be translatable
        font.file_offset(font.finf.tglp_offset)?;
        font.file_offset(font.finf.cwdh_offset)?;
        font.file_offset(font.finf.cmap_offset)?;
        font.file_offset(font.tglp.sheet_data_offset)?;
        for cmap in &font.cmaps {
            font.file_offset(cmap.next_cmap_offset)?;
        }

        log::debug!(
            "parsed font: {} sheets, {} width entries, {} char maps",
            font.tglp.num_sheets,
            font.cwdh.entries.len(),
            font.cmaps.len()
        );
        Ok(font)
    }

    /// Base address
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Translate an address to a file offset
    ///
    /// Address 0 (null) translates to offset 0.
    pub fn file_offset(&self, address: u32) -> Result<u32, BcfntError> {
        if address == 0 {
            return Ok(0);
        }
        address
            .checked_sub(self.base)
            .ok_or(BcfntError::Address(address))
    }

    /// Get the raw data of each glyph sheet
    ///
    /// Sheets are stored back to back from `sheet_data_offset`. Fails with
    /// [`BcfntError::Truncated`] if any sheet extends past the end of `data`.
    pub fn sheets<'a>(&self, data: &'a [u8]) -> Result<Vec<&'a [u8]>, BcfntError> {
        let len = usize::try_from(self.tglp.sheet_bytes()?).map_err(|_| BcfntError::Truncated)?;
        let start = usize::try_from(self.file_offset(self.tglp.sheet_data_offset)?)
            .map_err(|_| BcfntError::Truncated)?;

        (0..usize::from(self.tglp.num_sheets))
            .map(|i| {
                let begin = i.checked_mul(len).and_then(|offset| start.checked_add(offset));
                let end = begin.and_then(|begin| begin.checked_add(len));
                begin
                    .zip(end)
                    .and_then(|(begin, end)| data.get(begin..end))
                    .ok_or(BcfntError::Truncated)
            })
            .collect()
    }

    /// Write each glyph sheet to `dir/sheet-<n>.bin`
    ///
    /// The directory is created if missing; existing files are overwritten.
    /// Returns the paths written, in sheet order.
    pub fn write_sheets(
        &self,
        data: &[u8],
        dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>, BcfntError> {
        let dir = dir.as_ref();
        let sheets = self.sheets(data)?;
        fs::create_dir_all(dir).map_err(BcfntError::Io)?;

        let mut paths = Vec::with_capacity(sheets.len());
        for (i, sheet) in sheets.iter().enumerate() {
            let path = dir.join(format!("sheet-{i}.bin"));
            fs::write(&path, sheet).map_err(BcfntError::Io)?;
            log::info!("Wrote {} ({} bytes)", path.display(), sheet.len());
            paths.push(path);
        }
        Ok(paths)
    }

    /// Look up the glyph index of a code point
    ///
    /// Char maps are searched in order.
    pub fn glyph_index(&self, code: u16) -> Option<u16> {
        self.cmaps.iter().find_map(|cmap| cmap.glyph_index(code))
    }

    /// Widths of glyph `index`
    ///
    /// Glyphs not covered by the width table use the default width.
    pub fn char_width(&self, index: u16) -> CharWidth {
        self.cwdh.get(index).unwrap_or(self.finf.default_width)
    }
}

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! BCFNT section types and readers
//!
//! All values are little-endian. Section headers are read field by field;
//! the `SIZE` constants give the on-disk header lengths.

use super::BcfntError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read, Seek, SeekFrom};

/// Little-endian reader over the font data
pub(crate) struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Reader {
            cursor: Cursor::new(data),
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub(crate) fn seek(&mut self, pos: u64) -> Result<(), BcfntError> {
        if pos > self.cursor.get_ref().len() as u64 {
            return Err(BcfntError::Truncated);
        }
        self.cursor.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    pub(crate) fn u8(&mut self) -> Result<u8, BcfntError> {
        self.cursor.read_u8().map_err(BcfntError::from)
    }

    pub(crate) fn u16(&mut self) -> Result<u16, BcfntError> {
        self.cursor
            .read_u16::<LittleEndian>()
            .map_err(BcfntError::from)
    }

    pub(crate) fn u32(&mut self) -> Result<u32, BcfntError> {
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(BcfntError::from)
    }

    pub(crate) fn magic(&mut self) -> Result<[u8; 4], BcfntError> {
        let mut magic = [0; 4];
        self.cursor.read_exact(&mut magic)?;
        Ok(magic)
    }

    /// Read and check a section's magic
    pub(crate) fn expect_magic(&mut self, section: &'static str) -> Result<(), BcfntError> {
        let found = self.magic()?;
        if found != section.as_bytes() {
            return Err(BcfntError::BadMagic { section, found });
        }
        Ok(())
    }
}

/// Magic values accepted for the file header
pub const HEADER_MAGICS: [&[u8; 4]; 3] = [b"CFNT", b"CFNU", b"FFNT"];

/// File header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub byte_order: u16,
    pub header_size: u16,
    pub version: u32,
    pub file_size: u32,
    pub num_blocks: u32,
}

impl Header {
    pub const SIZE: u32 = 20;
    pub const BYTE_ORDER_MARK: u16 = 0xFEFF;
    pub const VERSION: u32 = 0x0300_0000;

    pub(crate) fn read(r: &mut Reader) -> Result<Self, BcfntError> {
        let header = Header {
            magic: r.magic()?,
            byte_order: r.u16()?,
            header_size: r.u16()?,
            version: r.u32()?,
            file_size: r.u32()?,
            num_blocks: r.u32()?,
        };

        if !HEADER_MAGICS.contains(&&header.magic) {
            return Err(BcfntError::BadMagic {
                section: "CFNT",
                found: header.magic,
            });
        }
        if header.byte_order != Self::BYTE_ORDER_MARK {
            return Err(BcfntError::ByteOrder(header.byte_order));
        }
        if u32::from(header.header_size) != Self::SIZE {
            return Err(BcfntError::HeaderSize(header.header_size));
        }
        if header.version != Self::VERSION {
            return Err(BcfntError::Version(header.version));
        }
        Ok(header)
    }
}

/// Width metrics of a glyph
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CharWidth {
    /// Left bearing
    pub left: u8,
    /// Width of the glyph image
    pub glyph_width: u8,
    /// Horizontal advance
    pub char_width: u8,
}

impl CharWidth {
    pub(crate) fn read(r: &mut Reader) -> Result<Self, BcfntError> {
        Ok(CharWidth {
            left: r.u8()?,
            glyph_width: r.u8()?,
            char_width: r.u8()?,
        })
    }
}

/// `FINF`: font information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontInfo {
    pub section_size: u32,
    pub font_type: u8,
    pub line_feed: u8,
    pub alter_char_index: u16,
    pub default_width: CharWidth,
    pub encoding: u8,
    pub tglp_offset: u32,
    pub cwdh_offset: u32,
    pub cmap_offset: u32,
    pub height: u8,
    pub width: u8,
    pub ascent: u8,
    pub reserved: u8,
}

impl FontInfo {
    pub const SIZE: u32 = 32;

    pub(crate) fn read(r: &mut Reader) -> Result<Self, BcfntError> {
        r.expect_magic("FINF")?;
        let finf = FontInfo {
            section_size: r.u32()?,
            font_type: r.u8()?,
            line_feed: r.u8()?,
            alter_char_index: r.u16()?,
            default_width: CharWidth::read(r)?,
            encoding: r.u8()?,
            tglp_offset: r.u32()?,
            cwdh_offset: r.u32()?,
            cmap_offset: r.u32()?,
            height: r.u8()?,
            width: r.u8()?,
            ascent: r.u8()?,
            reserved: r.u8()?,
        };
        check_size("FINF", finf.section_size, Self::SIZE)?;
        Ok(finf)
    }
}

/// Image format of glyph sheets
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SheetFormat {
    Rgba8,
    Rgb8,
    Rgba5551,
    Rgb565,
    Rgba4,
    La8,
    Hilo8,
    L8,
    A8,
    La4,
    L4,
    A4,
    Etc1,
    Etc1A4,
}

impl SheetFormat {
    /// Decode the format field
    pub fn from_u16(value: u16) -> Option<Self> {
        use SheetFormat::*;
        const FORMATS: [SheetFormat; 14] = [
            Rgba8, Rgb8, Rgba5551, Rgb565, Rgba4, La8, Hilo8, L8, A8, La4, L4, A4, Etc1, Etc1A4,
        ];
        FORMATS.get(usize::from(value)).copied()
    }

    /// Storage size per pixel
    pub fn bits_per_pixel(self) -> u32 {
        use SheetFormat::*;
        match self {
            Rgba8 => 32,
            Rgb8 => 24,
            Rgba5551 | Rgb565 | Rgba4 | La8 | Hilo8 => 16,
            L8 | A8 | La4 | Etc1A4 => 8,
            L4 | A4 | Etc1 => 4,
        }
    }
}

/// `TGLP`: glyph sheet information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphSheetInfo {
    pub section_size: u32,
    pub cell_width: u8,
    pub cell_height: u8,
    pub baseline_position: u8,
    pub max_character_width: u8,
    pub sheet_size: u32,
    pub num_sheets: u16,
    pub sheet_image_format: u16,
    pub num_columns: u16,
    pub num_rows: u16,
    pub sheet_width: u16,
    pub sheet_height: u16,
    pub sheet_data_offset: u32,
}

impl GlyphSheetInfo {
    pub const SIZE: u32 = 32;

    pub(crate) fn read(r: &mut Reader) -> Result<Self, BcfntError> {
        r.expect_magic("TGLP")?;
        let tglp = GlyphSheetInfo {
            section_size: r.u32()?,
            cell_width: r.u8()?,
            cell_height: r.u8()?,
            baseline_position: r.u8()?,
            max_character_width: r.u8()?,
            sheet_size: r.u32()?,
            num_sheets: r.u16()?,
            sheet_image_format: r.u16()?,
            num_columns: r.u16()?,
            num_rows: r.u16()?,
            sheet_width: r.u16()?,
            sheet_height: r.u16()?,
            sheet_data_offset: r.u32()?,
        };
        check_size("TGLP", tglp.section_size, Self::SIZE)?;
        Ok(tglp)
    }

    /// Sheet image format, if known
    pub fn format(&self) -> Option<SheetFormat> {
        SheetFormat::from_u16(self.sheet_image_format)
    }

    /// Size of one sheet in bytes
    ///
    /// Computed from sheet dimensions and format (the stored `sheet_size`
    /// field is not trusted).
    pub fn sheet_bytes(&self) -> Result<u64, BcfntError> {
        let format = self
            .format()
            .ok_or(BcfntError::SheetFormat(self.sheet_image_format))?;
        // at most 0xFFFF² × 32 bits: cannot overflow u64
        let pixels = u64::from(self.sheet_width) * u64::from(self.sheet_height);
        Ok(pixels * u64::from(format.bits_per_pixel()) / 8)
    }
}

/// `CWDH`: character widths
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidthTable {
    pub section_size: u32,
    pub start_index: u16,
    pub end_index: u16,
    pub next_cwdh_offset: u32,
    /// Widths for glyph indices `start_index..=end_index`
    pub entries: Vec<CharWidth>,
}

impl WidthTable {
    pub const SIZE: u32 = 16;

    pub(crate) fn read(r: &mut Reader) -> Result<Self, BcfntError> {
        r.expect_magic("CWDH")?;
        let section_size = r.u32()?;
        check_size("CWDH", section_size, Self::SIZE)?;
        let start_index = r.u16()?;
        let end_index = r.u16()?;
        let next_cwdh_offset = r.u32()?;

        let entries = (start_index..=end_index)
            .map(|_| CharWidth::read(r))
            .collect::<Result<_, _>>()?;

        Ok(WidthTable {
            section_size,
            start_index,
            end_index,
            next_cwdh_offset,
            entries,
        })
    }

    /// Widths of glyph `index`, if covered by this table
    pub fn get(&self, index: u16) -> Option<CharWidth> {
        let i = index.checked_sub(self.start_index)?;
        self.entries.get(usize::from(i)).copied()
    }
}

/// Code point to glyph index mapping
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mapping {
    /// Consecutive codes map to consecutive indices from `start_index`
    Direct { start_index: u16 },
    /// One index per code in the range
    Table(Vec<u16>),
    /// Explicit `(code, index)` pairs
    Scan(Vec<(u16, u16)>),
}

impl Mapping {
    pub const DIRECT: u16 = 0;
    pub const TABLE: u16 = 1;
    pub const SCAN: u16 = 2;
}

/// `CMAP`: character map
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharMap {
    pub section_size: u32,
    pub code_begin: u16,
    pub code_end: u16,
    pub mapping_method: u16,
    pub reserved: u16,
    /// Address of the next `CMAP`'s data (past its magic), or 0
    pub next_cmap_offset: u32,
    pub mapping: Mapping,
}

impl CharMap {
    pub const SIZE: u32 = 20;

    /// Glyph index used to mark unmapped codes
    pub const NO_GLYPH: u16 = 0xFFFF;

    pub(crate) fn read(r: &mut Reader) -> Result<Self, BcfntError> {
        r.expect_magic("CMAP")?;
        let section_size = r.u32()?;
        check_size("CMAP", section_size, Self::SIZE)?;
        let code_begin = r.u16()?;
        let code_end = r.u16()?;
        let mapping_method = r.u16()?;
        let reserved = r.u16()?;
        let next_cmap_offset = r.u32()?;

        let mapping = match mapping_method {
            Mapping::DIRECT => Mapping::Direct {
                start_index: r.u16()?,
            },
            Mapping::TABLE => Mapping::Table(
                (code_begin..=code_end)
                    .map(|_| r.u16())
                    .collect::<Result<_, _>>()?,
            ),
            Mapping::SCAN => {
                if code_begin != 0x0000 || code_end != 0xFFFF {
                    return Err(BcfntError::ScanRange(code_begin, code_end));
                }
                let count = r.u16()?;
                let pairs = (0..count)
                    .map(|_| -> Result<_, BcfntError> { Ok((r.u16()?, r.u16()?)) })
                    .collect::<Result<_, _>>()?;
                Mapping::Scan(pairs)
            }
            method => return Err(BcfntError::MappingMethod(method)),
        };

        Ok(CharMap {
            section_size,
            code_begin,
            code_end,
            mapping_method,
            reserved,
            next_cmap_offset,
            mapping,
        })
    }

    /// Iterate over `(code, glyph index)` pairs
    pub fn entries(&self) -> Box<dyn Iterator<Item = (u16, u16)> + '_> {
        match &self.mapping {
            Mapping::Direct { start_index } => {
                let start = *start_index;
                let begin = self.code_begin;
                Box::new(
                    (self.code_begin..=self.code_end)
                        .map(move |code| (code, start.wrapping_add(code - begin))),
                )
            }
            Mapping::Table(indices) => {
                Box::new((self.code_begin..=self.code_end).zip(indices.iter().copied()))
            }
            Mapping::Scan(pairs) => Box::new(pairs.iter().copied()),
        }
    }

    /// Look up the glyph index of `code`
    pub fn glyph_index(&self, code: u16) -> Option<u16> {
        let index = match &self.mapping {
            _ if code < self.code_begin || code > self.code_end => return None,
            Mapping::Direct { start_index } => start_index.wrapping_add(code - self.code_begin),
            Mapping::Table(indices) => *indices.get(usize::from(code - self.code_begin))?,
            Mapping::Scan(pairs) => pairs.iter().find(|(c, _)| *c == code)?.1,
        };
        (index != Self::NO_GLYPH).then_some(index)
    }
}

fn check_size(section: &'static str, size: u32, min: u32) -> Result<(), BcfntError> {
    if size < min {
        return Err(BcfntError::SectionSize { section, size });
    }
    Ok(())
}

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Field-by-field font report

use super::{CharMap, Font, FontInfo, GlyphSheetInfo, Mapping, WidthTable};
use crate::unicode::block_name;
use std::fmt;

/// Integer field values, printed in decimal and hexadecimal
trait Field: fmt::Display + fmt::UpperHex {
    const HEX_DIGITS: usize;
}

impl Field for u8 {
    const HEX_DIGITS: usize = 2;
}

impl Field for u16 {
    const HEX_DIGITS: usize = 4;
}

impl Field for u32 {
    const HEX_DIGITS: usize = 8;
}

struct Report<'a, 'b> {
    font: &'a Font,
    f: &'a mut fmt::Formatter<'b>,
}

impl<'a, 'b> Report<'a, 'b> {
    fn field<T: Field>(&mut self, label: &str, value: T) -> fmt::Result {
        writeln!(
            self.f,
            "{label} = {value}; // (0x{value:0width$X})",
            width = T::HEX_DIGITS
        )
    }

    fn address(&mut self, label: &str, address: u32) -> fmt::Result {
        let offset = self.font.file_offset(address).map_err(|_| fmt::Error)?;
        writeln!(self.f, "{label} = 0x{address:X}; // (in File: 0x{offset:X})")
    }

    fn unknown(&mut self, section: &str, size: u32, known: u32) -> fmt::Result {
        let unknown = size.saturating_sub(known);
        writeln!(self.f, "// {unknown} unknown bytes in {section} section")
    }

    fn finf(&mut self, finf: &FontInfo) -> fmt::Result {
        writeln!(self.f, "struct FINF finf;")?;
        self.field("finf.section_size", finf.section_size)?;
        self.field("finf.font_type", finf.font_type)?;
        self.field("finf.line_feed", finf.line_feed)?;
        self.field("finf.alter_char_index", finf.alter_char_index)?;
        let w = finf.default_width;
        writeln!(
            self.f,
            "finf.default_width = {{ {}, {}, {} }};",
            w.left, w.glyph_width, w.char_width
        )?;
        self.field("finf.encoding", finf.encoding)?;
        self.address("finf.tglp_offset", finf.tglp_offset)?;
        self.address("finf.cwdh_offset", finf.cwdh_offset)?;
        self.address("finf.cmap_offset", finf.cmap_offset)?;
        self.field("finf.height", finf.height)?;
        self.field("finf.width", finf.width)?;
        self.field("finf.ascent", finf.ascent)?;
        self.field("finf.reserved", finf.reserved)?;
        self.unknown("FINF", finf.section_size, FontInfo::SIZE)
    }

    fn tglp(&mut self, tglp: &GlyphSheetInfo) -> fmt::Result {
        writeln!(self.f, "struct TGLP tglp;")?;
        self.field("tglp.section_size", tglp.section_size)?;
        self.field("tglp.cell_width", tglp.cell_width)?;
        self.field("tglp.cell_height", tglp.cell_height)?;
        self.field("tglp.baseline_position", tglp.baseline_position)?;
        self.field("tglp.max_character_width", tglp.max_character_width)?;
        self.field("tglp.sheet_size", tglp.sheet_size)?;
        self.field("tglp.num_sheets", tglp.num_sheets)?;
        self.field("tglp.sheet_image_format", tglp.sheet_image_format)?;
        if let Some(format) = tglp.format() {
            writeln!(self.f, "// sheet format: {format:?}")?;
        }
        self.field("tglp.num_columns", tglp.num_columns)?;
        self.field("tglp.num_rows", tglp.num_rows)?;
        self.field("tglp.sheet_width", tglp.sheet_width)?;
        self.field("tglp.sheet_height", tglp.sheet_height)?;
        self.address("tglp.sheet_data_offset", tglp.sheet_data_offset)?;
        self.unknown("TGLP", tglp.section_size, GlyphSheetInfo::SIZE)
    }

    fn cwdh(&mut self, cwdh: &WidthTable) -> fmt::Result {
        writeln!(self.f, "struct CWDH cwdh;")?;
        self.field("cwdh.section_size", cwdh.section_size)?;
        self.field("cwdh.start_index", cwdh.start_index)?;
        self.field("cwdh.end_index", cwdh.end_index)?;
        self.field("cwdh.next_cwdh_offset", cwdh.next_cwdh_offset)?;
        self.unknown("CWDH", cwdh.section_size, WidthTable::SIZE)?;

        writeln!(
            self.f,
            "Character Width: {} to {}",
            cwdh.start_index, cwdh.end_index
        )?;
        for (i, w) in cwdh.entries.iter().enumerate() {
            let index = usize::from(cwdh.start_index) + i;
            writeln!(
                self.f,
                "\t{index}: {}, {}, {}",
                w.left, w.glyph_width, w.char_width
            )?;
        }
        Ok(())
    }

    fn cmap(&mut self, cmap: &CharMap) -> fmt::Result {
        writeln!(self.f, "struct CMAP cmap;")?;
        self.field("cmap.section_size", cmap.section_size)?;
        self.field("cmap.code_begin", cmap.code_begin)?;
        self.field("cmap.code_end", cmap.code_end)?;
        self.field("cmap.mapping_method", cmap.mapping_method)?;
        self.field("cmap.reserved", cmap.reserved)?;
        // points past the next section's magic
        self.address("cmap.next_cmap_offset", cmap.next_cmap_offset)?;
        self.unknown("CMAP", cmap.section_size, CharMap::SIZE)?;

        let (begin, end) = (cmap.code_begin, cmap.code_end);
        match cmap.mapping {
            Mapping::Direct { .. } => {
                writeln!(self.f, "Mapping Direct: 0x{begin:X} to 0x{end:X}")?
            }
            Mapping::Table(_) => writeln!(self.f, "Mapping Table: 0x{begin:X} to 0x{end:X}")?,
            Mapping::Scan(_) => writeln!(self.f, "Mapping Scan:")?,
        }
        for (code, index) in cmap.entries() {
            let block = block_name(code.into());
            writeln!(self.f, "\t{index} = 0x{code:X} ({block})")?;
        }
        Ok(())
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut report = Report { font: self, f };
        report.finf(&self.finf)?;
        report.tglp(&self.tglp)?;
        report.cwdh(&self.cwdh)?;
        for cmap in &self.cmaps {
            report.cmap(cmap)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::build_font;
    use super::*;

    #[test]
    fn report() {
        let font = Font::parse(&build_font()).unwrap();
        let text = font.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "struct FINF finf;");
        assert!(lines.contains(&"finf.section_size = 32; // (0x00000020)"));
        assert!(lines.contains(&"finf.line_feed = 14; // (0x0E)"));
        assert!(lines.contains(&"finf.alter_char_index = 0; // (0x0000)"));
        assert!(lines.contains(&"finf.tglp_offset = 0x180000BC; // (in File: 0xBC)"));
        assert!(lines.contains(&"// 0 unknown bytes in FINF section"));
        assert!(lines.contains(&"tglp.sheet_image_format = 11; // (0x000B)"));
        assert!(lines.contains(&"// sheet format: A4"));
        assert!(lines.contains(&"// 12 unknown bytes in CWDH section"));

        assert!(lines.contains(&"Character Width: 0 to 2"));
        assert!(lines.contains(&"\t1: 1, 7, 8"));

        assert!(lines.contains(&"Mapping Direct: 0x20 to 0x21"));
        assert!(lines.contains(&"\t0 = 0x20 (Basic Latin)"));
        assert!(lines.contains(&"\t1 = 0x21 (Basic Latin)"));
        assert!(lines.contains(&"Mapping Table: 0x41 to 0x42"));
        assert!(lines.contains(&"\t65535 = 0x42 (Basic Latin)"));
        assert!(lines.contains(&"Mapping Scan:"));
        assert!(lines.contains(&"\t1 = 0x3042 (Hiragana)"));
        assert!(lines.contains(&"\t0 = 0xE9 (Latin-1 Supplement)"));
        assert!(lines.contains(&"cmap.next_cmap_offset = 0x0; // (in File: 0x0)"));
    }
}

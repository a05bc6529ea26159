//! Minimal single-sheet XLSX package writer.
//!
//! Produces just enough SpreadsheetML for Excel/LibreOffice to open the file:
//! one worksheet, inline strings, and a two-entry style table (regular and
//! bold). Anything richer is out of scope.

use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ReportError;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

// Font 1 is bold; cellXfs index 1 points at it.
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

const BOLD_STYLE: u32 = 1;

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Spreadsheet column name for a zero-based index (0 -> A, 25 -> Z, 26 -> AA).
pub fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Written as an inline string, never reinterpreted as a number.
    Text(String),
    /// Pre-rendered numeric literal (e.g. `"25.50"`).
    Number(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    cells: Vec<Cell>,
    bold: bool,
}

/// Accumulates rows and renders them into an XLSX package.
#[derive(Debug, Default)]
pub struct SheetBuilder {
    sheet_name: String,
    rows: Vec<Row>,
}

impl SheetBuilder {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows: Vec::new(),
        }
    }

    pub fn bold_row(&mut self, cells: Vec<Cell>) -> &mut Self {
        self.rows.push(Row { cells, bold: true });
        self
    }

    pub fn row(&mut self, cells: Vec<Cell>) -> &mut Self {
        self.rows.push(Row { cells, bold: false });
        self
    }

    fn workbook_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            escape_xml(&self.sheet_name)
        )
    }

    fn sheet_xml(&self) -> Result<String, ReportError> {
        let mut xml = String::with_capacity(256 + self.rows.len() * 160);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );

        for (r, row) in self.rows.iter().enumerate() {
            let row_no = r + 1;
            append(&mut xml, format_args!(r#"<row r="{row_no}">"#))?;
            let style = if row.bold {
                format!(r#" s="{BOLD_STYLE}""#)
            } else {
                String::new()
            };
            for (c, cell) in row.cells.iter().enumerate() {
                let cell_ref = format!("{}{row_no}", column_name(c));
                match cell {
                    Cell::Text(text) => {
                        append(
                            &mut xml,
                            format_args!(
                                r#"<c r="{cell_ref}"{style} t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                                escape_xml(text)
                            ),
                        )?;
                    }
                    Cell::Number(value) => {
                        append(
                            &mut xml,
                            format_args!(r#"<c r="{cell_ref}"{style}><v>{}</v></c>"#, escape_xml(value)),
                        )?;
                    }
                }
            }
            xml.push_str("</row>");
        }

        xml.push_str("</sheetData></worksheet>");
        Ok(xml)
    }

    /// Render the complete `.xlsx` package.
    pub fn finish(&self) -> Result<Vec<u8>, ReportError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let parts: [(&str, String); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", ROOT_RELS_XML.to_string()),
            ("xl/workbook.xml", self.workbook_xml()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.to_string()),
            ("xl/styles.xml", STYLES_XML.to_string()),
            ("xl/worksheets/sheet1.xml", self.sheet_xml()?),
        ];

        for (path, content) in parts {
            zip.start_file(path, options)?;
            zip.write_all(content.as_bytes())
                .map_err(|e| ReportError::Package(format!("failed to write {path}: {e}")))?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

fn append(xml: &mut String, args: std::fmt::Arguments<'_>) -> Result<(), ReportError> {
    xml.write_fmt(args)
        .map_err(|e| ReportError::Package(format!("XML write error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(3), "D");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn sheet_xml_marks_bold_rows_and_escapes_text() {
        let mut sheet = SheetBuilder::new("Vouchers");
        sheet
            .bold_row(vec![Cell::Text("A & B".into())])
            .row(vec![Cell::Number("42".into()), Cell::Text("<x>".into())]);

        let xml = sheet.sheet_xml().unwrap();
        assert!(xml.contains(r#"<c r="A1" s="1" t="inlineStr"><is><t xml:space="preserve">A &amp; B</t></is></c>"#));
        assert!(xml.contains(r#"<c r="A2"><v>42</v></c>"#));
        assert!(xml.contains(r#"<c r="B2" t="inlineStr"><is><t xml:space="preserve">&lt;x&gt;</t></is></c>"#));
    }

    struct Unprintable;

    impl std::fmt::Display for Unprintable {
        fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    #[test]
    fn formatting_failures_surface_as_package_errors() {
        let mut xml = String::new();
        let err = append(&mut xml, format_args!("<v>{}</v>", Unprintable)).unwrap_err();
        assert!(matches!(err, ReportError::Package(msg) if msg.starts_with("XML write error")));
    }
}

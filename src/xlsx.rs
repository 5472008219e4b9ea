use std::path::Path;

use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::report::{CellStyle, ReportSink};

const HEADER_FONT_SIZE: u8 = 11;
const BODY_FONT_SIZE: u8 = 10;

/// Buffers the report worksheet in memory; nothing touches disk until
/// [`XlsxReportSink::save`].
pub struct XlsxReportSink {
    worksheet: Worksheet,
    header_fmt: Format,
    body_fmt: Format,
}

impl XlsxReportSink {
    pub fn new(config: &ReportConfig) -> Result<Self, ReportError> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(&config.sheet_name)?;

        let header_fmt = Format::new()
            .set_bold()
            .set_border(FormatBorder::Thin)
            .set_font_name(&config.font_name)
            .set_font_size(HEADER_FONT_SIZE);
        let body_fmt = Format::new()
            .set_border(FormatBorder::Thin)
            .set_font_name(&config.font_name)
            .set_font_size(BODY_FONT_SIZE);

        Ok(Self {
            worksheet,
            header_fmt,
            body_fmt,
        })
    }

    /// Wraps the worksheet in a workbook and writes it to `path` in one go.
    pub fn save(self, path: &Path) -> Result<(), ReportError> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.worksheet);
        workbook.save(path)?;
        Ok(())
    }
}

impl ReportSink for XlsxReportSink {
    fn write_cell(
        &mut self,
        row: u32,
        col: u16,
        text: &str,
        style: CellStyle,
    ) -> Result<(), ReportError> {
        let format = match style {
            CellStyle::Header => &self.header_fmt,
            CellStyle::Body => &self.body_fmt,
        };
        self.worksheet
            .write_string_with_format(row, col, text, format)?;
        Ok(())
    }

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), ReportError> {
        self.worksheet.set_column_width(col, width)?;
        Ok(())
    }
}

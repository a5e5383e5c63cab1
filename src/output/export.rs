//! Excel Export Module
//!
//! 検索結果をダウンロード用のバイト列へ書き出すモジュール。
//! ファイルシステムを介さず、そのままHTTPレスポンスに載せられる
//! 形で返します。

use rust_xlsxwriter::{Format, Workbook};
use unicode_width::UnicodeWidthStr;

use crate::error::PlanViewError;
use crate::output::formatters;
use crate::search::SearchResult;

/// 出力シート名（ダウンロードファイルの表示名に合わせる）
const EXPORT_SHEET_NAME: &str = "搜尋結果";

/// 検索結果をXLSXのバイト列へ書き出す
///
/// ヘッダー行は太字になり、各列の幅はセル内容の表示幅に合わせて
/// 調整されます。
///
/// # 戻り値
///
/// * `Ok(Vec<u8>)` - XLSXファイルのバイト列
/// * `Err(PlanViewError::Export)` - 書き出しに失敗した場合
pub fn search_to_xlsx_bytes(result: &SearchResult) -> Result<Vec<u8>, PlanViewError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    let mut col_widths: Vec<usize> = result.columns().iter().map(|c| c.width()).collect();

    for (col, name) in result.columns().iter().enumerate() {
        worksheet.write_with_format(0, col as u16, name.as_str(), &header_format)?;
    }

    for (row_idx, row) in result.rows().iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet.write((row_idx + 1) as u32, col as u16, value.as_str())?;
            col_widths[col] = col_widths[col].max(value.width());
        }
    }

    for (col, width) in col_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64 + 2.0)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// 検索結果をCSVのバイト列へ書き出す
///
/// 先頭にUTF-8 BOMを付けます。BOMがないとExcelがUTF-8のCSVを
/// 文字化けして開くためです。
pub fn search_to_csv_bytes(result: &SearchResult) -> Result<Vec<u8>, PlanViewError> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice("\u{FEFF}".as_bytes());
    formatters::render_csv(result, &mut buffer)?;
    Ok(buffer)
}

//! Workbook Source Module
//!
//! アップロードされたExcelファイルを表データへ変換するモジュール。
//! 下流のビュー（カレンダー・検索・集計）は型を一切解釈しないため、
//! ここですべてのセルを文字列に揃えます。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets, Xlsx};
use chrono::NaiveTime;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::PlanViewError;
use crate::types::Table;

/// 入力ファイルの最大サイズ（バイト）
///
/// ブラウザ経由のアップロードを想定した上限。超過時は読み込みを打ち切ります。
const MAX_INPUT_FILE_SIZE: u64 = 1_073_741_824; // 1GB

/// Excelファイルの読み込み元
///
/// calamineのラッパーとして、シート一覧の取得と表データの読み出しを
/// 提供します。XLSX形式のみサポートします。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use planview::WorkbookSource;
///
/// # fn main() -> Result<(), planview::PlanViewError> {
/// let file = File::open("plans.xlsx")?;
/// let mut source = WorkbookSource::open(file)?;
/// let sheets = source.sheet_names();
/// let table = source.load_table(&sheets[0], 1)?;
/// # Ok(())
/// # }
/// ```
pub struct WorkbookSource {
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookSource {
    /// リーダーからワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookSource)` - ワークブックの読み込みに成功した場合
    /// * `Err(PlanViewError::InputTooLarge)` - 入力がサイズ上限を超えた場合
    /// * `Err(PlanViewError::Parse)` - ワークブックとして解析できなかった場合
    /// * `Err(PlanViewError::Config)` - XLSX以外の形式だった場合
    pub fn open<R: Read + Seek>(mut reader: R) -> Result<Self, PlanViewError> {
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;

        if bytes_read as u64 > MAX_INPUT_FILE_SIZE {
            return Err(PlanViewError::InputTooLarge {
                size: bytes_read as u64,
                max: MAX_INPUT_FILE_SIZE,
            });
        }

        log::debug!("opening workbook ({} bytes)", bytes_read);

        let sheets =
            open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(PlanViewError::Parse)?;
        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self { workbook }),
            _ => Err(PlanViewError::Config(
                "Only XLSX format is supported".to_string(),
            )),
        }
    }

    /// パスからワークブックを開く
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, PlanViewError> {
        let file = std::fs::File::open(path)?;
        Self::open(file)
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// 指定シートを表として読み出す
    ///
    /// # 引数
    ///
    /// * `sheet_name` - 読み出すシート名
    /// * `header_row` - 標題行の位置（1始まり）。それより上の行は読み飛ばされる
    ///
    /// # 戻り値
    ///
    /// * `Ok(Table)` - 読み出しに成功した場合。データ行が1件もない場合も
    ///   空の`Table`として成功する（空データの通知は呼び出し側の責務）
    /// * `Err(PlanViewError::Config)` - シートが存在しない、または`header_row`が0の場合
    ///
    /// # 挙動
    ///
    /// * 標題行のセルが列名になる。空欄の標題は`column_N`で補われる
    /// * 標題行より下の行がデータ行になり、全セルが文字列化される
    /// * 全セルが空の行はスキップされる
    pub fn load_table(&mut self, sheet_name: &str, header_row: u32) -> Result<Table, PlanViewError> {
        if header_row == 0 {
            return Err(PlanViewError::Config(
                "Header row is 1-based and must be at least 1".to_string(),
            ));
        }
        if !self.workbook.sheet_names().iter().any(|n| n == sheet_name) {
            return Err(PlanViewError::Config(format!(
                "Sheet '{}' not found",
                sheet_name
            )));
        }

        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| PlanViewError::Parse(e.into()))?;

        // rangeは使用領域の先頭から始まるため、シート上の絶対行番号に直して
        // 標題行の位置を判定する
        let start_row = range.start().map_or(0, |(row, _)| row);
        let header_index = header_row - 1;

        let mut columns: Option<Vec<String>> = None;
        let mut table = Table::default();

        for (offset, row) in range.rows().enumerate() {
            let absolute_row = start_row + offset as u32;

            if absolute_row < header_index {
                continue;
            }

            if absolute_row == header_index {
                let names = row
                    .iter()
                    .enumerate()
                    .map(|(idx, cell)| {
                        let name = cell_to_string(cell).trim().to_string();
                        if name.is_empty() {
                            format!("column_{}", idx + 1)
                        } else {
                            name
                        }
                    })
                    .collect::<Vec<_>>();
                table = Table::new(names.clone());
                columns = Some(names);
                continue;
            }

            if columns.is_none() {
                // 標題行が使用領域より上にある場合、最初のデータ行より前には
                // 列名が得られないので空の表のまま返す
                break;
            }

            let cells: Vec<String> = row.iter().map(cell_to_string).collect();
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            table.push_row(cells);
        }

        log::info!(
            "loaded sheet '{}': {} columns, {} rows (header row {})",
            sheet_name,
            table.columns().len(),
            table.len(),
            header_row
        );

        Ok(table)
    }
}

/// セル値を文字列化する
///
/// 整数値の浮動小数点は小数部を落とし、日付セルはISO形式で書き出します。
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::String(s) => s.clone(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if datetime.time() == NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
        Data::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_numbers() {
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Float(42.0)), "42");
        assert_eq!(cell_to_string(&Data::Float(42.5)), "42.5");
    }

    #[test]
    fn test_cell_to_string_text_and_bool() {
        assert_eq!(cell_to_string(&Data::String("計畫A".to_string())), "計畫A");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_to_string(&Data::Bool(false)), "FALSE");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_open_with_invalid_input() {
        // 空のバイト列はワークブックとして解析できない
        let result = WorkbookSource::open(Cursor::new(Vec::<u8>::new()));
        assert!(result.is_err());
    }
}

//! Ingest Module
//!
//! calamineを使用したExcelファイル取り込みの実装。
//! シート選択と標題列の指定に基づき、全セルを文字列化した`Table`を生成します。

mod workbook;

pub use workbook::WorkbookSource;

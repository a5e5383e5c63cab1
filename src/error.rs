//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// planviewクレート全体で使用するエラー型
///
/// Excelファイルの読み込み、検索・集計の設定検証、各形式への出力処理中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// 注意: 日付セルの解析失敗はエラーとして扱いません。日付が解析できない行は
/// インデックスから黙って除外されます（スプレッドシートには空欄や不正な
/// 日付セルが普通に混ざるため）。この型が表すのは、呼び出し側の設定ミスや
/// 入出力の失敗だけです。
#[derive(Error, Debug)]
pub enum PlanViewError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー（calamine由来）
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// 入力ファイルがサイズ上限を超えたエラー
    #[error("Input file size exceeds maximum: {size} bytes (max: {max} bytes)")]
    InputTooLarge {
        /// 実際に読み込まれたバイト数
        size: u64,
        /// 許容される最大バイト数
        max: u64,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// 日付列・タイトル列が未指定のままカレンダーを構築した場合や、
    /// 存在しない列名・空のキーワードで検索を実行した場合などに発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// Excel形式への書き出し中に発生したエラー（rust_xlsxwriter由来）
    #[error("Excel export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// JSON出力のシリアライズに失敗したエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: PlanViewError = io_err.into();

        match error {
            PlanViewError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: PlanViewError = parse_err.into();

        let msg = error.to_string();
        assert!(msg.contains("Failed to parse Excel file"));
        assert!(msg.contains("Corrupted file"));
    }

    #[test]
    fn test_input_too_large_display() {
        let error = PlanViewError::InputTooLarge {
            size: 4096,
            max: 1024,
        };
        let msg = error.to_string();
        assert!(msg.contains("4096"));
        assert!(msg.contains("1024"));
    }

    #[test]
    fn test_config_error_display() {
        let error = PlanViewError::Config("date column is not set".to_string());
        assert!(error.to_string().starts_with("Configuration error"));
    }

    // ?演算子での自動変換の確認
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), PlanViewError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(PlanViewError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }
}

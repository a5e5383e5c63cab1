//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。
//! 検索結果の各形式への書き出しと、月曆ビューのHTML化、
//! ダウンロード用Excelバイト列の生成から構成されます。

mod calendar;
mod export;
mod formatters;

pub use calendar::render_month_html;
pub use export::{search_to_csv_bytes, search_to_xlsx_bytes};

use std::io::Write;

use crate::api::OutputFormat;
use crate::error::PlanViewError;
use crate::search::SearchResult;

/// 検索結果のフォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（Markdown, HTML, JSON, CSV）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub enum ResultFormatter {
    Markdown,
    Html,
    Json,
    Csv,
}

impl ResultFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => ResultFormatter::Markdown,
            OutputFormat::Html => ResultFormatter::Html,
            OutputFormat::Json => ResultFormatter::Json,
            OutputFormat::Csv => ResultFormatter::Csv,
        }
    }

    /// 検索結果を指定されたフォーマットで書き出す
    ///
    /// # 引数
    ///
    /// * `result` - 書き出す検索結果
    /// * `writer` - 出力先のライター
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(PlanViewError)` - エラーが発生した場合
    pub fn render<W: Write>(
        &self,
        result: &SearchResult,
        writer: &mut W,
    ) -> Result<(), PlanViewError> {
        match self {
            ResultFormatter::Markdown => formatters::render_markdown(result, writer),
            ResultFormatter::Html => formatters::render_html(result, writer),
            ResultFormatter::Json => formatters::render_json(result, writer),
            ResultFormatter::Csv => formatters::render_csv(result, writer),
        }
    }
}

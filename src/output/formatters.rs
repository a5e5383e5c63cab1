//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::io::Write;

use regex::{Regex, RegexBuilder};
use serde_json::json;
use unicode_width::UnicodeWidthStr;

use crate::error::PlanViewError;
use crate::search::SearchResult;

/// Markdownテーブルとして出力
///
/// 各列の表示幅（全角文字は2、半角文字は1）を揃えて左寄せで出力します。
pub(crate) fn render_markdown<W: Write>(
    result: &SearchResult,
    writer: &mut W,
) -> Result<(), PlanViewError> {
    if result.columns().is_empty() {
        return Ok(());
    }

    // 1. 列幅の計算（最小幅は3文字）
    let mut widths: Vec<usize> = result.columns().iter().map(|c| c.width().max(3)).collect();
    for row in result.rows() {
        for (col_idx, value) in row.iter().enumerate() {
            widths[col_idx] = widths[col_idx].max(value.trim().width());
        }
    }

    // 2. ヘッダー行と区切り行
    write_markdown_row(writer, result.columns(), &widths)?;
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    writeln!(writer, "|{}|", separator.join("|"))?;

    // 3. 各行の出力
    for row in result.rows() {
        write_markdown_row(writer, row, &widths)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_markdown_row<W: Write, S: AsRef<str>>(
    writer: &mut W,
    cells: &[S],
    widths: &[usize],
) -> Result<(), PlanViewError> {
    write!(writer, "|")?;
    for (col_idx, cell) in cells.iter().enumerate() {
        let content = cell.as_ref().trim();
        write!(writer, " {}", content)?;
        // 残りを表示幅に基づいて埋める
        for _ in content.width()..widths[col_idx] {
            write!(writer, " ")?;
        }
        write!(writer, " |")?;
    }
    writeln!(writer)?;
    Ok(())
}

/// HTMLテーブルとして出力
///
/// キーワードの一致箇所は`<mark>`で囲まれます。セル値・列名は
/// HTMLエスケープされます。
pub(crate) fn render_html<W: Write>(
    result: &SearchResult,
    writer: &mut W,
) -> Result<(), PlanViewError> {
    let matcher = keyword_matcher(result.keyword())?;

    writeln!(writer, "<table>")?;

    writeln!(writer, "  <tr>")?;
    for column in result.columns() {
        writeln!(writer, "    <th>{}</th>", escape_html(column))?;
    }
    writeln!(writer, "  </tr>")?;

    for row in result.rows() {
        writeln!(writer, "  <tr>")?;
        for value in row {
            writeln!(writer, "    <td>{}</td>", highlight(value, &matcher))?;
        }
        writeln!(writer, "  </tr>")?;
    }

    writeln!(writer, "</table>")?;
    writer.flush()?;
    Ok(())
}

/// JSON形式として出力
pub(crate) fn render_json<W: Write>(
    result: &SearchResult,
    writer: &mut W,
) -> Result<(), PlanViewError> {
    let payload = json!({
        "keyword": result.keyword(),
        "columns": result.columns(),
        "rows": result.rows(),
    });

    serde_json::to_writer_pretty(&mut *writer, &payload)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// CSV形式として出力
pub(crate) fn render_csv<W: Write>(
    result: &SearchResult,
    writer: &mut W,
) -> Result<(), PlanViewError> {
    write_csv_row(writer, result.columns())?;
    for row in result.rows() {
        write_csv_row(writer, row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_csv_row<W: Write, S: AsRef<str>>(writer: &mut W, cells: &[S]) -> Result<(), PlanViewError> {
    let mut first = true;
    for cell in cells {
        if !first {
            write!(writer, ",")?;
        }
        first = false;
        write!(writer, "{}", escape_csv(cell.as_ref()))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// キーワードのハイライト用マッチャーを構築
///
/// キーワードは正規表現としては解釈せず、大文字小文字を無視して
/// 一致させます。
pub(crate) fn keyword_matcher(keyword: &str) -> Result<Regex, PlanViewError> {
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .map_err(|e| PlanViewError::Config(format!("Invalid search keyword: {}", e)))
}

/// 一致箇所を`<mark>`で囲んだエスケープ済みHTMLを生成
///
/// 元の文字列の大文字小文字はそのまま保持されます。
pub(crate) fn highlight(text: &str, matcher: &Regex) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for found in matcher.find_iter(text) {
        output.push_str(&escape_html(&text[last..found.start()]));
        output.push_str("<mark>");
        output.push_str(&escape_html(found.as_str()));
        output.push_str("</mark>");
        last = found.end();
    }
    output.push_str(&escape_html(&text[last..]));

    output
}

/// HTML特殊文字をエスケープ
pub(crate) fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// CSV文字列をエスケープ
///
/// ダブルクォート、改行、カンマを含む場合はダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

//! Calendar HTML Module
//!
//! 月曆ビューを構造HTMLとして書き出すモジュール。広い画面向けの
//! グリッドテーブルと、狭い画面向けのアジェンダリストを同時に
//! 出力します。スタイルとツールチップの挙動は埋め込み側のページが
//! 与える前提で、ここではクラス付きのマークアップだけを生成します。

use std::io::Write;

use crate::calendar::{Event, MonthView};
use crate::error::PlanViewError;
use crate::output::formatters::escape_html;

/// 曜日ヘッダー（月曜始まり）
const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// 月曆ビューをHTMLとして書き出す
///
/// グリッドは`calendar-wrapper`、アジェンダリストは`calendar-list`の
/// クラスを持ち、表示の切り替えは埋め込み側のメディアクエリに委ねます。
///
/// # 引数
///
/// * `view` - 書き出す月曆スナップショット
/// * `writer` - 出力先のライター
///
/// # 戻り値
///
/// * `Ok(())` - 出力に成功した場合
/// * `Err(PlanViewError)` - 書き込みに失敗した場合
pub fn render_month_html<W: Write>(view: &MonthView, writer: &mut W) -> Result<(), PlanViewError> {
    // グリッド表示
    writeln!(writer, "<div class='calendar-wrapper'><table class='calendar'>")?;

    write!(writer, "<tr>")?;
    for header in WEEKDAY_HEADERS {
        write!(writer, "<th>{}</th>", header)?;
    }
    writeln!(writer, "</tr>")?;

    for week in view.grid.weeks() {
        write!(writer, "<tr>")?;
        for cell in week {
            match cell {
                Some(day_cell) => {
                    write!(writer, "<td><div class='date'>{}</div>", day_cell.day)?;
                    for event in &day_cell.events {
                        write_event(writer, event)?;
                    }
                    write!(writer, "</td>")?;
                }
                None => {
                    write!(writer, "<td></td>")?;
                }
            }
        }
        writeln!(writer, "</tr>")?;
    }

    writeln!(writer, "</table></div>")?;

    // アジェンダリスト（予定のある日だけ）
    writeln!(writer, "<div class='calendar-list'>")?;
    for day in &view.agenda {
        writeln!(writer, "<div class='day-card'>")?;
        writeln!(writer, "<div class='date-header'>{}日</div>", day.day)?;
        writeln!(writer, "<ul>")?;
        for event in &day.events {
            write!(writer, "<li>")?;
            write_event(writer, event)?;
            writeln!(writer, "</li>")?;
        }
        writeln!(writer, "</ul></div>")?;
    }
    writeln!(writer, "</div>")?;

    writer.flush()?;
    Ok(())
}

/// イベント1件分のマークアップを書き出す
///
/// 詳細ペアはここで初めて`label: value`の行に整形されます。
fn write_event<W: Write>(writer: &mut W, event: &Event) -> Result<(), PlanViewError> {
    write!(writer, "<div class='event'>{}", escape_html(&event.title))?;

    if !event.details.is_empty() {
        write!(writer, "<div class='tip'>")?;
        for (idx, (label, value)) in event.details.iter().enumerate() {
            if idx > 0 {
                write!(writer, "<br>")?;
            }
            write!(writer, "{}: {}", escape_html(label), escape_html(value))?;
        }
        write!(writer, "</div>")?;
    }

    write!(writer, "</div>")?;
    Ok(())
}

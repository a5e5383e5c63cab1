//! Calendar Module
//!
//! 日付列を持つ表データを月曆ビューへ変換するモジュール。
//! 民國日付の解析、日付キーのイベント索引、7列グリッドと
//! アジェンダリストの2つのレイアウト射影から構成されます。
//!
//! 再構築は常にゼロからの全件走査で、増分更新の経路はありません。
//! 列選択や対象年月が変わるたびに索引とレイアウトを作り直します。

mod date;
mod index;
mod layout;

pub use date::{parse_minguo_date, MINGUO_YEAR_OFFSET};
pub use index::{Event, EventCalendar, EventCalendarBuilder, EventIndex, MonthCounts};
pub use layout::{AgendaDay, DayCell, MonthGrid, MonthSelection, MonthView};

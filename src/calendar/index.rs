//! Event Index Module
//!
//! 表データから日付キーのイベント索引を構築するモジュール。
//! 索引は1回の再構築ごとに作り直され、月グリッド・アジェンダ・件数表示の
//! すべてが同じスナップショットから導出されます。

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::date::parse_minguo_date;
use crate::calendar::layout::MonthView;
use crate::error::PlanViewError;
use crate::types::Table;

/// 月曆上の1件の予定
///
/// 1行の表データから構築され、再構築のたびに作り直されます。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// グレゴリオ暦に変換済みの日付
    pub date: NaiveDate,

    /// タイトル列の値（欠損セルは空文字列）
    pub title: String,

    /// 詳細列の(列名, 値)ペア
    ///
    /// 呼び出し側が指定した列順をそのまま保持します。`label: value`と
    /// いった文字列への整形は表示側の責務です。
    pub details: Vec<(String, String)>,
}

/// `EventCalendar`を段階的に構築するビルダー
///
/// 日付列とタイトル列は必須で、未指定のまま`build()`すると
/// `PlanViewError::Config`になります。詳細列は任意です。
///
/// # 使用例
///
/// ```rust
/// use planview::EventCalendarBuilder;
///
/// # fn main() -> Result<(), planview::PlanViewError> {
/// let calendar = EventCalendarBuilder::new()
///     .with_date_column("日期")
///     .with_title_column("名稱")
///     .with_detail_columns(["負責人", "地點"])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct EventCalendarBuilder {
    date_column: Option<String>,
    title_column: Option<String>,
    detail_columns: Vec<String>,
}

impl EventCalendarBuilder {
    /// 空のビルダーを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 日付列（イベントの位置決め）を指定する
    pub fn with_date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = Some(column.into());
        self
    }

    /// タイトル列（イベント名）を指定する
    pub fn with_title_column(mut self, column: impl Into<String>) -> Self {
        self.title_column = Some(column.into());
        self
    }

    /// 詳細列を1つ追加する
    pub fn with_detail_column(mut self, column: impl Into<String>) -> Self {
        self.detail_columns.push(column.into());
        self
    }

    /// 詳細列をまとめて追加する
    ///
    /// 渡した順序がそのまま詳細ペアの表示順になります。
    pub fn with_detail_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.detail_columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// 設定を検証し、`EventCalendar`を生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(EventCalendar)` - 必須の列がすべて指定されている場合
    /// * `Err(PlanViewError::Config)` - 日付列またはタイトル列が未指定の場合
    pub fn build(self) -> Result<EventCalendar, PlanViewError> {
        let date_column = self
            .date_column
            .ok_or_else(|| PlanViewError::Config("Date column is not set".to_string()))?;
        let title_column = self
            .title_column
            .ok_or_else(|| PlanViewError::Config("Title column is not set".to_string()))?;

        Ok(EventCalendar {
            date_column,
            title_column,
            detail_columns: self.detail_columns,
        })
    }
}

/// 列の対応付けが確定したカレンダー定義
///
/// 指定された列名が表に存在するかはここでは検証しません。存在しない
/// 日付列はすべての行が「日付なし」となって索引が空になるだけで、
/// エラーにはなりません（UI側の列選択が保証する前提条件のため）。
#[derive(Debug, Clone)]
pub struct EventCalendar {
    date_column: String,
    title_column: String,
    detail_columns: Vec<String>,
}

impl EventCalendar {
    /// 全行を走査して`EventIndex`を構築する
    ///
    /// 日付列が解析できない行は索引に寄与しません（エラーではなく
    /// 単なる欠落として扱う）。同じ日付のイベントは行の出現順に
    /// 蓄積され、重複排除は行いません。
    pub fn build_index(&self, table: &Table) -> EventIndex {
        let mut index = EventIndex::default();
        let mut dropped = 0usize;

        for row in table.iter_rows() {
            let date = match row.get(&self.date_column).and_then(parse_minguo_date) {
                Some(date) => date,
                None => {
                    dropped += 1;
                    continue;
                }
            };

            let title = row.get(&self.title_column).unwrap_or("").to_string();
            let details = self
                .detail_columns
                .iter()
                .map(|column| (column.clone(), row.get(column).unwrap_or("").to_string()))
                .collect();

            index.insert(Event {
                date,
                title,
                details,
            });
        }

        log::debug!(
            "indexed {} events on {} dates ({} rows without a parsable date)",
            index.total_events(),
            index.date_count(),
            dropped
        );

        index
    }

    /// 対象年月のスナップショットを一括構築する
    ///
    /// 索引・件数・グリッド・アジェンダの4つのビューを同じ索引から
    /// 導出するため、ビュー間の不整合は構造上起こりません。
    ///
    /// # 引数
    ///
    /// * `table` - 取り込み済みの表データ
    /// * `year` - 表示対象の年（グレゴリオ暦）
    /// * `month` - 表示対象の月（1〜12）
    pub fn build_month_view(
        &self,
        table: &Table,
        year: i32,
        month: u32,
    ) -> Result<MonthView, PlanViewError> {
        let index = self.build_index(table);
        MonthView::from_index(index, year, month)
    }
}

/// 日付 → イベント列の索引
///
/// すべてのビューが導出される正準スナップショット。構築後は変更されません。
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventIndex {
    events: BTreeMap<NaiveDate, Vec<Event>>,
}

impl EventIndex {
    fn insert(&mut self, event: Event) {
        self.events.entry(event.date).or_default().push(event);
    }

    /// 指定日のイベント列を取得
    ///
    /// イベントのない日は空のスライスを返します。
    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.events.get(&date).map_or(&[], |events| events.as_slice())
    }

    /// イベントが存在する日付を昇順で走査する
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.events.keys().copied()
    }

    /// イベントが存在する日付の数
    pub fn date_count(&self) -> usize {
        self.events.len()
    }

    /// 全イベント数
    pub fn total_events(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    /// イベントが1件もないかを判定
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 年別・年月別の件数を集計する
    ///
    /// 常に索引全体から再計算されます。表示中の月に限定した集計では
    /// ない点に注意してください（年選択や月選択のバッジ表示に使うため、
    /// 読み込んだ全データが対象です）。
    pub fn counts(&self) -> MonthCounts {
        let mut counts = MonthCounts::default();

        for (date, events) in &self.events {
            *counts.per_year.entry(date.year()).or_insert(0) += events.len();
            *counts
                .per_month
                .entry((date.year(), date.month()))
                .or_insert(0) += events.len();
        }

        counts
    }
}

/// 年別・年月別のイベント件数
///
/// 件数ゼロのキーは保持しません。参照側は欠落キーを0件として扱います。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthCounts {
    per_year: BTreeMap<i32, usize>,
    per_month: BTreeMap<(i32, u32), usize>,
}

impl MonthCounts {
    /// 指定年の件数（キーがなければ0）
    pub fn for_year(&self, year: i32) -> usize {
        self.per_year.get(&year).copied().unwrap_or(0)
    }

    /// 指定年月の件数（キーがなければ0）
    pub fn for_month(&self, year: i32, month: u32) -> usize {
        self.per_month.get(&(year, month)).copied().unwrap_or(0)
    }

    /// 件数を持つ年を昇順で走査する
    pub fn years(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.per_year.iter().map(|(year, count)| (*year, *count))
    }
}

//! Month Layout Module
//!
//! イベント索引から月曆表示用のレイアウトを導出するモジュール。
//! 同じ索引スナップショットに対する2つの純粋な射影（7列固定のグリッドと、
//! 予定のある日だけのアジェンダリスト）を提供します。

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::calendar::index::{Event, EventIndex, MonthCounts};
use crate::error::PlanViewError;

/// 月グリッドの日付セル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    /// 日番号（1始まり）
    pub day: u32,

    /// その日のイベント列（行の出現順）。予定のない日は空
    pub events: Vec<Event>,
}

/// 7列固定の月グリッド
///
/// 各行はちょうど7セルで、月初の曜日分だけ先頭が空セル（`None`）に
/// なります。末尾の空セルは最終行を埋めるためだけに存在し、
/// 全セルが空の行は生成されません。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    weeks: Vec<Vec<Option<DayCell>>>,
}

impl MonthGrid {
    /// 索引から対象年月のグリッドを構築する
    ///
    /// # 引数
    ///
    /// * `index` - イベント索引のスナップショット
    /// * `year` - 対象の年（グレゴリオ暦）
    /// * `month` - 対象の月（1〜12）
    ///
    /// # 戻り値
    ///
    /// * `Ok(MonthGrid)` - 構築に成功した場合
    /// * `Err(PlanViewError::Config)` - 年月が暦として無効な場合
    pub(crate) fn build(
        index: &EventIndex,
        year: i32,
        month: u32,
    ) -> Result<Self, PlanViewError> {
        let first = first_of_month(year, month)?;
        let days = month_length(first);

        // 月曜始まり（Mon = 0）の曜日オフセットが先頭の空セル数になる
        let lead = first.weekday().num_days_from_monday() as usize;

        let mut weeks: Vec<Vec<Option<DayCell>>> = Vec::new();
        let mut week: Vec<Option<DayCell>> = Vec::with_capacity(7);
        for _ in 0..lead {
            week.push(None);
        }

        for day in 1..=days {
            let date = first + Duration::days(i64::from(day - 1));
            week.push(Some(DayCell {
                day,
                events: index.events_on(date).to_vec(),
            }));

            if week.len() == 7 {
                weeks.push(std::mem::take(&mut week));
            }
        }

        // 最終行のみ末尾を空セルで埋める。全日配置済みなら行は増やさない
        if !week.is_empty() {
            week.resize(7, None);
            weeks.push(week);
        }

        Ok(Self { year, month, weeks })
    }

    /// 対象の年
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 対象の月（1〜12）
    pub fn month(&self) -> u32 {
        self.month
    }

    /// 週単位の行（各行はちょうど7セル）
    pub fn weeks(&self) -> &[Vec<Option<DayCell>>] {
        &self.weeks
    }

    /// 指定日のセルを取得
    pub fn day_cell(&self, day: u32) -> Option<&DayCell> {
        self.weeks
            .iter()
            .flatten()
            .filter_map(|cell| cell.as_ref())
            .find(|cell| cell.day == day)
    }
}

/// アジェンダリストの1日分
///
/// 予定のある日だけが昇順で並びます。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaDay {
    /// 日番号（1始まり）
    pub day: u32,

    /// その日のイベント列。グリッドの同じ日と常に同一の内容
    pub events: Vec<Event>,
}

impl EventIndex {
    /// 対象年月の月グリッドを導出する
    pub fn month_grid(&self, year: i32, month: u32) -> Result<MonthGrid, PlanViewError> {
        MonthGrid::build(self, year, month)
    }

    /// 対象年月のアジェンダリストを導出する
    ///
    /// 予定のない日は一切含まれません（月の全日を列挙する
    /// グリッドとは意図的に形が異なる、コンパクトな一覧です）。
    pub fn month_agenda(&self, year: i32, month: u32) -> Result<Vec<AgendaDay>, PlanViewError> {
        let first = first_of_month(year, month)?;
        let days = month_length(first);

        let mut agenda = Vec::new();
        for day in 1..=days {
            let date = first + Duration::days(i64::from(day - 1));
            let events = self.events_on(date);
            if events.is_empty() {
                continue;
            }
            agenda.push(AgendaDay {
                day,
                events: events.to_vec(),
            });
        }

        Ok(agenda)
    }
}

/// 1回の再構築で得られる4つのビューのスナップショット
///
/// 索引・件数・グリッド・アジェンダは常に同じ索引から同時に
/// 導出されるため、ビュー間の不整合は構造上起こりません。
#[derive(Debug, Clone)]
pub struct MonthView {
    /// 日付 → イベント列の正準索引
    pub index: EventIndex,

    /// 年別・年月別の件数（索引全体が対象）
    pub counts: MonthCounts,

    /// 対象年月の7列グリッド
    pub grid: MonthGrid,

    /// 対象年月のアジェンダリスト
    pub agenda: Vec<AgendaDay>,
}

impl MonthView {
    /// 構築済みの索引からスナップショットを生成する
    pub fn from_index(
        index: EventIndex,
        year: i32,
        month: u32,
    ) -> Result<Self, PlanViewError> {
        let counts = index.counts();
        let grid = index.month_grid(year, month)?;
        let agenda = index.month_agenda(year, month)?;

        Ok(Self {
            index,
            counts,
            grid,
            agenda,
        })
    }
}

/// 表示対象の年月と月送り操作
///
/// 月送りは1月と12月で止まり、年は繰り越しません。年の変更は
/// `set_year`で別途行います。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSelection {
    year: i32,
    month: u32,
}

impl MonthSelection {
    /// 年月を指定して生成する
    ///
    /// # 戻り値
    ///
    /// * `Err(PlanViewError::Config)` - 月が1〜12の範囲外の場合
    pub fn new(year: i32, month: u32) -> Result<Self, PlanViewError> {
        if !(1..=12).contains(&month) {
            return Err(PlanViewError::Config(format!(
                "Month out of range: {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// 選択中の年
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 選択中の月（1〜12）
    pub fn month(&self) -> u32 {
        self.month
    }

    /// 年を変更する（月はそのまま）
    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// 前月へ移動する。1月では何もしない
    pub fn step_back(&mut self) {
        if self.month > 1 {
            self.month -= 1;
        }
    }

    /// 翌月へ移動する。12月では何もしない
    pub fn step_forward(&mut self) {
        if self.month < 12 {
            self.month += 1;
        }
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, PlanViewError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        PlanViewError::Config(format!("Invalid calendar month: {}-{}", year, month))
    })
}

/// 月の日数を「翌月1日の前日」から導出する
fn month_length(first: NaiveDate) -> u32 {
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };

    // chronoの上限を超えて翌月が作れないのは12月だけなので、その場合は31日
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|next_first| next_first.pred_opt())
        .map_or(31, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::index::EventCalendarBuilder;
    use crate::types::Table;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn index_with(rows: &[(&str, &str)]) -> EventIndex {
        let mut table = Table::new(vec!["日期".to_string(), "名稱".to_string()]);
        for (date, title) in rows {
            table.push_row(vec![date.to_string(), title.to_string()]);
        }
        EventCalendarBuilder::new()
            .with_date_column("日期")
            .with_title_column("名稱")
            .build()
            .unwrap()
            .build_index(&table)
    }

    #[test]
    fn test_month_length() {
        assert_eq!(month_length(ymd(2024, 1, 1)), 31);
        assert_eq!(month_length(ymd(2024, 2, 1)), 29); // 閏年
        assert_eq!(month_length(ymd(2021, 2, 1)), 28);
        assert_eq!(month_length(ymd(2024, 4, 1)), 30);
        assert_eq!(month_length(ymd(2024, 12, 1)), 31); // 年跨ぎ
    }

    #[test]
    fn test_grid_shape_january_2024() {
        // 2024-01-01は月曜なので先頭の空セルはゼロ
        let grid = EventIndex::default().month_grid(2024, 1).unwrap();

        assert_eq!(grid.weeks().len(), 5); // ceil((0 + 31) / 7)
        for week in grid.weeks() {
            assert_eq!(week.len(), 7);
        }
        match &grid.weeks()[0][0] {
            Some(cell) => assert_eq!(cell.day, 1),
            None => panic!("Expected day 1 in the first cell"),
        }
    }

    #[test]
    fn test_grid_leading_blanks() {
        // 2021-05-01は土曜（月曜始まりでオフセット5）
        let grid = EventIndex::default().month_grid(2021, 5).unwrap();

        for cell in &grid.weeks()[0][..5] {
            assert!(cell.is_none());
        }
        match &grid.weeks()[0][5] {
            Some(cell) => assert_eq!(cell.day, 1),
            None => panic!("Expected day 1 after the leading blanks"),
        }
        assert_eq!(grid.weeks().len(), 6); // ceil((5 + 31) / 7)
    }

    #[test]
    fn test_grid_no_trailing_blank_row() {
        // 2021-02-01は月曜かつ28日 → ちょうど4行で終わる
        let grid = EventIndex::default().month_grid(2021, 2).unwrap();
        assert_eq!(grid.weeks().len(), 4);

        let last_week = grid.weeks().last().unwrap();
        match &last_week[6] {
            Some(cell) => assert_eq!(cell.day, 28),
            None => panic!("Expected day 28 in the last cell"),
        }
    }

    #[test]
    fn test_grid_trailing_blanks_complete_final_row() {
        // 2024-04-30は火曜 → 最終行は30日の後ろが空セル
        let grid = EventIndex::default().month_grid(2024, 4).unwrap();

        let last_week = grid.weeks().last().unwrap();
        match &last_week[1] {
            Some(cell) => assert_eq!(cell.day, 30),
            None => panic!("Expected day 30"),
        }
        for cell in &last_week[2..] {
            assert!(cell.is_none());
        }
    }

    #[test]
    fn test_grid_carries_events() {
        let index = index_with(&[("113/01/05", "A"), ("113/01/05", "B")]);
        let grid = index.month_grid(2024, 1).unwrap();

        let cell = grid.day_cell(5).unwrap();
        assert_eq!(cell.events.len(), 2);
        assert_eq!(cell.events[0].title, "A");
        assert_eq!(cell.events[1].title, "B");

        // 他の日は空のイベント列を持つ
        assert!(grid.day_cell(6).unwrap().events.is_empty());
    }

    #[test]
    fn test_grid_invalid_month() {
        assert!(EventIndex::default().month_grid(2024, 0).is_err());
        assert!(EventIndex::default().month_grid(2024, 13).is_err());
    }

    #[test]
    fn test_agenda_lists_only_days_with_events() {
        let index = index_with(&[
            ("113/01/05", "A"),
            ("113/01/05", "B"),
            ("113/01/20", "C"),
            ("113/02/01", "別の月"),
        ]);
        let agenda = index.month_agenda(2024, 1).unwrap();

        assert_eq!(agenda.len(), 2);
        assert_eq!(agenda[0].day, 5);
        assert_eq!(agenda[0].events.len(), 2);
        assert_eq!(agenda[1].day, 20);
    }

    #[test]
    fn test_agenda_empty_index() {
        let agenda = EventIndex::default().month_agenda(2024, 1).unwrap();
        assert!(agenda.is_empty());
    }

    #[test]
    fn test_grid_and_agenda_are_consistent() {
        let index = index_with(&[("113/01/05", "A"), ("113/01/31", "B")]);
        let grid = index.month_grid(2024, 1).unwrap();
        let agenda = index.month_agenda(2024, 1).unwrap();

        for day in &agenda {
            let cell = grid.day_cell(day.day).unwrap();
            assert_eq!(cell.events, day.events);
        }
    }

    #[test]
    fn test_month_view_snapshot() {
        let mut table = Table::new(vec!["日期".to_string(), "名稱".to_string()]);
        table.push_row(vec!["113/01/05".to_string(), "A".to_string()]);
        table.push_row(vec!["113/02/01".to_string(), "B".to_string()]);

        let view = EventCalendarBuilder::new()
            .with_date_column("日期")
            .with_title_column("名稱")
            .build()
            .unwrap()
            .build_month_view(&table, 2024, 1)
            .unwrap();

        // 件数は表示月に関係なく索引全体が対象
        assert_eq!(view.counts.for_year(2024), 2);
        assert_eq!(view.counts.for_month(2024, 1), 1);
        assert_eq!(view.agenda.len(), 1);
        assert_eq!(view.grid.day_cell(5).unwrap().events.len(), 1);
    }

    // 月送りは1月・12月で止まる（年を繰り越さない観測仕様の回帰テスト）
    #[test]
    fn test_month_selection_clamps_at_january() {
        let mut selection = MonthSelection::new(2024, 1).unwrap();
        selection.step_back();
        assert_eq!(selection.month(), 1);
        assert_eq!(selection.year(), 2024);
    }

    #[test]
    fn test_month_selection_clamps_at_december() {
        let mut selection = MonthSelection::new(2024, 12).unwrap();
        selection.step_forward();
        assert_eq!(selection.month(), 12);
        assert_eq!(selection.year(), 2024);
    }

    #[test]
    fn test_month_selection_steps_within_year() {
        let mut selection = MonthSelection::new(2024, 6).unwrap();
        selection.step_forward();
        assert_eq!(selection.month(), 7);
        selection.step_back();
        selection.step_back();
        assert_eq!(selection.month(), 5);

        selection.set_year(2025);
        assert_eq!(selection.year(), 2025);
        assert_eq!(selection.month(), 5);
    }

    #[test]
    fn test_month_selection_rejects_invalid_month() {
        assert!(MonthSelection::new(2024, 0).is_err());
        assert!(MonthSelection::new(2024, 13).is_err());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// 任意の年月でグリッドの形状不変条件を検証する
            #[test]
            fn test_grid_shape_invariants(year in 1900i32..2200, month in 1u32..=12) {
                let grid = EventIndex::default().month_grid(year, month).unwrap();

                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let lead = first.weekday().num_days_from_monday() as usize;
                let days = month_length(first) as usize;

                // 行数 = ceil((先頭の空セル数 + 日数) / 7)
                prop_assert_eq!(grid.weeks().len(), (lead + days + 6) / 7);

                let mut expected_day = 1u32;
                for (row_idx, week) in grid.weeks().iter().enumerate() {
                    // 各行はちょうど7セル
                    prop_assert_eq!(week.len(), 7);

                    for (col_idx, cell) in week.iter().enumerate() {
                        let position = row_idx * 7 + col_idx;
                        match cell {
                            Some(day_cell) => {
                                prop_assert_eq!(position, lead + expected_day as usize - 1);
                                prop_assert_eq!(day_cell.day, expected_day);
                                expected_day += 1;
                            }
                            None => {
                                // 空セルは先頭オフセット内か、全日配置後のみ
                                prop_assert!(position < lead || expected_day as usize > days);
                            }
                        }
                    }
                }

                // 全日が一度ずつ配置されている
                prop_assert_eq!(expected_day as usize, days + 1);
            }
        }
    }
}

//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! すべてのセル値は文字列として保持されます（日付の解析は
//! `calendar`モジュール側の責務）。

use serde::Serialize;

/// 列名の並びと行データを保持する表構造
///
/// 取り込み層（`ingest`）が生成し、カレンダー・検索・集計の各ビューが
/// 読み取り専用で消費します。行は挿入順のまま保持され、並べ替えは
/// 行われません。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    /// 列名（シート上の並び順）
    columns: Vec<String>,

    /// 行データ（各行は列数に揃えられた文字列のベクター）
    rows: Vec<Vec<String>>,
}

impl Table {
    /// 指定された列名で空の表を生成
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 行を末尾に追加
    ///
    /// 列数に満たない行は空文字列で埋め、超過分は切り捨てます。
    /// これにより、以降の列参照が常に範囲内に収まります。
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// 列名の一覧を取得
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 列名からインデックスを解決
    ///
    /// 同名の列が複数ある場合は最初の列が優先されます。
    /// 存在しない列名は`None`を返します。
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 指定された列名が存在するか判定
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// 行数を取得
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 行が1件もないかを判定
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 指定位置の行ビューを取得
    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        if index < self.rows.len() {
            Some(RowRef { table: self, index })
        } else {
            None
        }
    }

    /// 全行を挿入順に走査するイテレータ
    pub fn iter_rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        (0..self.rows.len()).map(move |index| RowRef { table: self, index })
    }

    pub(crate) fn raw_row(&self, index: usize) -> &[String] {
        &self.rows[index]
    }
}

/// 1行分の読み取り専用ビュー
///
/// 列名から値を引くための軽量なハンドルです。値は常に文字列で、
/// 空セルは空文字列として表現されます。
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowRef<'a> {
    /// 列名で値を取得
    ///
    /// 存在しない列名は`None`を返します。呼び出し側は用途に応じて
    /// 「空文字列」または「日付なし」として扱います。
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        Some(self.table.raw_row(self.index)[idx].as_str())
    }

    /// 列インデックスで値を取得
    pub fn value(&self, column_index: usize) -> Option<&'a str> {
        self.table
            .raw_row(self.index)
            .get(column_index)
            .map(|s| s.as_str())
    }

    /// 元の表における行番号（0始まり）
    pub fn index(&self) -> usize {
        self.index
    }
}

//! Stats Module
//!
//! 選択された列の値を集計し、圓餅圖（パイチャート）表示用の
//! 分類統計を生成するモジュール。複数列を選択した場合は
//! 全列の値をひとつの集合にまとめて数えます。

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::PlanViewError;
use crate::types::Table;

/// 分類ごとの件数
///
/// 件数の降順で並び、同数の場合は初出順を保ちます。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryCounts {
    entries: Vec<(String, usize)>,
}

impl CategoryCounts {
    /// 選択列の値を集計する
    ///
    /// 各行について選択列を順に読み、前後の空白を除いた値を数えます。
    /// 空欄はスキップされ、列をまたいだ同じ値は合算されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(CategoryCounts)` - 集計に成功した場合（0件でも成功）
    /// * `Err(PlanViewError::Config)` - 列が未指定、または表に存在しない場合
    pub fn tally(table: &Table, columns: &[String]) -> Result<Self, PlanViewError> {
        if columns.is_empty() {
            return Err(PlanViewError::Config(
                "At least one column is required for tallying".to_string(),
            ));
        }
        for column in columns {
            if !table.has_column(column) {
                return Err(PlanViewError::Config(format!(
                    "Column '{}' not found",
                    column
                )));
            }
        }

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for row in table.iter_rows() {
            for column in columns {
                let value = row.get(column).unwrap_or("").trim();
                if value.is_empty() {
                    continue;
                }
                match counts.entry(value.to_string()) {
                    Entry::Occupied(mut entry) => *entry.get_mut() += 1,
                    Entry::Vacant(entry) => {
                        order.push(value.to_string());
                        entry.insert(1);
                    }
                }
            }
        }

        let mut entries: Vec<(String, usize)> = order
            .into_iter()
            .map(|label| {
                let count = counts.get(&label).copied().unwrap_or(0);
                (label, count)
            })
            .collect();
        // 安定ソートなので同数の分類は初出順のまま
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(Self { entries })
    }

    /// (分類, 件数)の一覧
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// 分類の数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 分類が1件もないかを判定
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全分類の件数合計
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// 指定分類の件数（存在しなければ0）
    pub fn count_for(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(entry, _)| entry == label)
            .map_or(0, |(_, count)| *count)
    }
}

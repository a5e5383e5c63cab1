//! Search Module
//!
//! 表データに対するキーワード検索を提供するモジュール。
//! 大文字小文字を無視した部分一致で複数列を横断検索し、
//! 指定列へ射影した結果をページ分割して返します。

use regex::RegexBuilder;
use serde::Serialize;

use crate::error::PlanViewError;
use crate::types::Table;

/// キーワード検索のクエリ
///
/// # 使用例
///
/// ```rust
/// use planview::{SearchQuery, Table};
///
/// # fn main() -> Result<(), planview::PlanViewError> {
/// let mut table = Table::new(vec!["名稱".to_string(), "負責人".to_string()]);
/// table.push_row(vec!["期中審查".to_string(), "王先生".to_string()]);
///
/// let result = SearchQuery::new("審查")
///     .in_columns(["名稱"])
///     .returning(["名稱", "負責人"])
///     .execute(&table)?;
/// assert_eq!(result.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SearchQuery {
    keyword: String,
    search_columns: Vec<String>,
    return_columns: Vec<String>,
}

impl SearchQuery {
    /// キーワードを指定してクエリを生成
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            search_columns: Vec::new(),
            return_columns: Vec::new(),
        }
    }

    /// 検索対象の列を指定する（複数可）
    pub fn in_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// 結果に含める列を指定する
    ///
    /// 未指定の場合は全列が返されます。指定した順序が結果の列順になります。
    pub fn returning<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// 検索キーワード
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// 検索を実行する
    ///
    /// いずれかの検索列にキーワードが部分一致した行が結果に入ります。
    /// キーワードは正規表現としては解釈されません。行の順序は元の表の
    /// まま保持されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(SearchResult)` - 検索に成功した場合（0件でも成功）
    /// * `Err(PlanViewError::Config)` - キーワードが空、検索列が未指定、
    ///   または指定列が表に存在しない場合
    pub fn execute(&self, table: &Table) -> Result<SearchResult, PlanViewError> {
        if self.keyword.trim().is_empty() {
            return Err(PlanViewError::Config(
                "Search keyword must not be empty".to_string(),
            ));
        }
        if self.search_columns.is_empty() {
            return Err(PlanViewError::Config(
                "At least one search column is required".to_string(),
            ));
        }
        for column in self.search_columns.iter().chain(&self.return_columns) {
            if !table.has_column(column) {
                return Err(PlanViewError::Config(format!(
                    "Column '{}' not found",
                    column
                )));
            }
        }

        let matcher = RegexBuilder::new(&regex::escape(&self.keyword))
            .case_insensitive(true)
            .build()
            .map_err(|e| PlanViewError::Config(format!("Invalid search keyword: {}", e)))?;

        let columns = if self.return_columns.is_empty() {
            table.columns().to_vec()
        } else {
            self.return_columns.clone()
        };

        let mut rows = Vec::new();
        for row in table.iter_rows() {
            let hit = self
                .search_columns
                .iter()
                .any(|column| row.get(column).is_some_and(|value| matcher.is_match(value)));
            if !hit {
                continue;
            }
            rows.push(
                columns
                    .iter()
                    .map(|column| row.get(column).unwrap_or("").to_string())
                    .collect(),
            );
        }

        log::debug!(
            "search '{}' matched {} of {} rows",
            self.keyword,
            rows.len(),
            table.len()
        );

        Ok(SearchResult {
            columns,
            rows,
            keyword: self.keyword.clone(),
        })
    }
}

/// 検索結果（射影済みの行集合）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    keyword: String,
}

impl SearchResult {
    /// 結果の列名
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 結果の全行
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 検索に使われたキーワード（ハイライト表示用）
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// ヒット件数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// ヒットが1件もないかを判定
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 総ページ数（切り上げ）
    ///
    /// `page_size`が0の場合は1として扱います。0件の結果は0ページです。
    pub fn total_pages(&self, page_size: usize) -> usize {
        let size = page_size.max(1);
        (self.rows.len() + size - 1) / size
    }

    /// 指定ページの行を返す（ページ番号は1始まり）
    ///
    /// 範囲外のページ番号は空のスライスになります。
    pub fn page(&self, page_number: usize, page_size: usize) -> &[Vec<String>] {
        let size = page_size.max(1);
        let start = page_number.max(1).saturating_sub(1).saturating_mul(size);
        if start >= self.rows.len() {
            return &[];
        }
        let end = (start + size).min(self.rows.len());
        &self.rows[start..end]
    }
}

/// ページ送りの状態
///
/// 前へ・次へは`[1, total_pages]`の範囲で止まり、範囲外には進みません。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    total_pages: usize,
}

impl PageCursor {
    /// 1ページ目を指すカーソルを生成
    pub fn new(total_pages: usize) -> Self {
        Self {
            page: 1,
            total_pages,
        }
    }

    /// 現在のページ番号（1始まり）
    pub fn page(&self) -> usize {
        self.page
    }

    /// 前のページへ。1ページ目では何もしない
    pub fn step_back(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// 次のページへ。最終ページでは何もしない
    pub fn step_forward(&mut self) {
        if self.page < self.total_pages {
            self.page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_table() -> Table {
        let mut table = Table::new(vec![
            "編號".to_string(),
            "名稱".to_string(),
            "負責人".to_string(),
        ]);
        table.push_row(vec![
            "A-01".to_string(),
            "智慧農業計畫".to_string(),
            "王先生".to_string(),
        ]);
        table.push_row(vec![
            "A-02".to_string(),
            "Smart City".to_string(),
            "林小姐".to_string(),
        ]);
        table.push_row(vec![
            "B-01".to_string(),
            "水利設施更新".to_string(),
            "王先生".to_string(),
        ]);
        table
    }

    #[test]
    fn test_search_single_column() {
        let result = SearchQuery::new("計畫")
            .in_columns(["名稱"])
            .execute(&plan_table())
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0][1], "智慧農業計畫");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let result = SearchQuery::new("smart city")
            .in_columns(["名稱"])
            .execute(&plan_table())
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0][0], "A-02");
    }

    #[test]
    fn test_search_multiple_columns_or_semantics() {
        // いずれかの列に一致すればヒット
        let result = SearchQuery::new("王")
            .in_columns(["名稱", "負責人"])
            .execute(&plan_table())
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_search_keyword_is_not_a_regex() {
        let mut table = Table::new(vec!["名稱".to_string()]);
        table.push_row(vec!["A.B計畫".to_string()]);
        table.push_row(vec!["AXB計畫".to_string()]);

        let result = SearchQuery::new("A.B")
            .in_columns(["名稱"])
            .execute(&table)
            .unwrap();

        // "." はリテラルとして扱われる
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0][0], "A.B計畫");
    }

    #[test]
    fn test_search_projection_order() {
        let result = SearchQuery::new("王")
            .in_columns(["負責人"])
            .returning(["負責人", "編號"])
            .execute(&plan_table())
            .unwrap();

        assert_eq!(result.columns(), &["負責人".to_string(), "編號".to_string()]);
        assert_eq!(result.rows()[0], vec!["王先生".to_string(), "A-01".to_string()]);
    }

    #[test]
    fn test_search_defaults_to_all_columns() {
        let result = SearchQuery::new("A-01")
            .in_columns(["編號"])
            .execute(&plan_table())
            .unwrap();

        assert_eq!(result.columns().len(), 3);
    }

    #[test]
    fn test_search_rejects_empty_keyword() {
        let result = SearchQuery::new("  ").in_columns(["名稱"]).execute(&plan_table());
        assert!(matches!(result, Err(PlanViewError::Config(_))));
    }

    #[test]
    fn test_search_rejects_missing_search_columns() {
        let result = SearchQuery::new("計畫").execute(&plan_table());
        assert!(matches!(result, Err(PlanViewError::Config(_))));
    }

    #[test]
    fn test_search_rejects_unknown_column() {
        let result = SearchQuery::new("計畫")
            .in_columns(["不存在"])
            .execute(&plan_table());
        match result {
            Err(PlanViewError::Config(msg)) => assert!(msg.contains("不存在")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_search_no_hits_is_ok() {
        let result = SearchQuery::new("zzz")
            .in_columns(["名稱"])
            .execute(&plan_table())
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total_pages(20), 0);
    }

    fn numbered_result(total: usize) -> SearchResult {
        let mut table = Table::new(vec!["番号".to_string()]);
        for i in 0..total {
            table.push_row(vec![format!("row-{}", i)]);
        }
        SearchQuery::new("row")
            .in_columns(["番号"])
            .execute(&table)
            .unwrap()
    }

    #[test]
    fn test_pagination_arithmetic() {
        let result = numbered_result(45);

        assert_eq!(result.total_pages(20), 3);
        assert_eq!(result.page(1, 20).len(), 20);
        assert_eq!(result.page(2, 20).len(), 20);
        // 最終ページは端数
        assert_eq!(result.page(3, 20).len(), 5);
        assert_eq!(result.page(3, 20)[0][0], "row-40");
        // 範囲外は空
        assert!(result.page(4, 20).is_empty());
    }

    #[test]
    fn test_pagination_page_size_zero_is_treated_as_one() {
        let result = numbered_result(3);
        assert_eq!(result.total_pages(0), 3);
        assert_eq!(result.page(2, 0).len(), 1);
    }

    #[test]
    fn test_page_cursor_clamps_at_both_ends() {
        let mut cursor = PageCursor::new(3);
        cursor.step_back();
        assert_eq!(cursor.page(), 1);

        cursor.step_forward();
        cursor.step_forward();
        cursor.step_forward();
        assert_eq!(cursor.page(), 3);
    }

    #[test]
    fn test_page_cursor_with_no_pages() {
        let mut cursor = PageCursor::new(0);
        cursor.step_forward();
        assert_eq!(cursor.page(), 1);
    }
}

//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 検索結果の出力フォーマット
///
/// 検索結果を書き出す際の形式を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Markdownテーブル形式（デフォルト）
    ///
    /// 表示幅に合わせて整列されたMarkdownテーブルを出力します。
    /// 全角文字は幅2として計算されます。
    ///
    /// # 出力例
    ///
    /// ```markdown
    /// | 編號  | 名稱     |
    /// |-------|----------|
    /// | A-01  | 智慧農業 |
    /// ```
    Markdown,

    /// HTMLテーブル形式
    ///
    /// キーワードの一致箇所が`<mark>`でハイライトされたテーブルを
    /// 出力します。セル値はHTMLエスケープされます。
    Html,

    /// JSON形式
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "keyword": "農業",
    ///   "columns": ["編號", "名稱"],
    ///   "rows": [["A-01", "智慧農業計畫"]]
    /// }
    /// ```
    Json,

    /// CSV形式
    ///
    /// ヘッダー行に続いて各行を出力します。カンマ・改行・引用符を
    /// 含むセルはダブルクォートで囲まれます。
    Csv,
}

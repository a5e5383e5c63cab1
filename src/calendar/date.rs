//! Minguo Date Module
//!
//! 民國紀年（ROC年号）の日付文字列をグレゴリオ暦へ変換するモジュール。
//! 台湾の計畫表では `110/05/15` のような年/月/日表記が使われ、
//! 年にオフセットを加えるとグレゴリオ暦になります。

use chrono::NaiveDate;

/// 民國紀年とグレゴリオ暦の年差
///
/// 民國1年 = 西暦1912年。
pub const MINGUO_YEAR_OFFSET: i32 = 1911;

/// `"110/05/15"` 形式の民國日付を解析する
///
/// `/`で区切られた3つの整数を要求し、先頭の年に
/// [`MINGUO_YEAR_OFFSET`]を加えてグレゴリオ暦の日付を構築します。
/// 先頭の数字が4桁であっても常に民國年として扱います（推測はしない）。
///
/// 解析できない入力はすべて`None`になります。スプレッドシートの
/// 日付列には空欄や別書式のセルが混ざるのが普通で、それらは
/// エラーではなく「日付なし」として扱うためです。
///
/// # 使用例
///
/// ```rust
/// use chrono::NaiveDate;
/// use planview::parse_minguo_date;
///
/// assert_eq!(
///     parse_minguo_date("110/05/15"),
///     NaiveDate::from_ymd_opt(2021, 5, 15)
/// );
/// assert_eq!(parse_minguo_date("110/02/30"), None);
/// ```
pub fn parse_minguo_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let year: i32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let day: u32 = parts[2].trim().parse().ok()?;

    NaiveDate::from_ymd_opt(year.checked_add(MINGUO_YEAR_OFFSET)?, month, day)
}

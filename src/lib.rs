//! planview - Pure-Rust plan-sheet explorer for Excel data
//!
//! This crate provides the data core behind a set of spreadsheet utility
//! pages: a month-calendar view that plots date-keyed rows onto a 7-column
//! grid, a keyword search tool with pagination and export, and a category
//! tally for pie-chart statistics. Dates in the source sheets use the
//! Minguo (ROC) year numbering (`110/05/15` → 2021-05-15).
//!
//! Every view is rebuilt from scratch on each call: load a file, pick
//! columns, transform, render. There is no persistence and no incremental
//! update path.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use planview::{EventCalendarBuilder, WorkbookSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load a sheet with the header on row 1, all cells as text
//!     let mut source = WorkbookSource::open(File::open("plans.xlsx")?)?;
//!     let table = source.load_table("Sheet1", 1)?;
//!
//!     // Map columns and build the January 2024 snapshot
//!     let calendar = EventCalendarBuilder::new()
//!         .with_date_column("日期")
//!         .with_title_column("名稱")
//!         .with_detail_columns(["負責人", "地點"])
//!         .build()?;
//!     let view = calendar.build_month_view(&table, 2024, 1)?;
//!
//!     println!("{} events in 2024", view.counts.for_year(2024));
//!     for day in &view.agenda {
//!         println!("Jan {}: {} events", day.day, day.events.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Keyword Search
//!
//! ```rust,no_run
//! use std::fs::File;
//! use planview::{OutputFormat, ResultFormatter, SearchQuery, WorkbookSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut source = WorkbookSource::open(File::open("plans.xlsx")?)?;
//!     let table = source.load_table("Sheet1", 8)?;
//!
//!     let result = SearchQuery::new("農業")
//!         .in_columns(["名稱", "內容"])
//!         .returning(["編號", "名稱", "負責人"])
//!         .execute(&table)?;
//!
//!     println!("{} hits, {} pages", result.len(), result.total_pages(20));
//!
//!     // Render the first page as an aligned Markdown table
//!     let formatter = ResultFormatter::from_format(OutputFormat::Markdown);
//!     formatter.render(&result, &mut std::io::stdout())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Calendar HTML
//!
//! ```rust,no_run
//! use std::fs::File;
//! use planview::{render_month_html, EventCalendarBuilder, WorkbookSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = WorkbookSource::open(File::open("plans.xlsx")?)?;
//! let table = source.load_table("Sheet1", 1)?;
//! let view = EventCalendarBuilder::new()
//!     .with_date_column("日期")
//!     .with_title_column("名稱")
//!     .build()?
//!     .build_month_view(&table, 2024, 1)?;
//!
//! let mut html = Vec::new();
//! render_month_html(&view, &mut html)?;
//! # Ok(())
//! # }
//! ```

mod api;
mod calendar;
mod error;
mod ingest;
mod output;
mod search;
mod stats;
mod types;

// 公開API
pub use api::OutputFormat;
pub use calendar::{
    parse_minguo_date, AgendaDay, DayCell, Event, EventCalendar, EventCalendarBuilder,
    EventIndex, MonthCounts, MonthGrid, MonthSelection, MonthView, MINGUO_YEAR_OFFSET,
};
pub use error::PlanViewError;
pub use ingest::WorkbookSource;
pub use output::{render_month_html, search_to_csv_bytes, search_to_xlsx_bytes, ResultFormatter};
pub use search::{PageCursor, SearchQuery, SearchResult};
pub use stats::CategoryCounts;
pub use types::{RowRef, Table};

//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool on top of
//! planview: load a plan sheet, then either render a month calendar or
//! run a keyword search.

use std::fs::File;
use std::process;

use planview::{
    render_month_html, EventCalendarBuilder, OutputFormat, ResultFormatter, SearchQuery,
    WorkbookSource,
};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <input.xlsx> <command> [options]", program);
    eprintln!("\nCommands:");
    eprintln!("  sheets                       List sheet names");
    eprintln!("  calendar                     Render a month calendar as HTML");
    eprintln!("  search <keyword>             Search and print a Markdown table");
    eprintln!("\nOptions:");
    eprintln!("  --sheet <name>               Sheet to load (default: first sheet)");
    eprintln!("  --header-row <n>             1-based header row (default: 1)");
    eprintln!("  --date-col <name>            Date column for the calendar");
    eprintln!("  --title-col <name>           Title column for the calendar");
    eprintln!("  --detail-col <name>          Detail column (repeatable)");
    eprintln!("  --year <n> --month <n>       Target month (calendar)");
    eprintln!("  --search-col <name>          Column to search (repeatable)");
    eprintln!("  --csv                        Print search results as CSV");
    eprintln!("\nExamples:");
    eprintln!("  {} plans.xlsx sheets", program);
    eprintln!(
        "  {} plans.xlsx calendar --date-col 日期 --title-col 名稱 --year 2024 --month 1",
        program
    );
    eprintln!("  {} plans.xlsx search 農業 --search-col 名稱", program);
    process::exit(1);
}

fn option_value(args: &[String], i: usize) -> &str {
    if i + 1 >= args.len() {
        eprintln!("Error: {} requires a value", args[i]);
        process::exit(1);
    }
    &args[i + 1]
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let command = args[2].as_str();

    let mut sheet: Option<String> = None;
    let mut header_row: u32 = 1;
    let mut date_col: Option<String> = None;
    let mut title_col: Option<String> = None;
    let mut detail_cols: Vec<String> = Vec::new();
    let mut search_cols: Vec<String> = Vec::new();
    let mut year: i32 = 2024;
    let mut month: u32 = 1;
    let mut as_csv = false;
    let mut keyword: Option<String> = None;

    let mut i = 3;
    if command == "search" {
        if args.len() < 4 {
            eprintln!("Error: search requires a keyword");
            process::exit(1);
        }
        keyword = Some(args[3].clone());
        i = 4;
    }

    while i < args.len() {
        match args[i].as_str() {
            "--sheet" => {
                sheet = Some(option_value(&args, i).to_string());
                i += 2;
            }
            "--header-row" => {
                header_row = option_value(&args, i).parse().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid header row: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--date-col" => {
                date_col = Some(option_value(&args, i).to_string());
                i += 2;
            }
            "--title-col" => {
                title_col = Some(option_value(&args, i).to_string());
                i += 2;
            }
            "--detail-col" => {
                detail_cols.push(option_value(&args, i).to_string());
                i += 2;
            }
            "--search-col" => {
                search_cols.push(option_value(&args, i).to_string());
                i += 2;
            }
            "--year" => {
                year = option_value(&args, i).parse().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid year: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--month" => {
                month = option_value(&args, i).parse().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid month: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--csv" => {
                as_csv = true;
                i += 1;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    let file = File::open(input_path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot open {}: {}", input_path, e);
        process::exit(1);
    });
    let mut source = WorkbookSource::open(file).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if command == "sheets" {
        for name in source.sheet_names() {
            println!("{}", name);
        }
        return;
    }

    let sheet_name = sheet.unwrap_or_else(|| {
        source.sheet_names().first().cloned().unwrap_or_else(|| {
            eprintln!("Error: Workbook has no sheets");
            process::exit(1);
        })
    });
    let table = source
        .load_table(&sheet_name, header_row)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

    if table.is_empty() {
        eprintln!("Error: No data rows found. Check the header row setting.");
        process::exit(1);
    }

    match command {
        "calendar" => {
            let (Some(date_col), Some(title_col)) = (date_col, title_col) else {
                eprintln!("Error: calendar requires --date-col and --title-col");
                process::exit(1);
            };
            let view = EventCalendarBuilder::new()
                .with_date_column(date_col)
                .with_title_column(title_col)
                .with_detail_columns(detail_cols)
                .build()
                .and_then(|calendar| calendar.build_month_view(&table, year, month))
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                });

            eprintln!(
                "{} events in {}, {} in {}-{:02}",
                view.counts.for_year(year),
                year,
                view.counts.for_month(year, month),
                year,
                month
            );
            let mut stdout = std::io::stdout();
            if let Err(e) = render_month_html(&view, &mut stdout) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        "search" => {
            let keyword = keyword.unwrap_or_default();
            if search_cols.is_empty() {
                eprintln!("Error: search requires at least one --search-col");
                process::exit(1);
            }
            let result = SearchQuery::new(keyword)
                .in_columns(search_cols)
                .execute(&table)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                });

            eprintln!("{} rows matched", result.len());
            let format = if as_csv {
                OutputFormat::Csv
            } else {
                OutputFormat::Markdown
            };
            let mut stdout = std::io::stdout();
            if let Err(e) = ResultFormatter::from_format(format).render(&result, &mut stdout) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        _ => usage(&args[0]),
    }
}

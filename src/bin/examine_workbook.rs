use calamine::{open_workbook_auto, DataType, Reader};
use std::env;

use ugc_chart_data::dates::parse_sheet_date;
use ugc_chart_data::importers::HeaderMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let Some(file_path) = args.get(1) else {
        return Err("usage: examine-workbook <workbook> [sheet]".into());
    };

    println!("Opening workbook: {file_path}");
    let mut workbook = open_workbook_auto(file_path)?;

    let sheet_names = workbook.sheet_names();
    println!("\nSheet names:");
    for (i, name) in sheet_names.iter().enumerate() {
        match parse_sheet_date(name) {
            Some(date) => println!("  {i}: {name} (report date {date})"),
            None => println!("  {i}: {name}"),
        }
    }

    // Default to the first sheet (song info)
    let sheet_name = match args.get(2) {
        Some(name) => name.clone(),
        None => sheet_names
            .first()
            .cloned()
            .ok_or("workbook has no sheets")?,
    };

    println!("\n\nExamining sheet: {sheet_name}");
    println!("{}", "=".repeat(100));

    let range = workbook.worksheet_range(&sheet_name)?;
    println!("Dimensions: {:?}", range.get_size());

    if let Some(header_row) = range.rows().next() {
        let headers = HeaderMap::from_row(header_row);
        if headers.is_empty() {
            println!("\nHeaders: (first row has no named columns)");
        } else {
            println!("\nHeaders ({} named columns):", headers.len());
            for (name, index) in headers.iter() {
                println!("  Col {index:3}: {name}");
            }
        }
    }

    println!("\nFirst 20 rows (showing first 13 columns):");
    println!("{}", "=".repeat(100));

    for (row_idx, row) in range.rows().enumerate().take(20) {
        let has_data = row.iter().any(|cell| !cell.is_empty());
        if has_data {
            print!("Row {:3}: ", row_idx + 1);
            for cell in row.iter().take(13) {
                if cell.is_empty() {
                    print!("[empty] ");
                } else {
                    print!("[{cell}] ");
                }
            }
            println!();
        }
    }

    Ok(())
}

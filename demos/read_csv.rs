//! Example: Read a CSV file and print its labels and a column

use std::path::Path;
use lib_csvdoc::{from_file, DocumentOptions, LabelParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = DocumentOptions::default().with_labels(LabelParams::both());

    let csv_path = Path::new("assets/examples/prices.csv");
    let doc = from_file(csv_path, &options)?;

    println!("CSV Info");
    println!("Rows: {}", doc.row_count());
    println!("Columns: {}", doc.column_count());
    println!("Encoding: {:?}", doc.encoding());
    println!("Line ending: {}", doc.line_ending());
    println!();

    println!("Columns");
    for (i, name) in doc.column_names().iter().enumerate() {
        println!("{} - {}", i, name);
    }
    println!();

    if let Some(first) = doc.column_names().first() {
        let values: Vec<String> = doc.get_column(first.as_str())?;
        for (row, value) in doc.row_names().iter().zip(values) {
            println!("{}: {}", row, value);
        }
    }

    Ok(())
}

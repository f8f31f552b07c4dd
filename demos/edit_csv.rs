//! Example: Build a table in memory, edit it and write it as TSV

use lib_csvdoc::{ConverterParams, Document, DocumentOptions, SeparatorParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = DocumentOptions::default()
        .with_separator(SeparatorParams::tsv())
        .with_converter(ConverterParams::with_defaults(0.0, 0));
    let mut doc = Document::new(options);

    doc.set_row(0usize, &["apple", "3", "0.5"])?;
    doc.set_row(1usize, &["pear", "", "0.75"])?;
    doc.set_column_name(0, "Fruit")?;
    doc.set_column_name(1, "Count")?;
    doc.set_column_name(2, "Price")?;

    // Empty counts read back as the default
    let counts: Vec<i32> = doc.get_column("Count")?;
    let prices: Vec<f64> = doc.get_column("Price")?;
    let total: f64 = counts.iter().zip(&prices).map(|(c, p)| *c as f64 * p).sum();
    println!("Total: {}", total);

    doc.insert_column(3, &[total], Some("Total"))?;
    doc.save_as("test_output.tsv")?;
    println!("\nExported to test_output.tsv");

    Ok(())
}

//! Schema command - print expected voucher input formats

use clap::Args;
use dividify::tax::VoucherInput;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the voucher input file
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(VoucherInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => {
                let names: Vec<_> = CSV_FIELDS.iter().map(|(name, _, _)| *name).collect();
                println!("{}", names.join(","));
            }
            SchemaFormat::CsvFields => {
                println!("Voucher CSV Format");
                println!("==================");
                println!();
                for (name, required, description) in CSV_FIELDS {
                    let req = if *required { "required" } else { "optional" };
                    println!("{:14} ({:8})  {}", name, req, description);
                }
                println!();
                println!("Vouchers are grouped by shareholder and the tax year of payment_date");
            }
        }
        Ok(())
    }
}

const CSV_FIELDS: &[(&str, bool, &str)] = &[
    ("id", false, "Voucher reference"),
    ("shareholder", true, "Shareholder name as printed on the voucher"),
    ("payment_date", true, "Payment date (YYYY-MM-DD)"),
    ("gross_amount", true, "Gross dividend paid in GBP"),
    (
        "other_income",
        false,
        "Shareholder's other taxable income for the year (largest value per year is used)",
    ),
];

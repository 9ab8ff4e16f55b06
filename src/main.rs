mod cmd;

use clap::{Parser, Subcommand};

/// UK dividend and director's loan tax calculator
#[derive(Parser, Debug)]
#[command(name = "dividify", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dividend tax by band for a gross dividend
    Dividend(cmd::dividend::DividendCommand),
    /// Section 455 tax on an outstanding director's loan
    S455(cmd::s455::S455Command),
    /// Dividend tax per shareholder and tax year from a vouchers file
    Vouchers(cmd::vouchers::VouchersCommand),
    /// List supported tax years and their rates
    Years(cmd::years::YearsCommand),
    /// Print the expected vouchers input format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    log::debug!("{:?}", cli.command);

    match cli.command {
        Command::Dividend(cmd) => cmd.exec(),
        Command::S455(cmd) => cmd.exec(),
        Command::Vouchers(cmd) => cmd.exec(),
        Command::Years(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}

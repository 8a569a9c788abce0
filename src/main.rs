mod classifier;
mod cli;
mod stream;

use cli::Cli;

fn main() {
    let cli = Cli::parse_args();
    cli::setup_logging(cli.quiet);

    if let Err(err) = cli.run() {
        eprintln!("adscan: {err:#}");
        std::process::exit(1);
    }
}

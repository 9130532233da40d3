mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cog_scaffold::Generator;
use cog_scaffold::generator::fs::DiskFs;
use cog_scaffold::generator::process::SystemRunner;

/// Initialize stderr diagnostics.
///
/// Banners and subprocess output own stdout, so tracing stays on stderr and
/// is quiet unless RUST_LOG asks for more.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let template_root = cli.template_root();
    let destination = cli.destination.clone();
    let options = cli.resolve_options()?;

    let mut fs = DiskFs;
    let mut runner = SystemRunner;
    let mut stdout = std::io::stdout();

    let mut generator = Generator::new(
        options,
        template_root,
        destination,
        &mut fs,
        &mut runner,
        &mut stdout,
    );
    generator.run()
}

//! CLI entry point for the quadtree photomosaic builder

use clap::Parser;
use fractomosaic::io::cli::{Cli, FileProcessor};

fn main() -> fractomosaic::Result<()> {
    let cli = Cli::parse();
    fractomosaic::io::logging::init(cli.verbose);
    let mut processor = FileProcessor::new(cli);
    processor.process()
}

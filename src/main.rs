use std::path::PathBuf;

use clap::Parser;
use sitegen::Config;

#[derive(Parser)]
#[command(name = "sitegen")]
#[command(about = "Generate a static site from a tree of Markdown files")]
struct Cli {
    /// URL prefix the site is served under (defaults to the configured one, "/")
    base_path: Option<String>,

    /// Site configuration file
    #[arg(short, long, default_value = "sitegen.toml")]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let mut config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(base_path) = cli.base_path {
        config.render.base_path = base_path;
    }

    let report = match sitegen::site::build(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for (path, e) in &report.failed {
        eprintln!("Failed {}: {}", path.display(), e);
    }
    if !report.is_success() {
        std::process::exit(1);
    }

    println!(
        "Generated {} pages in {}",
        report.generated.len(),
        config.site.output_dir.display()
    );
}

mod config;
mod export;
mod normalize;
mod notion;
mod props;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use export::{Database, Export, DEFAULT_OUTPUT_PATH};

#[derive(Parser)]
#[command(name = "notion_export", about = "Export Notion databases to a JSON file for the site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query every database, normalize the rows and write the JSON file
    Fetch {
        /// Output path
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,
        /// Print the JSON to stdout instead of writing the file
        #[arg(long)]
        stdout: bool,
    },
    /// Show item counts of an existing export
    Stats {
        /// Export to read
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch { output, stdout } => {
            let settings = config::Settings::from_env()?;
            info!("Notion API {} (version {})", settings.api_url, settings.version);
            let client = notion::NotionClient::new(&settings)?;

            if !stdout {
                println!("Fetching Notion data...");
            }
            let pb = ProgressBar::new(Database::ALL.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
                    .progress_chars("=> "),
            );
            let data = export::collect(&client, &pb);
            pb.finish_and_clear();
            let data = data?;

            if stdout {
                println!("{}", data.to_json()?);
            } else {
                data.write(&output)?;
                println!("Saved to {}", output.display());
                print_counts(&data);
            }
            Ok(())
        }
        Commands::Stats { input } => {
            let data = Export::read(&input)?;
            println!("{}", input.display());
            print_counts(&data);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("Done in {}", format_duration(elapsed));
    }

    result
}

fn print_counts(data: &Export) {
    for (key, n) in data.counts() {
        println!("  {}: {} items", key, n);
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}

mod config;
mod document;
mod error;
mod fetch;
mod links;
mod pipeline;
mod text;
mod writer;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "doc2md",
    about = "Fetch every link in a docx document into one paginated text file"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract links, fetch each page, write the paginated output file
    Process {
        /// Input .docx document
        docx: PathBuf,
        /// Output text file (overwritten)
        output: PathBuf,
        /// Words accumulated before a page-break marker (default: 1000)
        #[arg(short = 'w', long)]
        words_per_page: Option<usize>,
    },
    /// List the links that would be fetched, without network traffic
    Links {
        /// Input .docx document
        docx: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            docx,
            output,
            words_per_page,
        } => {
            let mut cfg = config::PipelineConfig::from_env();
            if let Some(n) = words_per_page {
                cfg.words_per_page = n;
            }

            println!("Processing {:?} ({} words per page)...", docx, cfg.words_per_page);
            let report =
                pipeline::Pipeline::new(cfg, fetch::PageFetcher::new()).process(&docx, &output)?;

            println!(
                "Done: {} links, {} page blocks, {} page breaks.",
                report.links_total, report.pages_written, report.page_breaks
            );
            if !report.failures.is_empty() {
                println!("\n{} links failed:", report.failures.len());
                for f in &report.failures {
                    println!("  {} - {}", f.url, f.error);
                }
            }
            println!("Saved to {:?}", report.output_path);
        }
        Commands::Links { docx } => {
            let text = document::load_paragraph_text(&docx)?;
            let urls = links::extract_links(&text);
            if urls.is_empty() {
                println!("No links found.");
                return Ok(());
            }
            for (i, url) in urls.iter().enumerate() {
                println!("{:>3}  {}", i + 1, url);
            }
            println!("\n{} links", urls.len());
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

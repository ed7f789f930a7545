use clap::{Parser, Subcommand};
use gallery_lightbox::types::Manifest;
use gallery_lightbox::{config, output, render, replay, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gallery-lightbox")]
#[command(about = "Restaurant photo gallery with a headless lightbox")]
#[command(long_about = "\
Restaurant photo gallery with a headless lightbox

The gallery directory is the data source. Images are ordered by numeric
prefix, titled by filename, and described by sidecar .txt files.

Gallery structure:

  gallery/
  ├── config.toml                  # Lightbox config (optional)
  ├── 010-Wood-Fired-Oven.jpg      # Title: \"Wood Fired Oven\"
  ├── 010-Wood-Fired-Oven.txt      # Description for the image above
  ├── 020-Terrace.webp
  ├── 030.jpg                      # No title: placeholder (\"Gallery Image\")
  └── chef_at_work.png             # Unnumbered: shown after numbered images

Replay scripts drive the lightbox one input per line:

  open 3          click the gallery item at index 3
  next | prev     click the next / previous control
  close           click the close control
  click backdrop  click target: backdrop | panel | close | prev | next
  key Escape      key press (KeyboardEvent.key spelling)

Run 'gallery-lightbox gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Gallery directory
    #[arg(long, default_value = "gallery", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for the intermediate manifest
    #[arg(long, default_value = ".gallery-lightbox-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the gallery directory into a manifest
    Scan,
    /// Validate the gallery directory without writing anything
    Check,
    /// Render the gallery page and one overlay page per image
    Page,
    /// Print the overlay HTML for one image of the manifest
    Overlay {
        /// Zero-based image index
        #[arg(long)]
        index: usize,
    },
    /// Run a scripted input sequence against the manifest
    Replay {
        /// Script file, one input per line
        script: PathBuf,
        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let manifest_path = cli.temp_dir.join("manifest.json");

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            if manifest.items.is_empty() {
                return Err(format!("no images found in {}", cli.source.display()).into());
            }
            println!("==> Gallery is valid");
        }
        Command::Page => {
            let manifest = read_manifest(&manifest_path)?;
            std::fs::create_dir_all(&cli.output)?;
            let page_path = cli.output.join(render::INDEX_PAGE);
            std::fs::write(&page_path, render::gallery_page(&manifest).into_string())?;
            println!(
                "Generated {} ({} images)",
                page_path.display(),
                manifest.items.len()
            );
            for index in 0..manifest.items.len() {
                if let Some(page) = render::image_page(&manifest, index) {
                    let name = render::image_page_name(index);
                    std::fs::write(cli.output.join(&name), page.into_string())?;
                    println!("Generated {}", cli.output.join(&name).display());
                }
            }
        }
        Command::Overlay { index } => {
            let manifest = read_manifest(&manifest_path)?;
            let item = manifest.items.get(index).ok_or_else(|| {
                format!(
                    "index {index} is out of range for a gallery of {} images",
                    manifest.items.len()
                )
            })?;
            println!(
                "{}",
                render::overlay(item, index, manifest.items.len()).into_string()
            );
        }
        Command::Replay { script, json } => {
            let manifest = read_manifest(&manifest_path)?;
            let text = std::fs::read_to_string(&script)?;
            let events = replay::parse_script(&text)?;
            let steps = replay::run(&manifest, &events)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                output::print_replay_output(&steps);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the manifest written by `scan`, re-validating its embedded config.
fn read_manifest(path: &Path) -> Result<Manifest, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {} (run 'scan' first): {e}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    manifest.config.validate()?;
    Ok(manifest)
}

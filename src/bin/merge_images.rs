//! Merge spreadsheet rows onto a template image
//!
//! Renders one JPEG per row of the first worksheet and writes them all into
//! a single zip.
//!
//! Usage:
//!   cargo run --release --features office --bin merge_images -- \
//!     --sheet rows.xlsx --template background.jpg
//!   cargo run --release --features office --bin merge_images -- \
//!     --sheet rows.xlsx --template background.jpg --output out.zip --font-dir fonts/

use mergeplate::sheet::read_sheet;
use mergeplate::{BatchRenderer, MergeOptions, Template, DEFAULT_ARCHIVE_NAME, DEFAULT_JPEG_QUALITY};
use std::path::PathBuf;
use std::time::Instant;

struct MergeConfig {
    sheet: Option<PathBuf>,
    template: Option<PathBuf>,
    output: PathBuf,
    font_dirs: Vec<PathBuf>,
    quality: u8,
    verbose: bool,
}

impl MergeConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            sheet: None,
            template: None,
            output: PathBuf::from(DEFAULT_ARCHIVE_NAME),
            font_dirs: Vec::new(),
            quality: DEFAULT_JPEG_QUALITY,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--sheet" => {
                    i += 1;
                    if i < args.len() {
                        config.sheet = Some(PathBuf::from(&args[i]));
                    }
                },
                "--template" => {
                    i += 1;
                    if i < args.len() {
                        config.template = Some(PathBuf::from(&args[i]));
                    }
                },
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        config.output = PathBuf::from(&args[i]);
                    }
                },
                "--font-dir" => {
                    i += 1;
                    if i < args.len() {
                        config.font_dirs.push(PathBuf::from(&args[i]));
                    }
                },
                "--quality" => {
                    i += 1;
                    match args.get(i).map(|q| q.parse::<u8>()) {
                        Some(Ok(q)) => config.quality = q,
                        _ => eprintln!("Ignoring invalid --quality value"),
                    }
                },
                "--verbose" | "-v" => {
                    config.verbose = true;
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        config
    }
}

fn run(config: &MergeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let sheet = config.sheet.as_ref().ok_or("missing --sheet <FILE>")?;

    let rows = read_sheet(sheet)?;
    println!("Rows: {}", rows.len());
    if config.verbose {
        println!("Columns: {}", rows.columns().join(", "));
    }

    // A template that fails to load is reported the same way as a missing one
    let template = match &config.template {
        Some(path) => match Template::open(path) {
            Ok(t) => Some(t),
            Err(e) => {
                eprintln!("Failed to load template {}: {}", path.display(), e);
                None
            },
        },
        None => None,
    };

    let mut options = MergeOptions::new().as_jpeg(config.quality);
    for dir in &config.font_dirs {
        options = options.with_font_dir(dir);
    }

    let renderer = BatchRenderer::new(options);
    if renderer.compositor().rasterizer().is_empty() {
        eprintln!("Warning: no usable font found; images will contain the template only");
        eprintln!("         Pass --font-dir <DIR> to supply fonts");
    }
    let archive = renderer.render_all(&rows, template.as_ref())?;

    if config.verbose {
        for entry in archive.entries() {
            println!("  {} ({:.2} KB)", entry.name, entry.data.len() as f64 / 1024.0);
        }
    }

    archive.save(&config.output)?;
    println!("Wrote {} image(s) to {}", archive.len(), config.output.display());
    Ok(())
}

fn main() {
    env_logger::init();

    let config = MergeConfig::from_args();

    println!("Image Merge");
    println!("===========");

    let start_time = Instant::now();
    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    println!("Done in {:.2}s", start_time.elapsed().as_secs_f64());
}

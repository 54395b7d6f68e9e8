//! # cvpdf CLI
//!
//! Usage:
//!   cvpdf profile.json -o resume.pdf
//!   echo '{ ... }' | cvpdf
//!   cvpdf --example > profile.json
//!   cvpdf profile.json --date 2026-03-09 --layout-json

mod config;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{parse_date, Config};
use cvpdf::{render_pdf, render_resume, ProfileRecord};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a profile JSON file as a PDF resume")]
struct Args {
    /// Profile JSON file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Output file (default: CV_<first>_<last>.pdf in CVPDF_OUTPUT_DIR)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Footer date as YYYY-MM-DD (default: CVPDF_GENERATED_ON, then today)
    #[arg(short, long)]
    date: Option<String>,

    /// Max entries per list before the profile is rejected
    #[arg(long)]
    max_entries: Option<usize>,

    /// Print the laid-out pages as JSON instead of writing a PDF
    #[arg(long)]
    layout_json: bool,

    /// Print a sample profile and exit
    #[arg(long)]
    example: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if args.example {
        print!("{}", example_profile_json());
        return Ok(());
    }

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let profile: ProfileRecord = serde_json::from_str(&input).map_err(cvpdf::CvError::from)?;

    let mut limits = config.limits();
    if let Some(max) = args.max_entries {
        limits.max_entries = max;
    }
    limits.check(&profile)?;

    let generated_on = match &args.date {
        Some(raw) => parse_date(raw)?,
        None => config.generated_on.unwrap_or_else(cvpdf::today),
    };

    let document = render_resume(&profile, generated_on);

    if args.layout_json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &document).context("Failed to write layout JSON")?;
        writeln!(out)?;
        return Ok(());
    }

    let bytes = render_pdf(&document)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_dir.join(profile.suggested_file_name()));

    fs::write(&output_path, &bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    info!(
        path = %output_path.display(),
        pages = document.pages.len(),
        bytes = bytes.len(),
        "resume written"
    );
    eprintln!(
        "✓ Written {} bytes ({} page(s)) to {}",
        bytes.len(),
        document.pages.len(),
        output_path.display()
    );
    Ok(())
}

fn example_profile_json() -> &'static str {
    r##"{
  "firstName": "Ada",
  "lastName": "Lovelace",
  "email": "ada@analytical.engine",
  "phone": "+44 20 7946 0000",
  "city": "London",
  "postalCode": "SW1Y 4LE",
  "address": "12 St James's Square",
  "birthDate": "1815-12-10",
  "profession": "Mathématicienne",
  "summary": "Première programmeuse de l'histoire. Auteure des notes sur la machine analytique de Charles Babbage, dont un algorithme de calcul des nombres de Bernoulli.",
  "skills": ["Mathématiques", "Algorithmique", "Machine analytique", "Traduction", "Poésie scientifique"],
  "experiences": [
    {
      "company": "Analytical Engine Project",
      "position": "Analyste",
      "startDate": "1842-01",
      "endDate": "1843-09",
      "description": "Traduction et annotation du mémoire de Menabrea. Rédaction de la note G, premier programme publié."
    },
    {
      "company": "Indépendante",
      "position": "Chercheuse",
      "startDate": "1843-10",
      "description": "Travaux sur le calcul et la composition musicale par machine."
    }
  ],
  "education": [
    {
      "school": "Cours particuliers d'Augustus De Morgan",
      "degree": "Études avancées",
      "field": "Mathématiques",
      "startDate": "1840",
      "endDate": "1842"
    }
  ]
}
"##
}

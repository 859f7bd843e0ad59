use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use donorcert::{
    AppConfig, CertificateRenderer, CertificateRequest, Currency, DonationLog, NoopLog,
    Orchestrator, PersistOutcome, RenderOutcome, SheetsLog,
};

#[derive(Parser, Debug)]
#[command(name = "donorcert", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a donation, log it, and write the appreciation certificate.
    Submit(SubmitArgs),
    /// Render a certificate from already formatted text.
    Render(RenderArgs),
    /// Print diagnostics about font resolution.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct SubmitArgs {
    /// Donor name (Khmer or Latin).
    #[arg(long)]
    name: String,

    /// Donated amount.
    #[arg(long)]
    amount: f64,

    /// Donation currency.
    #[arg(long, value_enum, default_value_t = Currency::Usd)]
    currency: Currency,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the certificate PNG is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Do not append the donation to the spreadsheet log.
    #[arg(long, default_value_t = false)]
    no_log: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Donor name.
    #[arg(long)]
    name: String,

    /// Amount text exactly as it should appear, e.g. "1,000.00 $".
    #[arg(long)]
    amount_text: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Submit(args) => cmd_submit(args),
        Command::Render(args) => cmd_render(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(p) => AppConfig::from_path(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(AppConfig::default()),
    }
}

fn make_log(cfg: &AppConfig, disabled: bool) -> anyhow::Result<Box<dyn DonationLog>> {
    match (&cfg.sheets, disabled) {
        (Some(sheets), false) => Ok(Box::new(SheetsLog::new(sheets.clone())?)),
        _ => Ok(Box::new(NoopLog)),
    }
}

fn cmd_submit(args: SubmitArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let renderer = CertificateRenderer::new(cfg.certificate.clone())?;
    let log = make_log(&cfg, args.no_log)?;
    let mut orch = Orchestrator::new(renderer, log);

    let report = match orch.submit(&args.name, args.amount, args.currency) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("warning: {e}");
            anyhow::bail!("submission rejected");
        }
    };

    println!(
        "info: generating certificate for {} ({})",
        report.donor_name, report.amount_text
    );
    match &report.persistence {
        PersistOutcome::Persisted => println!("info: donation logged"),
        PersistOutcome::Skipped => {}
        PersistOutcome::Failed(_) => {
            for w in report.warnings() {
                eprintln!("warning: {w}");
            }
        }
    }

    match &report.render {
        RenderOutcome::Rendered(cert) => {
            let out = args.out_dir.join(&report.file_name);
            cert.save_png(&out)?;
            println!("success: wrote {}", out.display());
            Ok(())
        }
        RenderOutcome::Failed(msg) => {
            eprintln!("error: certificate could not be generated: {msg}");
            anyhow::bail!("render failed")
        }
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut renderer = CertificateRenderer::new(cfg.certificate)?;
    let cert = renderer.render(&CertificateRequest::new(args.name, args.amount_text))?;
    cert.save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut renderer = CertificateRenderer::new(cfg.certificate)?;
    let configured = renderer
        .config()
        .font_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<none>".to_string());
    let font = renderer.resolved_font();

    println!("configured: {configured}");
    println!("family: {}", font.family());
    println!("fallback: {}", font.is_fallback());
    if let Some(sha) = font.sha256_hex() {
        println!("sha256: {sha}");
    }
    println!(
        "script_hint: {}",
        renderer.config().script_hint.as_deref().unwrap_or("<none>")
    );
    Ok(())
}

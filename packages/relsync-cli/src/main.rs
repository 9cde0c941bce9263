use clap::Parser;
use relsync_config::{parse_file_list, ConfigError, DeployConfig, PartialConfig};
use relsync_core::{ReleaseSync, SyncReport};
use relsync_provider::GitHubReleaseService;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const EXIT_CONFIG: u8 = 2;

#[derive(Parser)]
#[command(name = "relsync")]
#[command(about = "Publish build artifacts as assets of a GitHub release")]
#[command(version)]
struct Cli {
    /// GitHub authorization token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// A comma separated list of files to deploy
    #[arg(long)]
    files: Option<String>,

    /// The release tag [default: SNAPSHOT]
    #[arg(long)]
    tag: Option<String>,

    /// Description of the deployment [default: current binaries]
    #[arg(long)]
    desc: Option<String>,

    /// Repository name
    #[arg(long)]
    repo: Option<String>,

    /// Repository owner
    #[arg(long)]
    user: Option<String>,

    /// Branch a newly created release points at [default: master]
    #[arg(long)]
    target: Option<String>,

    /// Base url of the REST API
    #[arg(long)]
    api_url: Option<String>,

    /// Base url of the upload endpoint
    #[arg(long)]
    uploads_url: Option<String>,

    /// JSON file providing any of the settings above; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log more (debug)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Log less (warnings only)
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn load_config(&self) -> Result<DeployConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => PartialConfig::from_json_file(path)?,
            None => PartialConfig::default(),
        };
        let flags = PartialConfig {
            token: self.token.clone(),
            owner: self.user.clone(),
            repo: self.repo.clone(),
            tag: self.tag.clone(),
            description: self.desc.clone(),
            files: self.files.as_deref().map(parse_file_list),
            target: self.target.clone(),
            api_url: self.api_url.clone(),
            uploads_url: self.uploads_url.clone(),
            user_agent: None,
        };
        base.merge(flags).into_config()
    }

    fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else if self.quiet {
            LevelFilter::WARN
        } else {
            LevelFilter::INFO
        }
    }
}

fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &SyncReport) {
    let release = &report.release;
    println!(
        "Release {} (id {}){}",
        release.tag_name,
        release.id,
        if report.created { " created" } else { "" }
    );
    for asset in &report.reconcile.deleted {
        println!("Deleted  {}", asset.name);
    }
    for failed in &report.reconcile.failed {
        println!(
            "Kept     {} ({}): {}",
            failed.asset.name, failed.asset.url, failed.error
        );
    }
    for outcome in &report.uploads {
        match &outcome.result {
            Ok(_) => println!("Uploaded {}", outcome.path.display()),
            Err(err) => println!("Failed   {}: {}", outcome.path.display(), err),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    debug!(
        owner = %config.owner,
        repo = %config.repo,
        tag = %config.tag,
        files = config.files.len(),
        "configuration loaded"
    );

    let service = Arc::new(GitHubReleaseService::new(&config));
    match ReleaseSync::new(service, &config).run().await {
        Ok(report) => {
            print_report(&report);
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                let failed = report.failed_uploads().count();
                eprintln!("{} of {} uploads failed", failed, report.uploads.len());
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("Error {}", err);
            ExitCode::FAILURE
        }
    }
}

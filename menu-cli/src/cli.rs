use clap::{Parser, Subcommand};
use menu_core::{
    Config, GeminiModel, GitHubIssues, KmaPortal, LOCATION, Pipeline, Prompt, SystemClock,
    WeatherSource, read_local_time,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "menu",
    version,
    about = "Files a weather-aware delivery menu recommendation as a GitHub issue"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch weather, ask the model for a menu and file it as an issue (default).
    Run {
        /// Print the recommendation instead of filing an issue.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the current weather reading.
    Weather,

    /// Print the prompt that would be sent to the model.
    Prompt,

    /// Print where the optional config file is read from.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run { dry_run: false }) {
            Command::Run { dry_run } => run_pipeline(dry_run).await?,
            Command::Weather => {
                let reading = KmaPortal::new()?.fetch().await?;
                println!("{LOCATION}: {} / {}", reading.condition, reading.temperature);
            }
            Command::Prompt => {
                let reading = KmaPortal::new()?.fetch().await?;
                let prompt = Prompt::new(LOCATION, &read_local_time(), &reading);
                println!("{}\n\n{}", prompt.content, prompt.format);
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

async fn run_pipeline(dry_run: bool) -> anyhow::Result<()> {
    let config = Config::load()?;

    if dry_run {
        let model = GeminiModel::new(config.gemini_api_key()?)?;
        let pipeline = Pipeline::new(
            Box::new(KmaPortal::new()?),
            Box::new(SystemClock),
            Box::new(model),
        );

        let draft = pipeline.prepare().await?;
        println!("{}", draft.issue().body);
        return Ok(());
    }

    // Fail before any network call if a secret is missing.
    let settings = config.validate()?;
    tracing::debug!(?settings, "configuration validated");

    let model = GeminiModel::new(settings.gemini_api_key.as_str())?;
    let publisher = GitHubIssues::from_settings(&settings)?;
    let pipeline = Pipeline::new(
        Box::new(KmaPortal::new()?),
        Box::new(SystemClock),
        Box::new(model),
    );

    let report = pipeline.run(&publisher).await?;
    match report.issue.html_url {
        Some(url) => println!("{url}"),
        None => println!("GitHub issue created"),
    }
    Ok(())
}

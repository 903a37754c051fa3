mod render;

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use common::Verdict;
use gavel_client::{
    ClientConfig, HistoryQuery, JudgeApi, PollEvent, PollOptions, SnapshotSource, SubmissionPoller,
};
use tracing::Level;

#[derive(Parser)]
#[command(name = "gavel", version, about = "Client for the judge service")]
struct Cli {
    /// Judge service base URL. Overrides the configured value.
    #[arg(long, global = true, env = "GAVEL__JUDGE__BASE_URL")]
    judge_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a submission once and print its current status.
    Status {
        /// Submission id assigned by the judge service.
        id: String,
    },
    /// Poll a submission until it reaches a terminal state.
    Watch {
        /// Submission id assigned by the judge service.
        id: String,
    },
    /// List submissions, newest range first.
    History {
        /// First list position (inclusive).
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// Last list position (exclusive).
        #[arg(long, default_value_t = 20)]
        end: u64,
        /// Filter by verdict (e.g., AC, WA, TLE).
        #[arg(long)]
        result: Option<Verdict>,
        /// Filter by user.
        #[arg(long)]
        user: Option<String>,
        /// Filter by problem; may be repeated.
        #[arg(long = "problem")]
        problems: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::WARN).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::load().context("failed to load configuration")?;
    if let Some(url) = cli.judge_url {
        config.judge.base_url = url;
    }
    let api = JudgeApi::new(&config.judge)?;

    match cli.command {
        Command::Status { id } => {
            let submission = api.fetch_submission(&id).await?;
            render::print_submission(&submission);
        }
        Command::Watch { id } => watch(api, &config, &id).await?,
        Command::History {
            start,
            end,
            result,
            user,
            problems,
        } => {
            let query = HistoryQuery {
                start,
                end,
                result,
                user,
                problems,
            };
            let submissions = api.list_submissions(&query).await?;
            if submissions.is_empty() {
                println!("no submissions in range");
            }
            for submission in &submissions {
                println!("{}", render::history_line(submission));
            }
        }
    }
    Ok(())
}

async fn watch(api: JudgeApi, config: &ClientConfig, id: &str) -> anyhow::Result<()> {
    let source: Arc<dyn SnapshotSource> = Arc::new(api);
    let mut poller = SubmissionPoller::new(source, PollOptions::from(&config.poll));
    let Some(mut events) = poller.watch(id) else {
        bail!("already watching submission {id}");
    };

    while let Some(event) = events.recv().await {
        match event {
            PollEvent::Progress(submission) => {
                println!("{}", render::progress_line(&submission));
            }
            PollEvent::Final(submission) => {
                render::print_submission(&submission);
            }
            PollEvent::TimedOut { attempts } => {
                bail!("submission timed out: still in queue after {attempts} polls");
            }
            PollEvent::Error(e) => return Err(e).context("polling failed"),
        }
    }
    Ok(())
}

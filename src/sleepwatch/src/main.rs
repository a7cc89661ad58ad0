#[macro_use]
extern crate log;

use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::PathBuf,
};

use anyhow::anyhow;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use sleepwatch::{
    Monitor, Sample, SleepSession, SystemClock,
    algos::{AnalysisConfig, SessionTrend},
    replay,
    types::AnalysisResult,
};
use tokio::{
    io::{AsyncBufReadExt as _, BufReader as AsyncBufReader},
    sync::mpsc,
};
use uuid::Uuid;

#[derive(Parser)]
pub struct SleepwatchCli {
    /// Seconds between two stage classifications
    #[arg(env, long, default_value_t = AnalysisConfig::CLASSIFY_INTERVAL_SECS)]
    pub classify_interval_secs: i64,
    #[clap(subcommand)]
    pub subcommand: SleepwatchCommand,
}

#[derive(Subcommand)]
pub enum SleepwatchCommand {
    ///
    /// Replay a recorded session (JSON lines) and print its report
    ///
    Replay {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    ///
    /// Monitor a live session from JSON sample lines on stdin
    /// Stops on Ctrl-C or end of input
    ///
    Monitor {
        #[arg(long)]
        json: bool,
    },
    ///
    /// Summarize several report files written with `--json`
    ///
    Trend { files: Vec<PathBuf> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = SleepwatchCli::parse();
    let interval = TimeDelta::try_seconds(cli.classify_interval_secs)
        .filter(|i| *i > TimeDelta::zero())
        .ok_or(anyhow!(
            "Invalid classify interval: {}",
            cli.classify_interval_secs
        ))?;
    let config = AnalysisConfig::default().with_classify_interval(interval);

    match cli.subcommand {
        SleepwatchCommand::Replay { file, json } => {
            let reader = BufReader::new(File::open(&file)?);
            let report = replay::replay(reader, config)?;
            print_report(&report, json)
        }
        SleepwatchCommand::Monitor { json } => {
            let report = monitor_command(config).await?;
            print_report(&report, json)
        }
        SleepwatchCommand::Trend { files } => {
            let mut reports = Vec::with_capacity(files.len());
            for file in files {
                let reader = BufReader::new(File::open(&file)?);
                reports.push(serde_json::from_reader::<_, AnalysisResult>(reader)?);
            }

            println!("{}", SessionTrend::new(&reports));
            Ok(())
        }
    }
}

async fn monitor_command(config: AnalysisConfig) -> anyhow::Result<AnalysisResult> {
    let session = SleepSession::start(Uuid::new_v4(), SystemClock, config);
    info!("Monitoring session {}, reading samples from stdin", session.id());
    let handle = Monitor::spawn(session)?;
    let sender = handle.sender();

    let (interrupt, mut interrupted) = mpsc::channel(1);
    ctrlc::set_handler(move || {
        let _ = interrupt.try_send(());
    })?;

    let mut lines = AsyncBufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = interrupted.recv() => break,
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match serde_json::from_str::<Sample>(&line) {
                    Ok(sample) => sender.send(sample).await?,
                    Err(error) => warn!("Skipping sample `{}`: {}", line, error),
                }
            }
        }
    }

    Ok(handle.stop().await?)
}

fn print_report(report: &AnalysisResult, json: bool) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, report)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", report)?;
    }
    Ok(())
}

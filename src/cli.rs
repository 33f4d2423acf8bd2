use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::service::aggregator::ScheduleSnapshot;
use crate::service::feed::CalendarFeed;

#[derive(Parser)]
#[command(about = "Scrape the GAF Aréna Žamberk schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every scraped event grouped by day.
    Schedule {
        #[arg(long)]
        json: bool,
    },
    /// Write the public skating calendar.
    Ics {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn cli(feed: CalendarFeed) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Schedule { json } => {
            let snapshot = feed.snapshot(Utc::now()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", format_schedule(&snapshot));
            }
        }
        Commands::Ics { output } => {
            let document = feed.build(Utc::now()).await?;
            match output {
                Some(path) => {
                    fs::write(&path, &document.ics)?;
                    println!(
                        "Wrote {} events ({} matched of {} scraped) to {}",
                        document.entries,
                        document.matched,
                        document.total,
                        path.display()
                    );
                }
                None => print!("{}", document.ics),
            }
        }
    }
    Ok(())
}

/// Human-readable listing, days in first-seen order.
pub fn format_schedule(snapshot: &ScheduleSnapshot) -> String {
    let mut body = String::from("\n=== GAF Aréna Žamberk - Weekly Schedule ===\n\n");
    if !snapshot.week_dates.is_empty() {
        body.push_str(&format!("Week: {}\n", snapshot.week_dates.join(" - ")));
    }

    let mut days: Vec<(&str, Vec<String>)> = Vec::new();
    for event in &snapshot.events {
        let date = if event.date.is_empty() { "Unknown" } else { event.date.as_str() };
        let time = if event.time.is_empty() { "??:??" } else { event.time.as_str() };
        let line = format!("  {} - {}", time, event.title);
        match days.iter_mut().find(|(day, _)| *day == date) {
            Some((_, lines)) => lines.push(line),
            None => days.push((date, vec![line])),
        }
    }

    for (day, lines) in days {
        body.push_str(&format!("\n📅 {}\n", day));
        for line in lines {
            body.push_str(&line);
            body.push('\n');
        }
    }
    body
}

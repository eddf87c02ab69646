use clap::Parser;
use forecast_core::{FileCityStore, OpenMeteoClient, SearchSession};
use inquire::{InquireError, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "7-day weather forecast • 7 రోజుల వాతావరణం")]
pub struct Cli {
    /// City to look up once; starts an interactive session when omitted.
    pub city: Option<String>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = OpenMeteoClient::new();
        let store = FileCityStore::open()?;
        let mut session =
            SearchSession::new(Box::new(client.clone()), Box::new(client), Box::new(store));

        if let Some(city) = &self.city {
            self.search_and_render(&mut session, city).await;
            return Ok(());
        }

        self.interactive(&mut session).await
    }

    /// The interactive session: one automatic search on startup, then the
    /// prompt loop standing in for the search form. Esc or Ctrl-C ends it.
    async fn interactive(&self, session: &mut SearchSession) -> anyhow::Result<()> {
        println!("{}\n", render::title_banner(self.no_color));

        println!("{}", render::loading_line(self.no_color));
        session.start().await;
        print!("{}", render::render_state(session.state(), self.no_color));

        loop {
            println!();
            let submitted = Text::new("Enter city / పట్టణం నమోదు చేయండి")
                .with_initial_value(&session.state().query)
                .prompt_skippable();

            match submitted {
                Ok(Some(city)) => self.search_and_render(session, &city).await,
                Ok(None) => break,
                Err(InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    async fn search_and_render(&self, session: &mut SearchSession, query: &str) {
        // Blank submissions are rejected by the orchestrator without any
        // state change; don't show a loading line for them either.
        if query.trim().is_empty() {
            return;
        }

        println!("{}", render::loading_line(self.no_color));
        session.search(query).await;
        print!("{}", render::render_state(session.state(), self.no_color));
    }
}

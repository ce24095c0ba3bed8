//! Form command - Interactive estimator form.

use std::io;

use anyhow::Result;
use clap::Args;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use steelprice_core::PriceSheet;

use crate::form::FormApp;

#[derive(Args)]
pub struct FormArgs {
    /// Initial category number or name
    #[arg(short, long)]
    category: Option<String>,

    /// Initial steel grade name
    #[arg(short, long)]
    name: Option<String>,
}

pub fn execute(args: FormArgs, sheet: &PriceSheet) -> Result<()> {
    let mut app = FormApp::new(sheet);
    if let Some(selector) = &args.category {
        app.select_category(selector)?;
    }
    if let Some(name) = args.name {
        app.set_grade_name(name);
    }

    info!("Opening estimator form");
    run_form(&mut app)
}

fn run_form(app: &mut FormApp<'_>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = loop {
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) {
                    break Ok(());
                }
            }
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

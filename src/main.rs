use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::ui::app::{App, InputMode};
use expense_tracker::ui::render;
use expense_tracker::utils::csv::{export_expenses, import_expenses};
use expense_tracker::{AppConfig, ExpenseStore};

#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(version = "0.1.0")]
#[command(about = "A terminal expense tracker with a running total")]
struct Args {
    /// Use a specific snapshot file instead of the default location
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Export the expense list as CSV and exit
    #[arg(long)]
    export: Option<PathBuf>,

    /// Append expenses from a CSV file and exit
    #[arg(long)]
    import: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load()?;

    let snapshot_path = match args.file.or_else(|| config.data_file.clone()) {
        Some(path) => path,
        None => ExpenseStore::default_path()?,
    };
    let mut store = ExpenseStore::load(&snapshot_path);

    // Handle CLI-only commands
    if let Some(path) = args.export {
        export_expenses(&path, store.expenses())?;
        println!("Exported {} expenses to {}", store.len(), path.display());
        return Ok(());
    }

    if let Some(path) = args.import {
        let imported = import_expenses(&path)?;
        let count = imported.len();
        for expense in imported {
            store.add(expense);
        }
        println!("Imported {} expenses from {}", count, path.display());
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run it
    let app = App::new(store, config);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    loop {
        terminal.draw(|f| render::draw(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Up => app.previous(),
                        KeyCode::Down => app.next(),
                        KeyCode::Char('a') => app.begin_add(),
                        KeyCode::Char('e') => app.edit_selected(),
                        KeyCode::Char('d') => app.delete_selected(),
                        _ => {}
                    },
                    InputMode::Adding | InputMode::Editing(_) => match key.code {
                        KeyCode::Enter => app.submit_form(),
                        KeyCode::Esc => app.cancel_form(),
                        KeyCode::Tab => app.toggle_field(),
                        KeyCode::Backspace => app.handle_backspace(),
                        KeyCode::Char(c) => app.handle_input(c),
                        _ => {}
                    },
                }
            }
        }
    }
}

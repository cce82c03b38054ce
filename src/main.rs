use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use exam_simulator::{draw, handle_key, logger, App, AppConfig, TimerEvent};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc::{self, UnboundedReceiver};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::from_env();
    logger::init(&config.log_file);
    logger::log("Exam simulator starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, Some(tick_tx));

    let result = run(&mut terminal, &mut app, tick_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exiting with error: {}", e));
    }
    result
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    mut tick_rx: UnboundedReceiver<TimerEvent>,
) -> io::Result<()> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| draw(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Some(Ok(Event::Paste(text))) => app.paste(&text),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },
            Some(tick) = tick_rx.recv() => app.handle_timer_event(tick),
        }
    }
}

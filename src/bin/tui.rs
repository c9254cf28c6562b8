use std::time::Duration;

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Terminal, widgets::{Block, Borders, List, ListItem, Paragraph, ListState}, layout::{Layout, Constraint, Direction}, style::{Style, Modifier, Color}};
use tracing_subscriber::EnvFilter;

use todolist::{application::{todo_item_service::{TodoItemService, TodoItemServiceImpl}, view::TodoItemView}, domain::{repository::TodoItemStore, todo_item::TodoItemId}, infrastructure::{config::{prepare_sqlite_file, AppConfig}, sqlite_store::SqliteTodoItemStore}};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    // Logs go to stderr and are off unless RUST_LOG asks for them; redirect stderr to keep the screen clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "off".into()))
        .with_writer(std::io::stderr)
        .init();

    prepare_sqlite_file(&config.database_url)?;
    let store = SqliteTodoItemStore::connect(&config.database_url).await?;
    store.init().await?;
    let service = TodoItemServiceImpl::new(store);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, service, &config.database_url).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { List, Add }

struct App<S: TodoItemStore> {
    service: TodoItemServiceImpl<S>,
    items: Vec<TodoItemView>,
    list_state: ListState,
    mode: Mode,
    draft: String,
    status: String,
}

impl<S: TodoItemStore> App<S> {
    async fn load(&mut self) -> Result<()> {
        self.items = self.service.list_incomplete().await?;
        let len = self.items.len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
        Ok(())
    }

    fn selected(&self) -> Option<&TodoItemView> { self.list_state.selected().and_then(|i| self.items.get(i)) }

    fn move_selection(&mut self, down: bool) {
        let Some(i) = self.list_state.selected() else { return };
        let next = if down { (i + 1).min(self.items.len().saturating_sub(1)) } else { i.saturating_sub(1) };
        self.list_state.select(Some(next));
    }

    async fn add(&mut self) -> Result<()> {
        let candidate = TodoItemView { id: TodoItemId::nil(), description: self.draft.clone(), is_completed: false };
        match self.service.create(candidate).await {
            Ok(created) => {
                self.status = format!("added {}", created.description);
                self.draft.clear();
                self.mode = Mode::List;
            }
            Err(err) => self.status = err.to_string(),
        }
        self.load().await
    }

    async fn mark_completed(&mut self) -> Result<()> {
        let Some(item) = self.selected().cloned() else { return Ok(()) };
        let completed = TodoItemView { is_completed: true, ..item };
        self.status = match self.service.update(completed.id, completed.clone()).await {
            Ok(()) => format!("completed {}", completed.description),
            Err(err) => err.to_string(),
        };
        self.load().await
    }
}

async fn run_app<S: TodoItemStore>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, service: TodoItemServiceImpl<S>, database_url: &str) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App { service, items: vec![], list_state: ListState::default(), mode: Mode::List, draft: String::new(), status: format!("DATABASE_URL={database_url}") };
    app.load().await?;

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(1),
                    Constraint::Length(3),
                ])
                .split(f.size());

            let header = Paragraph::new("a: add item, c/Enter: mark as completed, r: refresh, q: quit  |  Add: Enter to save, Esc to clear")
                .block(Block::default().borders(Borders::ALL).title("todolist"));
            f.render_widget(header, chunks[0]);

            let list_items: Vec<ListItem> = app.items.iter().map(|item| ListItem::new(format!("{}  {}", item.id, item.description))).collect();
            let list = List::new(list_items)
                .block(Block::default().borders(Borders::ALL).title(format!("Showing {} Item(s)", app.items.len())))
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, chunks[1], &mut app.list_state);

            let (title, text) = match app.mode {
                Mode::List => ("status".to_string(), app.status.clone()),
                Mode::Add => (format!("add item  {}", app.status), format!("Description: {}_", app.draft)),
            };
            let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(footer, chunks[2]);
        })?;

        if !event::poll(tick_rate)? { continue; }
        let Event::Key(key) = event::read()? else { continue };
        // Only act on key presses; ignore repeats and releases to prevent duplicate input
        if key.kind != KeyEventKind::Press { continue; }
        match app.mode {
            Mode::List => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Up => app.move_selection(false),
                KeyCode::Down => app.move_selection(true),
                KeyCode::Char('a') => { app.mode = Mode::Add; app.draft.clear(); app.status.clear(); }
                KeyCode::Char('c') | KeyCode::Enter => app.mark_completed().await?,
                KeyCode::Char('r') => { app.load().await?; app.status = "refreshed".into(); }
                _ => {}
            },
            Mode::Add => match key.code {
                KeyCode::Esc => { app.mode = Mode::List; app.draft.clear(); }
                KeyCode::Enter => app.add().await?,
                KeyCode::Backspace => { app.draft.pop(); }
                KeyCode::Char(c) => app.draft.push(c),
                _ => {}
            },
        }
    }
    Ok(())
}

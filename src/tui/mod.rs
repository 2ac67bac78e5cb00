//! Ratatui-based terminal UI.
//!
//! Three tabs: the nine dashboard charts, the news feed, and the admin
//! diagnostics panels. Data is fetched on start and on demand (`r`).

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use tracing::info;

use crate::app::pipeline;
use crate::cli::AdminPanel;
use crate::compose::ChartEntry;
use crate::data::ClimateClient;
use crate::error::AppError;
use crate::report::{Panel, format_panel};

mod plotters_chart;

use plotters_chart::{SpecChart, legend_color};

/// Start the TUI.
pub fn run(client: ClimateClient) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::io(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(client);
    app.refresh_charts();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::io(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::io(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Charts,
    News,
    Admin,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Charts, Tab::News, Tab::Admin];

    fn title(self) -> &'static str {
        match self {
            Tab::Charts => "Charts",
            Tab::News => "News",
            Tab::Admin => "Admin",
        }
    }

    fn next(self) -> Tab {
        match self {
            Tab::Charts => Tab::News,
            Tab::News => Tab::Admin,
            Tab::Admin => Tab::Charts,
        }
    }
}

const ADMIN_PANELS: [AdminPanel; 4] = [
    AdminPanel::Status,
    AdminPanel::Tables,
    AdminPanel::Api,
    AdminPanel::Site,
];

struct App {
    client: ClimateClient,
    tab: Tab,
    selected_chart: usize,
    charts: Vec<ChartEntry>,
    news: Option<Panel>,
    admin_index: usize,
    admin: Option<Panel>,
    scroll: u16,
    status: String,
}

impl App {
    fn new(client: ClimateClient) -> Self {
        Self {
            client,
            tab: Tab::Charts,
            selected_chart: 0,
            charts: Vec::new(),
            news: None,
            admin_index: 0,
            admin: None,
            scroll: 0,
            status: String::new(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::io(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::io(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::io(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::Char('1') => self.switch_tab(Tab::Charts),
            KeyCode::Char('2') => self.switch_tab(Tab::News),
            KeyCode::Char('3') => self.switch_tab(Tab::Admin),
            KeyCode::Char('r') => self.refresh_current(),
            KeyCode::Up => match self.tab {
                Tab::Charts => self.selected_chart = self.selected_chart.saturating_sub(1),
                _ => self.scroll = self.scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.tab {
                Tab::Charts => {
                    if self.selected_chart + 1 < self.charts.len() {
                        self.selected_chart += 1;
                    }
                }
                _ => self.scroll = self.scroll.saturating_add(1),
            },
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Left if self.tab == Tab::Admin => {
                self.admin_index = (self.admin_index + ADMIN_PANELS.len() - 1) % ADMIN_PANELS.len();
                self.load_admin();
            }
            KeyCode::Right if self.tab == Tab::Admin => {
                self.admin_index = (self.admin_index + 1) % ADMIN_PANELS.len();
                self.load_admin();
            }
            _ => {}
        }
        false
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.scroll = 0;
        match tab {
            Tab::News if self.news.is_none() => self.load_news(),
            Tab::Admin if self.admin.is_none() => self.load_admin(),
            _ => {}
        }
    }

    fn refresh_current(&mut self) {
        match self.tab {
            Tab::Charts => self.refresh_charts(),
            Tab::News => self.load_news(),
            Tab::Admin => self.load_admin(),
        }
    }

    fn refresh_charts(&mut self) {
        match pipeline::load_dashboard(&self.client) {
            Ok(charts) => {
                let skipped = charts.iter().filter(|c| c.chart.is_err()).count();
                self.status = if skipped == 0 {
                    format!("Loaded {} charts.", charts.len())
                } else {
                    format!("Loaded {} charts ({skipped} skipped).", charts.len())
                };
                info!(charts = charts.len(), skipped, "dashboard refreshed");
                self.selected_chart = self.selected_chart.min(charts.len().saturating_sub(1));
                self.charts = charts;
            }
            Err(err) => {
                // No partial dashboard: drop whatever was shown before.
                self.charts.clear();
                self.status = format!("Error loading data: {err}");
            }
        }
    }

    fn load_news(&mut self) {
        let panel = pipeline::load_news(&self.client);
        self.status = panel_status(&panel);
        self.news = Some(panel);
        self.scroll = 0;
    }

    fn load_admin(&mut self) {
        let panel = pipeline::load_admin(&self.client, ADMIN_PANELS[self.admin_index]);
        self.status = panel_status(&panel);
        self.admin = Some(panel);
        self.scroll = 0;
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        match self.tab {
            Tab::Charts => self.draw_charts(frame, chunks[1]),
            Tab::News => draw_panel(frame, chunks[1], self.news.as_ref(), self.scroll),
            Tab::Admin => draw_panel(frame, chunks[1], self.admin.as_ref(), self.scroll),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
            .collect();
        let selected = Tab::ALL.iter().position(|t| *t == self.tab).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("climate @ {}", self.client.config().base_url)),
            )
            .select(selected)
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(0)])
            .split(area);

        let items: Vec<ListItem> = self
            .charts
            .iter()
            .map(|entry| {
                let style = if entry.chart.is_ok() {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(format!("{}. {}", entry.id, entry.title)).style(style)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Charts").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        if !self.charts.is_empty() {
            state.select(Some(self.selected_chart));
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        self.draw_chart(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(entry) = self.charts.get(self.selected_chart) else {
            let msg = Paragraph::new("No charts loaded. Press r to retry.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        };

        let block = Block::default().title(entry.title.as_str()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let spec = match &entry.chart {
            Ok(spec) => spec,
            Err(err) => {
                let msg = Paragraph::new(format!("Chart skipped: {err}"))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true });
                frame.render_widget(msg, inner);
                return;
            }
        };

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        frame.render_widget(SpecChart { spec }, parts[0]);

        let mut legend = Vec::new();
        for ds in &spec.datasets {
            let marker = if ds.stroke.dashed { "╌╌ " } else { "── " };
            legend.push(Span::styled(marker, Style::default().fg(legend_color(ds.stroke.color))));
            legend.push(Span::raw(format!("{}   ", ds.label)));
        }
        frame.render_widget(Paragraph::new(Line::from(legend)), parts[1]);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.tab {
            Tab::Charts => "Tab/1-3 switch  ↑/↓ chart  r refresh  q quit",
            Tab::News => "Tab/1-3 switch  ↑/↓ PgUp/PgDn scroll  r refresh  q quit",
            Tab::Admin => "Tab/1-3 switch  ←/→ panel  ↑/↓ scroll  r refresh  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_panel(frame: &mut ratatui::Frame<'_>, area: Rect, panel: Option<&Panel>, scroll: u16) {
    let Some(panel) = panel else {
        let msg = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(msg, area);
        return;
    };

    let border = if panel.is_success() { Color::Green } else { Color::Red };
    let text = Text::from(format_panel(panel));
    let p = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(panel.title.as_str()),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(p, area);
}

fn panel_status(panel: &Panel) -> String {
    if panel.is_success() {
        format!("{} loaded.", panel.title)
    } else {
        panel.title.clone()
    }
}

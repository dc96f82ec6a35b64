use anyhow::Result;
use bmi_calculator::{Assessment, Category, Field, Form};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub struct App {
    pub form: Form,
    pub focus: Field,
}

impl App {
    pub fn new() -> Self {
        Self {
            form: Form::new(),
            focus: Field::Height,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.other();
    }

    /// Reset control. Ignored while no result is shown, like a hidden button.
    pub fn reset(&mut self) -> bool {
        if !self.form.can_reset() {
            return false;
        }
        self.form.reset();
        self.focus = Field::Height;
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if ctrl => return Action::Quit,
            KeyCode::Char('r') if ctrl => {
                self.reset();
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down | KeyCode::Enter => {
                self.next_field()
            }
            KeyCode::Backspace => self.form.pop_char(self.focus),
            KeyCode::Char(c) if !ctrl => self.form.push_char(self.focus, c),
            _ => {}
        }

        Action::Continue
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Windows also reports releases
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) == Action::Quit {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Height input
            Constraint::Length(3), // Weight input
            Constraint::Min(0),    // Result
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0]);
    render_input(f, chunks[1], app, Field::Height);
    render_input(f, chunks[2], app, Field::Weight);

    let assessment = app.form.assessment();
    render_result(f, chunks[3], assessment.as_ref());
    render_status_bar(f, chunks[4], assessment.is_some());
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        "BMI Calculator",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn placeholder(field: Field) -> String {
    format!("Enter your {} ({})", field, field.unit())
}

fn input_title(field: Field) -> String {
    format!(" {} ({}) ", field.title(), field.unit())
}

/// Cursor column just past the typed text, clamped inside the box
fn cursor_x(area: Rect, text: &str) -> u16 {
    let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(width).min(max_x)
}

fn render_input(f: &mut Frame, area: Rect, app: &App, field: Field) {
    let text = app.form.field(field);
    let focused = app.focus == field;

    let content = if text.is_empty() {
        Span::styled(placeholder(field), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(text.to_string(), Style::default().fg(Color::White))
    };

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(input_title(field)),
    );

    f.render_widget(input, area);

    if focused {
        f.set_cursor(cursor_x(area, text), area.y.saturating_add(1));
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Underweight => Color::Cyan,
        Category::NormalWeight => Color::Green,
        Category::ObeseClass1 => Color::Yellow,
        Category::Overweight => Color::Red,
    }
}

fn render_result(f: &mut Frame, area: Rect, assessment: Option<&Assessment>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Result ");

    // Invalid input: nothing but the fields
    let Some(assessment) = assessment else {
        f.render_widget(block, area);
        return;
    };

    let color = category_color(assessment.category);
    let content = vec![
        Line::from(""),
        Line::from("Your BMI is..."),
        Line::from(Span::styled(
            assessment.display_value(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            assessment.category.label(),
            Style::default().fg(color),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Ctrl+R", Style::default().fg(Color::Yellow)),
            Span::raw(" Reset"),
        ]),
    ];

    let result = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(result, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, can_reset: bool) {
    let mut status_spans = vec![
        Span::styled(" Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Next field | "),
        Span::styled("Backspace", Style::default().fg(Color::Yellow)),
        Span::raw(" Delete | "),
    ];

    if can_reset {
        status_spans.push(Span::styled("Ctrl+R", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Reset | "));
    }

    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) -> Action {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> Action {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut app = App::new();
        type_text(&mut app, "170");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "65");

        assert_eq!(app.form.height, "170");
        assert_eq!(app.form.weight, "65");
        assert_eq!(app.form.assessment().unwrap().category, Category::NormalWeight);
    }

    #[test]
    fn test_backspace_and_focus_cycle() {
        let mut app = App::new();
        type_text(&mut app, "1800");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form.height, "180");

        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Field::Weight);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, Field::Height);
    }

    #[test]
    fn test_ctrl_r_resets_only_with_result() {
        let mut app = App::new();
        type_text(&mut app, "170");
        ctrl(&mut app, 'r');
        assert_eq!(app.form.height, "170");

        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "65");
        assert_eq!(ctrl(&mut app, 'r'), Action::Continue);
        assert!(app.form.is_empty());
        assert_eq!(app.focus, Field::Height);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert_eq!(press(&mut app, KeyCode::Esc), Action::Quit);
        assert_eq!(ctrl(&mut app, 'c'), Action::Quit);
        // Plain 'q' is text, not a quit key
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Continue);
        assert_eq!(app.form.height, "q");
    }

    #[test]
    fn test_titles_and_placeholders_carry_units() {
        assert_eq!(input_title(Field::Height), " Height (cm) ");
        assert_eq!(input_title(Field::Weight), " Weight (kg) ");
        assert_eq!(placeholder(Field::Weight), "Enter your weight (kg)");
    }

    #[test]
    fn test_cursor_stays_inside_box_for_long_input() {
        let area = Rect::new(u16::MAX - 10, 0, 10, 3);
        let long = "9".repeat(usize::from(u16::MAX) + 10);
        assert_eq!(cursor_x(area, &long), u16::MAX - 2);

        let area = Rect::new(0, 3, 60, 3);
        assert_eq!(cursor_x(area, ""), 1);
        assert_eq!(cursor_x(area, "170"), 4);
        assert_eq!(cursor_x(area, &long), 58);
    }

    #[test]
    fn test_render_long_pasted_input() {
        let mut app = App::new();
        app.form.set_height("1".repeat(100_000));

        let text = screen(&app);
        assert!(text.contains("Height (cm)"));
        assert!(!text.contains("Your BMI is..."));
    }

    #[test]
    fn test_render_shows_result_and_reset() {
        let mut app = App::new();
        app.form.set_height("180");
        app.form.set_weight("100");

        let text = screen(&app);
        assert!(text.contains("BMI Calculator"));
        assert!(text.contains("Your BMI is..."));
        assert!(text.contains("30.9"));
        assert!(text.contains("Overweight"));
        assert!(text.contains("Reset"));
    }

    #[test]
    fn test_render_withholds_result_for_invalid_input() {
        let mut app = App::new();
        app.form.set_weight("70");

        let text = screen(&app);
        assert!(text.contains("Enter your height (cm)"));
        assert!(!text.contains("Your BMI is..."));
        assert!(!text.contains("Reset"));
    }
}

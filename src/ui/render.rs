use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use super::app::{App, FormField, InputMode};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    render_expense_list(f, app, chunks[0]);
    render_help_panel(f, chunks[1]);

    if app.input_mode != InputMode::Normal {
        render_form(f, app, f.size());
    }
}

pub fn render_expense_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .expenses()
        .iter()
        .map(|e| e.to_list_item(&app.config.currency))
        .collect();

    // The total is derived from the live list on every frame, never cached
    let header = format!(
        "Expenses ({}) Total: {}{:.2}",
        app.store.len(),
        app.config.currency,
        app.store.total()
    );

    let list = List::new(items)
        .block(Block::default().title(header).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ");

    f.render_stateful_widget(list, area, &mut app.list_state.clone());
}

pub fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.input_mode {
        InputMode::Adding => "Add Expense (Tab to switch, Enter to save, Esc to cancel)",
        InputMode::Editing(_) => "Edit Expense (Tab to switch, Enter to save, Esc to cancel)",
        InputMode::Normal => return,
    };

    let popup_area = centered_rect(60, 40, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(inner);

    render_field(
        f,
        "Title",
        &app.title_input,
        "Enter a title...",
        app.form_field == FormField::Title,
        fields[0],
    );
    render_field(
        f,
        "Amount",
        &app.amount_input,
        "Enter an amount...",
        app.form_field == FormField::Amount,
        fields[1],
    );

    if let Some(message) = &app.form_error {
        let error =
            Paragraph::new(Line::from(message.as_str()).style(Style::default().fg(Color::Red)));
        f.render_widget(error, fields[2]);
    }
}

fn render_field(
    f: &mut Frame,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    area: Rect,
) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(if value.is_empty() {
        Line::from(placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Line::from(value)
    })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );

    f.render_widget(input, area);
}

pub fn render_help_panel(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Move • "),
        Span::styled("a", Style::default().fg(Color::Yellow)),
        Span::raw(" Add • "),
        Span::styled("e", Style::default().fg(Color::Yellow)),
        Span::raw(" Edit • "),
        Span::styled("d", Style::default().fg(Color::Yellow)),
        Span::raw(" Delete • "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ])];

    let help = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Help "),
        )
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(layout[1])[1]
}

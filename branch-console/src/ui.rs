//! Screen rendering

use branch_client::view::{FormField, ManagementState, ViewMode};
use ratatui::{prelude::*, widgets::*};
use tui_input::Input;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, GateField, InputMode, PathAction, STATUS_ROW};

const HELP_GRID: &str = "↑↓ select  ←→ page  z size  o/O sort  / search  a add  e edit  d delete  i import  x export  v view  f full  L logout  q quit";
const HELP_GATE: &str = "Tab switch field  Enter sign in  Esc quit";

pub fn draw(f: &mut Frame, app: &App) {
    let fullscreen = app.is_authenticated() && app.management.fullscreen;

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(1)];
    if !fullscreen {
        constraints.push(Constraint::Length(10)); // Logs
    }
    constraints.push(Constraint::Length(3)); // Footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_header(f, app, chunks[0]);
    if app.is_authenticated() {
        draw_management(f, app, chunks[1]);
    } else {
        draw_gate(f, app, chunks[1]);
    }
    if !fullscreen {
        draw_logs(f, app, chunks[2]);
    }
    draw_footer(f, app, chunks[chunks.len() - 1]);

    if app.is_authenticated() {
        if app.management.dialog.is_some() {
            draw_dialog(f, app);
        } else if let Some(branch) = &app.management.pending_delete {
            draw_confirm(f, &branch.name, &branch.code);
        }
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::raw(" Branch Console "),
        Span::raw(" | "),
    ];
    if !app.is_authenticated() {
        spans.push(Span::styled(" Signed out ", Style::default().fg(Color::Yellow)));
    } else if app.management.loading {
        spans.push(Span::styled(
            " Loading... ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            format!(" {} ", app.gate.username),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

// ==================== Gate ====================

fn draw_gate(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(50, 10, area);
    let block = Block::default()
        .title(" Sign in ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    f.render_widget(Clear, popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let masked = "*".repeat(app.password_input.value().chars().count());
    draw_text_box(
        f,
        rows[0],
        " Username ",
        app.username_input.value(),
        app.gate_field == GateField::Username,
    );
    draw_text_box(
        f,
        rows[1],
        " Password ",
        &masked,
        app.gate_field == GateField::Password,
    );

    if let Some(hint) = &app.gate.hint {
        let hint = Paragraph::new(hint.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(hint, rows[2]);
    }

    let (input, row) = match app.gate_field {
        GateField::Username => (&app.username_input, rows[0]),
        GateField::Password => (&app.password_input, rows[1]),
    };
    place_cursor(f, input, row);
}

// ==================== Management ====================

fn draw_management(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    draw_toolbar(f, app, chunks[0]);
    match app.management.view_mode {
        ViewMode::Table => draw_table(f, app, chunks[1]),
        ViewMode::Cards => draw_cards(f, app, chunks[1]),
    }
}

fn draw_toolbar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let searching = app.input_mode == InputMode::Search;
    draw_text_box(f, chunks[0], " Search ", app.search_input.value(), searching);
    if searching {
        place_cursor(f, &app.search_input, chunks[0]);
    }

    let m = &app.management;
    let info = Line::from(vec![
        Span::raw(" Page "),
        Span::styled(
            format!("{}/{}", m.page + 1, m.total_pages.max(1)),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  Size "),
        Span::styled(m.page_size.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  Rows "),
        Span::styled(m.total_rows.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  Sort "),
        Span::styled(
            format!("{} {}", m.sort_field.as_str(), m.sort_order.as_str()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    let info = Paragraph::new(info).block(Block::default().borders(Borders::ALL));
    f.render_widget(info, chunks[1]);
}

fn grid_block(m: &ManagementState) -> Block<'static> {
    let title = match m.view_mode {
        ViewMode::Table => " Branches ",
        ViewMode::Cards => " Branches (cards) ",
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
}

fn status_style(label: &str) -> Style {
    if label == "Active" {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let m = &app.management;
    let header = Row::new(["Name", "Code", "Address", "City", "State", "Phone", "Email", "Status"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = m
        .branches
        .iter()
        .map(|b| {
            let status = b.status.label();
            Row::new(vec![
                Cell::from(b.name.as_str()),
                Cell::from(b.code.as_str()),
                Cell::from(b.address.as_str()),
                Cell::from(b.city.as_str()),
                Cell::from(b.state.as_str()),
                Cell::from(b.phone.as_deref().unwrap_or("-")),
                Cell::from(b.email.as_deref().unwrap_or("-")),
                Cell::from(status).style(status_style(status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(16),
        Constraint::Percentage(8),
        Constraint::Percentage(18),
        Constraint::Percentage(12),
        Constraint::Percentage(6),
        Constraint::Percentage(12),
        Constraint::Percentage(18),
        Constraint::Percentage(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(grid_block(m))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !m.branches.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_cards(f: &mut Frame, app: &App, area: Rect) {
    let m = &app.management;
    let items: Vec<ListItem> = m
        .branches
        .iter()
        .map(|b| {
            let status = b.status.label();
            let content = vec![
                Line::from(vec![
                    Span::styled(
                        b.name.as_str(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" ({}) ", b.code)),
                    Span::styled(status, status_style(status)),
                ]),
                Line::from(format!(" {}, {}, {}", b.address, b.city, b.state)),
                Line::from(format!(
                    " {}  {}",
                    b.phone.as_deref().unwrap_or("-"),
                    b.email.as_deref().unwrap_or("-")
                )),
                Line::from(Span::raw(" ")),
            ];
            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(grid_block(m))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !m.branches.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_dialog(f: &mut Frame, app: &App) {
    let Some(form) = &app.management.dialog else {
        return;
    };
    let title = if form.is_edit() {
        " Edit branch "
    } else {
        " Add branch "
    };

    let popup = centered_rect(60, (STATUS_ROW as u16 + 1) + 4, f.area());
    let block = Block::default()
        .title(title)
        .title_bottom(" Tab next  Space status  Enter save  Esc cancel ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    f.render_widget(Clear, popup);
    f.render_widget(block, popup);

    let mut constraints = vec![Constraint::Length(1); STATUS_ROW + 1];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in FormField::ALL.iter().enumerate() {
        let focused = app.dialog_row == i;
        let value = if focused {
            app.field_input.value()
        } else {
            form.get(*field)
        };
        f.render_widget(form_line(field.label(), value, focused), rows[i]);
    }
    let status = form.status.label();
    f.render_widget(
        form_line("Status", status, app.dialog_row == STATUS_ROW),
        rows[STATUS_ROW],
    );

    if let Some(error) = &app.management.error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        f.render_widget(error, rows[STATUS_ROW + 1]);
    }

    if app.dialog_row < STATUS_ROW {
        let row = rows[app.dialog_row];
        let offset = 10;
        f.set_cursor_position((
            row.x + offset + app.field_input.visual_cursor() as u16,
            row.y,
        ));
    }
}

fn form_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("{label:<8}: "), label_style),
        Span::raw(value),
    ]))
}

fn draw_confirm(f: &mut Frame, name: &str, code: &str) {
    let popup = centered_rect(40, 5, f.area());
    let text = vec![
        Line::from(format!("Delete {name} ({code})?")),
        Line::from(Span::styled(
            "y confirm  n cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

// ==================== Logs / footer ====================

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(widget, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    if let (InputMode::Path(action), true) = (app.input_mode, app.is_authenticated()) {
        let title = match action {
            PathAction::Import => " Import from (Enter to start, Esc to cancel) ",
            PathAction::Export => " Export to (Enter to save, Esc to cancel) ",
        };
        draw_text_box(f, area, title, app.path_input.value(), true);
        place_cursor(f, &app.path_input, area);
        return;
    }

    let m = &app.management;
    let line = if !app.is_authenticated() {
        Line::from(Span::styled(HELP_GATE, Style::default().fg(Color::DarkGray)))
    } else if let Some(error) = m.error.as_deref().filter(|_| m.dialog.is_none()) {
        Line::from(Span::styled(error, Style::default().fg(Color::Red)))
    } else if let Some(notice) = &m.notice {
        Line::from(Span::styled(notice.as_str(), Style::default().fg(Color::Green)))
    } else {
        Line::from(Span::styled(HELP_GRID, Style::default().fg(Color::DarkGray)))
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

// ==================== Helpers ====================

fn draw_text_box(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let paragraph = Paragraph::new(value)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn place_cursor(f: &mut Frame, input: &Input, area: Rect) {
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    f.set_cursor_position((
        area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
        area.y + 1,
    ));
}

/// Centered popup of `percent_x` width and fixed height
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

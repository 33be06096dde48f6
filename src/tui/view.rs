// File: src/tui/view.rs
use crate::model::analytics::TaskMetrics;
use crate::model::{Priority, Task};
use crate::routes::{DashboardView, View};
use crate::tui::state::{AppState, FormState, InputMode, KANBAN_COLUMNS, TaskFilter};
use chrono::{Local, Utc};
use strum::IntoEnumIterator;
use unicode_width::UnicodeWidthStr;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    match state.view {
        View::Home => draw_home(f, state),
        View::Login => draw_auth(f, state, "Welcome Back", "Sign in to your TaskFlow account"),
        View::Register => draw_auth(
            f,
            state,
            "Create Account",
            "Join TaskFlow and start managing tasks",
        ),
        View::Dashboard => draw_dashboard(f, state),
        View::Profile => draw_profile(f, state),
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn status_line(state: &AppState) -> Paragraph<'_> {
    let style = if state.message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(state.message.as_str()).style(style)
}

// --- HOME ---

fn draw_home(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let signed_in = state
        .session
        .as_ref()
        .map(|s| format!("Signed in as {}.", s.user.username))
        .unwrap_or_else(|| "You are not signed in.".to_string());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TaskFlow",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Organize your work, beautifully."),
        Line::from(""),
        Line::from(signed_in),
        Line::from(""),
        Line::from("l: Sign In    r: Create Account    d/Enter: Dashboard    q: Quit"),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[0]);
    f.render_widget(status_line(state), chunks[1]);
}

// --- AUTH SCREENS ---

fn draw_auth(f: &mut Frame, state: &mut AppState, title: &str, subtitle: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(subtitle.to_string()),
    ]);
    f.render_widget(header, chunks[0]);

    if let Some(form) = &state.form {
        let hint = match state.view {
            View::Login => "Enter:Sign In  Tab:Next Field  Ctrl+R:Create Account  Esc:Back",
            _ => "Enter:Create Account  Tab:Next Field  Ctrl+L:Sign In  Esc:Back",
        };
        render_form(f, chunks[1], form, hint);
    }
    f.render_widget(status_line(state), chunks[2]);
}

/// Renders a form box: banner, labeled fields with inline errors, hint row.
/// Places the terminal cursor inside the focused text field.
fn render_form(f: &mut Frame, area: Rect, form: &FormState, hint: &str) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    if let Some(ok) = &form.success {
        lines.push(Line::from(Span::styled(
            ok.clone(),
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(""));
    }

    // Row the cursor sits on, tracked while we build the text.
    let mut cursor_pos: Option<(u16, u16)> = None;

    for (idx, field) in form.fields.iter().enumerate() {
        let focused = idx == form.focused;
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let shown: String = if field.is_choice() {
            format!("< {} >", field.submit_value())
        } else if field.masked {
            "\u{2022}".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };

        let prefix = format!("{:>18}: ", field.label);
        if focused && !field.is_choice() {
            let before: String = if field.masked {
                "\u{2022}".repeat(field.cursor)
            } else {
                field.value.chars().take(field.cursor).collect()
            };
            let x = area.x + 1 + prefix.width() as u16 + before.width() as u16;
            let y = area.y + 1 + lines.len() as u16;
            cursor_pos = Some((x, y));
        }

        lines.push(Line::from(vec![
            Span::styled(prefix, label_style),
            Span::raw(shown),
        ]));
        if let Some(err) = &field.error {
            lines.push(Line::from(Span::styled(
                format!("{:>20}{}", "", err),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Working...",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default().borders(Borders::ALL);
    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(body, area);

    if let Some((x, y)) = cursor_pos {
        f.set_cursor_position((x, y));
    }
}

// --- DASHBOARD ---

fn draw_dashboard(f: &mut Frame, state: &mut AppState) {
    let quick_height = if state.quick_preview.is_some() { 5 } else { 3 };
    let footer_height = if state.show_full_help { 8 } else { 2 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                  // header
            Constraint::Length(1),                  // tabs
            Constraint::Length(quick_height),       // quick add
            Constraint::Min(0),                     // sub-view
            Constraint::Length(footer_height),      // help + status
        ])
        .split(f.area());

    draw_dashboard_header(f, chunks[0], state);
    draw_tabs(f, chunks[1], state);
    draw_quick_add(f, chunks[2], state);

    match state.dashboard_view {
        DashboardView::List => draw_task_list(f, chunks[3], state),
        DashboardView::Kanban => draw_kanban(f, chunks[3], state),
        DashboardView::Analytics => draw_analytics(f, chunks[3], state),
        DashboardView::Sessions => draw_sessions(f, chunks[3], state),
    }

    draw_dashboard_footer(f, chunks[4], state);
}

fn draw_dashboard_header(f: &mut Frame, area: Rect, state: &AppState) {
    let username = state
        .session
        .as_ref()
        .map(|s| s.user.username.as_str())
        .unwrap_or("?");
    let completed = state.tasks.iter().filter(|t| t.status.is_done()).count();

    let line = Line::from(vec![
        Span::styled(
            "TaskFlow",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {}", username)),
        Span::styled(
            format!("   {} tasks, {} completed", state.tasks.len(), completed),
            Style::default().fg(Color::DarkGray),
        ),
        if state.loading {
            Span::styled("   Loading your tasks...", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("")
        },
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_tabs(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, view) in DashboardView::iter().enumerate() {
        let label = format!(" {}:{} ", i + 1, view);
        if view == state.dashboard_view {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(label));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_quick_add(f: &mut Frame, area: Rect, state: &mut AppState) {
    let active = state.mode == InputMode::QuickAdd;
    let border_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let title = if active {
        " Quick Add (Enter:Add  Esc:Done) "
    } else {
        " Quick Add (a) "
    };

    let mut lines = vec![Line::from(if state.quick_add.is_empty() && !active {
        Span::styled(
            "Type a task... e.g., 'Meet Amy tomorrow 4pm urgent'",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(state.quick_add.clone())
    })];

    if let Some(preview) = &state.quick_preview {
        let mut spans = vec![Span::styled(
            "Preview: ",
            Style::default().fg(Color::DarkGray),
        )];
        spans.push(Span::raw(preview.title.clone()));
        if let Some(due) = preview.due {
            spans.push(Span::styled(
                format!("  Due: {}", due.format("%a, %b %-d")),
                Style::default().fg(Color::Cyan),
            ));
        }
        if let Some(priority) = preview.priority {
            spans.push(Span::styled(
                format!("  Priority: {}", priority.to_string().to_uppercase()),
                Style::default().fg(priority_color(priority)),
            ));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    f.render_widget(Paragraph::new(lines).block(block), area);

    if active {
        let before: String = state.quick_add.chars().take(state.quick_cursor).collect();
        f.set_cursor_position((area.x + 1 + before.width() as u16, area.y + 1));
    }
}

fn task_list_item(task: &Task) -> ListItem<'static> {
    let check = if task.status.is_done() { "[x]" } else { "[ ]" };
    let mut spans = vec![Span::raw(format!("{} ", check))];

    let title_style = if task.status.is_done() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    spans.push(Span::styled(task.title.clone(), title_style));

    if let Some(priority) = task.priority {
        spans.push(Span::styled(
            format!("  {}", priority.to_string().to_uppercase()),
            Style::default().fg(priority_color(priority)),
        ));
    }
    if let Some(due) = task.due_date {
        let style = if task.is_overdue(Utc::now()) {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(
            format!("  due {}", due.with_timezone(&Local).format("%b %-d")),
            style,
        ));
    }
    if let Some(rec) = task.recurrence
        && rec != crate::model::Recurrence::None
    {
        spans.push(Span::styled(
            format!("  ({})", rec),
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.push(Span::styled(
        format!("  {}", task.status),
        Style::default().fg(Color::DarkGray),
    ));

    ListItem::new(Line::from(spans))
}

fn draw_task_list(f: &mut Frame, area: Rect, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    // Filter row with per-status counts, like the web filter buttons.
    let pending = state
        .tasks
        .iter()
        .filter(|t| TaskFilter::Pending.matches(t))
        .count();
    let completed = state
        .tasks
        .iter()
        .filter(|t| TaskFilter::Completed.matches(t))
        .count();
    let filter_line = Line::from(vec![
        Span::styled("Filter (f): ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            state.filter.label(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   pending ({})  completed ({})", pending, completed),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(filter_line), chunks[0]);

    let items: Vec<ListItem> = state.visible_tasks().into_iter().map(task_list_item).collect();
    if items.is_empty() {
        let empty = Paragraph::new("No tasks here. Press 'a' to quick-add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[1], &mut state.list_state);
}

fn draw_kanban(f: &mut Frame, area: Rect, state: &mut AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (col_idx, status) in KANBAN_COLUMNS.iter().enumerate() {
        let tasks = state.kanban_tasks(col_idx);
        let selected_col = col_idx == state.kanban_col;

        let border_style = if selected_col {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let title = format!(" {} ({}) ", status.label(), tasks.len());

        let items: Vec<ListItem> = tasks
            .iter()
            .enumerate()
            .map(|(row, task)| {
                let mut item = task_list_item(task);
                if selected_col && row == state.kanban_row {
                    item = item.style(
                        Style::default()
                            .bg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    );
                }
                item
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        if items.is_empty() {
            let empty = Paragraph::new("Drop tasks here")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, columns[col_idx]);
        } else {
            f.render_widget(List::new(items).block(block), columns[col_idx]);
        }
    }
}

fn draw_analytics(f: &mut Frame, area: Rect, state: &AppState) {
    let metrics = TaskMetrics::compute(&state.tasks, Utc::now());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Overall Completion "),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(metrics.completion_rate as u16)
        .label(format!(
            "{}% — {} of {} tasks completed",
            metrics.completion_rate, metrics.completed, metrics.total
        ));
    f.render_widget(gauge, chunks[0]);

    let stat = |label: &str, value: usize, color: Color| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>14}  ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    };

    let lines = vec![
        stat("Total Tasks", metrics.total, Color::Cyan),
        stat("Completed", metrics.completed, Color::Green),
        stat("In Progress", metrics.in_progress, Color::Blue),
        stat("To Do", metrics.pending, Color::Yellow),
        stat("High Priority", metrics.high_priority, Color::Red),
        stat("Overdue", metrics.overdue, Color::Red),
        stat("Created Today", metrics.created_today, Color::Magenta),
    ];
    let body = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Analytics "));
    f.render_widget(body, chunks[1]);
}

fn draw_sessions(f: &mut Frame, area: Rect, state: &mut AppState) {
    let items: Vec<ListItem> = state
        .device_sessions
        .iter()
        .map(|s| {
            let mut spans = vec![Span::raw(s.device.clone())];
            if s.current {
                spans.push(Span::styled(
                    "  CURRENT",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::styled(
                format!(
                    "  {}  last active {}",
                    s.location,
                    s.last_active.with_timezone(&Local).format("%b %-d, %H:%M")
                ),
                Style::default().fg(Color::DarkGray),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(
        " Active Sessions ({})  x:Revoke  X:Sign Out All Others ",
        state.device_sessions.len()
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state.sessions_state);
}

fn draw_dashboard_footer(f: &mut Frame, area: Rect, state: &mut AppState) {
    let mut lines: Vec<Line> = Vec::new();

    if state.show_full_help {
        lines.push(Line::from(vec![
            Span::styled(
                " VIEWS ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Tab:Cycle  1:List  2:Kanban  3:Analytics  4:Sessions"),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                " TASKS ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" a:Quick Add  n:New Task  Space:Toggle Done  s:Cycle Status  d:Delete"),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                " KANBAN ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" h/l:Column  j/k:Card  </>:Move Card"),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                " LIST ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" f:Filter  j/k:Select"),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                " ACCOUNT ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" p:Profile  o:Sign Out  r:Refresh  ?:Help  q:Quit"),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            " a:Quick Add  n:New  Space:Done  d:Delete  Tab:View  p:Profile  ?:Help  q:Quit",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(state.message.clone()));
    f.render_widget(Paragraph::new(lines), area);
}

// --- PROFILE ---

fn draw_profile(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.area());

    // Account card
    let mut card_lines = vec![Line::from(Span::styled(
        "Profile Settings",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(session) = &state.session {
        card_lines.push(Line::from(format!(
            "{}  <{}>",
            session.user.username, session.user.email
        )));
        if let Some(created) = session.user.created_at {
            card_lines.push(Line::from(Span::styled(
                format!(
                    "Member since {}",
                    created.with_timezone(&Local).format("%b %-d, %Y")
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    f.render_widget(
        Paragraph::new(card_lines).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    if let Some(form) = &state.form {
        render_form(f, chunks[1], form, "Enter:Save  Tab:Next Field  Esc:Cancel");
    } else {
        let hints = Paragraph::new(vec![
            Line::from("e: Update profile (username / email)"),
            Line::from("w: Change password"),
            Line::from("b/Esc: Back to dashboard    o: Sign out"),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Account "));
        f.render_widget(hints, chunks[1]);
    }

    f.render_widget(status_line(state), chunks[2]);
}

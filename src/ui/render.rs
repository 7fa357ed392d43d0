use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::session::{EntryStatus, Role};
use crate::ui::app::{App, FocusPane, Modal, PromptKind};
use crate::ui::highlight;
use crate::ui::palette::Palette;
use crate::workspace::Language;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame, app: &App) {
    // Main layout: Header + Body + Status + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);

    // Body: explorer on the left, editor column, optional assistant column
    let body_constraints = if app.show_assistant {
        vec![
            Constraint::Length(28),
            Constraint::Min(0),
            Constraint::Length(38),
        ]
    } else {
        vec![Constraint::Length(28), Constraint::Min(0)]
    };
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(body_constraints)
        .split(main_chunks[1]);

    render_explorer(frame, app, body_chunks[0]);

    // Editor column: tab strip, editor, optional terminal
    let editor_constraints = if app.show_terminal {
        vec![
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(10),
        ]
    } else {
        vec![Constraint::Length(1), Constraint::Min(0)]
    };
    let editor_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(editor_constraints)
        .split(body_chunks[1]);

    render_tab_strip(frame, app, editor_chunks[0]);
    render_editor(frame, app, editor_chunks[1]);
    if app.show_terminal {
        render_terminal(frame, app, editor_chunks[2]);
    }
    if app.show_assistant {
        render_assistant(frame, app, body_chunks[2]);
    }

    render_status_bar(frame, app, main_chunks[2]);
    render_footer(frame, app, main_chunks[3]);

    match &app.modal {
        Some(Modal::Palette(palette)) => render_palette(frame, app, palette),
        Some(Modal::Prompt(prompt)) => render_prompt(frame, app, prompt),
        Some(Modal::ConfirmDelete(id)) => render_confirm_delete(frame, app, *id),
        Some(Modal::Keys) => render_keys(frame, app),
        None => {}
    }
}

fn border_color(app: &App, pane: FocusPane) -> Style {
    if app.focus == pane && app.modal.is_none() {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.fg_dim)
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_text = vec![Line::from(vec![
        Span::styled(
            "  VIBECODE ",
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("- a mock IDE for your terminal", Style::default().fg(app.theme.fg_dim)),
    ])];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent)),
    );

    frame.render_widget(header, area);
}

fn render_explorer(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .visible_rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let is_selected = i == app.explorer_index && app.focus == FocusPane::Explorer;
            let style = if is_selected {
                Style::default()
                    .fg(app.theme.bg)
                    .bg(app.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.fg)
            };

            let name = app.tree.name(row.id).unwrap_or("?");
            let indent = "  ".repeat(row.depth);
            let content = if app.tree.is_folder(row.id) {
                let icon = if app.tree.is_expanded(row.id) { "▼" } else { "▶" };
                format!("{indent}{icon} {name}")
            } else {
                let dirty = if app.is_dirty(row.id) { "*" } else { " " };
                format!("{indent}  {name}{dirty}")
            };
            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Explorer ")
            .border_style(border_color(app, FocusPane::Explorer)),
    );

    frame.render_widget(list, area);
}

fn render_tab_strip(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for id in app.tabs.open() {
        let name = app.tree.name(*id).unwrap_or("?");
        let dirty = if app.is_dirty(*id) { "*" } else { "" };
        let label = format!(" {name}{dirty} × ");
        let style = if Some(*id) == app.tabs.current() {
            Style::default()
                .fg(app.theme.bg)
                .bg(app.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.fg_dim)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            " no open files ",
            Style::default().fg(app.theme.fg_dim),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Editor ")
        .border_style(border_color(app, FocusPane::Editor));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(current) = app.current_file() else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No file selected",
                Style::default().fg(app.theme.fg_dim),
            )),
            Line::from(Span::styled(
                "Pick one in the explorer to start editing",
                Style::default().fg(app.theme.fg_dim),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(placeholder, inner);
        return;
    };

    let content = app.tree.content(current).unwrap_or_default();
    let language = app.tree.language(current).unwrap_or(Language::PlainText);

    let gutter_width = 5;
    let highlighted = highlight::highlight(content, language);
    let lines: Vec<Line> = highlighted
        .into_iter()
        .enumerate()
        .map(|(number, mut line)| {
            let gutter = Span::styled(
                format!("{:>4} ", number + 1),
                Style::default().fg(app.theme.fg_dim),
            );
            line.spans.insert(0, gutter);
            line
        })
        .collect();

    // Keep the cursor line in view.
    let height = inner.height.max(1) as usize;
    let scroll = app.cursor.line.saturating_sub(height - 1) as u16;

    let paragraph = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(paragraph, inner);

    if app.focus == FocusPane::Editor && app.modal.is_none() {
        let x = inner.x + gutter_width + app.cursor.col as u16;
        let y = inner.y + (app.cursor.line as u16).saturating_sub(scroll);
        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn render_terminal(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Terminal ")
        .border_style(border_color(app, FocusPane::Terminal));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for entry in app.terminal.entries() {
        lines.push(Line::from(vec![
            Span::styled("$ ", Style::default().fg(app.theme.success)),
            Span::styled(entry.command.clone(), Style::default().fg(app.theme.fg)),
        ]));
        let output_style = match entry.status {
            EntryStatus::Success => Style::default().fg(app.theme.fg),
            EntryStatus::Error => Style::default().fg(app.theme.error),
            EntryStatus::Info => Style::default().fg(app.theme.info),
        };
        for output_line in entry.output.split('\n') {
            lines.push(Line::from(Span::styled(
                format!("  {output_line}"),
                output_style,
            )));
        }
    }

    // Prompt line: spinner while waiting, input otherwise.
    if app.terminal.is_running() {
        let spinner = SPINNER_FRAMES[app.tick as usize % SPINNER_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            format!("{spinner} running..."),
            Style::default().fg(app.theme.fg_dim),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("$ ", Style::default().fg(app.theme.success)),
            Span::styled(app.terminal_input.clone(), Style::default().fg(app.theme.fg)),
        ]));
    }

    let height = inner.height.max(1) as usize;
    let scroll = lines.len().saturating_sub(height) as u16;
    let input_row = (lines.len() - 1) as u16 - scroll;

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

    if app.focus == FocusPane::Terminal && !app.terminal.is_running() && app.modal.is_none() {
        let x = inner.x + 2 + app.terminal_input.chars().count() as u16;
        let y = inner.y + input_row;
        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn render_assistant(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Assistant ")
        .border_style(border_color(app, FocusPane::Assistant));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let mut lines: Vec<Line> = Vec::new();
    if app.chat.messages().is_empty() && !app.chat.is_waiting() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Ask the assistant for help with your code.",
            Style::default().fg(app.theme.fg_dim),
        )));
    }
    for message in app.chat.messages() {
        let (label, label_color) = match message.role {
            Role::User => ("You", app.theme.secondary),
            Role::Assistant => ("Assistant", app.theme.accent),
        };
        lines.push(Line::from(vec![
            Span::styled(
                label,
                Style::default().fg(label_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", message.timestamp.format("%H:%M")),
                Style::default().fg(app.theme.fg_dim),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            message.content.clone(),
            Style::default().fg(app.theme.fg),
        )));
        lines.push(Line::from(""));
    }
    if app.chat.is_waiting() {
        let dots = ".".repeat((app.tick as usize / 3 % 3) + 1);
        lines.push(Line::from(Span::styled(
            format!("typing{dots}"),
            Style::default().fg(app.theme.fg_dim),
        )));
    }

    let height = chunks[0].height.max(1) as usize;
    // A rough wrapped-line count so the log stays scrolled to the bottom.
    let width = chunks[0].width.max(1) as usize;
    let total: usize = lines
        .iter()
        .map(|line| (line.width().max(1) + width - 1) / width)
        .sum();
    let scroll = total.saturating_sub(height) as u16;

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        chunks[0],
    );

    let input_style = if app.chat.is_waiting() {
        Style::default().fg(app.theme.fg_dim)
    } else {
        Style::default().fg(app.theme.fg)
    };
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(app.theme.accent)),
        Span::styled(app.chat_input.clone(), input_style),
    ]));
    frame.render_widget(input, chunks[1]);

    if app.focus == FocusPane::Assistant && !app.chat.is_waiting() && app.modal.is_none() {
        let x = chunks[1].x + 2 + app.chat_input.chars().count() as u16;
        if x < chunks[1].right() {
            frame.set_cursor_position((x, chunks[1].y));
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut left: Vec<Span> = Vec::new();
    if let Some(current) = app.current_file() {
        let name = app.tree.name(current).unwrap_or("?");
        let dirty = if app.is_dirty(current) { "*" } else { "" };
        let language = app
            .tree
            .language(current)
            .unwrap_or(Language::PlainText)
            .display_name();
        left.push(Span::styled(
            format!(" {name}{dirty}"),
            Style::default().fg(app.theme.fg),
        ));
        left.push(Span::styled(
            format!("  {language}"),
            Style::default().fg(app.theme.fg_dim),
        ));
    } else {
        left.push(Span::styled(
            " no file",
            Style::default().fg(app.theme.fg_dim),
        ));
    }

    let clock = Local::now().format("%H:%M").to_string();
    let right = format!(
        "Ln {}, Col {}  {clock} ",
        app.cursor.line + 1,
        app.cursor.col + 1
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right.len() as u16)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left)), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(right, Style::default().fg(app.theme.fg_dim))),
        chunks[1],
    );
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.modal.is_some() {
        "[Enter] Confirm  [Esc] Cancel"
    } else {
        match app.focus {
            FocusPane::Explorer => {
                "[↑↓/jk] Navigate  [←→/hl] Collapse/Expand  [Enter] Open  [n/N] New  [r] Rename  [d] Delete  [Ctrl+P] Palette  [q] Quit"
            }
            FocusPane::Editor => {
                "[Ctrl+W] Close Tab  [Ctrl+←→] Switch Tab  [Alt+←→] Move Tab  [Ctrl+P] Palette  [Esc] Explorer"
            }
            FocusPane::Terminal => "[Enter] Run  [↑↓] History  [Ctrl+P] Palette  [Esc] Explorer",
            FocusPane::Assistant => "[Enter] Send  [Ctrl+P] Palette  [Esc] Explorer",
        }
    };

    let footer = Paragraph::new(help_text).style(Style::default().fg(app.theme.fg_dim));
    frame.render_widget(footer, area);
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

/// Centered rect used for modal dialogs.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_palette(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = centered_rect(56, 18, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Command Palette ")
        .border_style(Style::default().fg(app.theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let query = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(app.theme.accent)),
        Span::styled(palette.query().to_string(), Style::default().fg(app.theme.fg)),
    ]));
    frame.render_widget(query, chunks[0]);
    frame.set_cursor_position((
        chunks[0].x + 2 + palette.query().chars().count() as u16,
        chunks[0].y,
    ));

    let filtered = palette.filtered();
    let mut lines: Vec<Line> = Vec::new();
    if filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "No commands found",
            Style::default().fg(app.theme.fg_dim),
        )));
    }

    let mut last_section = "";
    for (index, command) in filtered.iter().enumerate() {
        if command.section != last_section {
            lines.push(Line::from(Span::styled(
                command.section,
                Style::default().fg(app.theme.fg_dim),
            )));
            last_section = command.section;
        }

        let style = if index == palette.selected_index() {
            Style::default()
                .fg(app.theme.bg)
                .bg(app.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.fg)
        };
        let shortcut = command
            .shortcut
            .map(|s| format!("  [{s}]"))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", command.name), style),
            Span::styled(shortcut, Style::default().fg(app.theme.fg_dim)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), chunks[1]);
}

fn render_prompt(frame: &mut Frame, app: &App, prompt: &crate::ui::app::Prompt) {
    let title = match prompt.kind {
        PromptKind::NewFile => " New File ",
        PromptKind::NewFolder => " New Folder ",
        PromptKind::Rename(_) => " Rename ",
    };

    let area = centered_rect(44, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(app.theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(app.theme.accent)),
            Span::styled(prompt.input.clone(), Style::default().fg(app.theme.fg)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to confirm, Esc to cancel",
            Style::default().fg(app.theme.fg_dim),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
    frame.set_cursor_position((inner.x + 2 + prompt.input.chars().count() as u16, inner.y));
}

fn render_confirm_delete(frame: &mut Frame, app: &App, id: crate::workspace::NodeId) {
    let name = app.tree.name(id).unwrap_or("?");

    let area = centered_rect(44, 6, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delete ")
        .border_style(Style::default().fg(app.theme.error));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete {name}?"),
            Style::default().fg(app.theme.fg),
        )),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(app.theme.fg_dim),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to delete, Esc to cancel",
            Style::default().fg(app.theme.fg_dim),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_keys(frame: &mut Frame, app: &App) {
    let area = centered_rect(58, 16, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Key Bindings ")
        .border_style(Style::default().fg(app.theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key = |binding: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {binding:<14}"), Style::default().fg(app.theme.secondary)),
            Span::styled(action, Style::default().fg(app.theme.fg)),
        ])
    };

    let lines = vec![
        key("Tab", "Cycle pane focus"),
        key("Ctrl+P", "Command palette"),
        key("Ctrl+T / Ctrl+A", "Toggle terminal / assistant"),
        key("Enter", "Open file or toggle folder (explorer)"),
        key("n / N", "New file / new folder (explorer)"),
        key("r / d", "Rename / delete (explorer)"),
        key("Ctrl+W", "Close tab"),
        key("Ctrl+← / Ctrl+→", "Previous / next tab"),
        key("Alt+← / Alt+→", "Move tab left / right"),
        key("↑ / ↓", "Recall command history (terminal)"),
        key("q (explorer)", "Quit"),
        key("Ctrl+Q", "Quit from anywhere"),
        Line::from(""),
        key("Esc", "Close this dialog"),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

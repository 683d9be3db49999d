use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::model::FilterMode;
use crate::ops::reorder::RowBox;

use super::app::{App, Mode};
use super::line_edit::{display_width, truncate_to_width};

const INPUT_PLACEHOLDER: &str = "What needs to be done?";

/// Main render function. Also records the row geometry used for dragging.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | input line | task rows | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_rows(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        " todos ",
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD),
    )];
    for mode in FilterMode::ALL {
        spans.push(Span::raw(" "));
        let style = if mode == app.list.filter_mode() {
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(mode.label(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let theme_label = format!("{} ", app.list.display_mode());
    let width = display_width(&theme_label) as u16;
    if width < area.width {
        let label_area = Rect {
            x: area.x + area.width - width,
            width,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Span::styled(theme_label, Style::default().fg(theme.dim))),
            label_area,
        );
    }
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let prompt = Span::styled(" \u{276F} ", Style::default().fg(theme.highlight));
    let line = if app.mode == Mode::Insert {
        if let Ok(col) = u16::try_from(3 + app.editor.cursor_col())
            && col < area.width
        {
            frame.set_cursor_position(Position::new(area.x + col, area.y));
        }
        Line::from(vec![
            prompt,
            Span::styled(app.editor.text().to_string(), Style::default().fg(theme.text_bright)),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(theme.dim)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_rows(frame: &mut Frame, app: &mut App, area: Rect) {
    let ids = app.row_ids();
    let height = area.height as usize;

    // Keep the cursor on screen
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
    app.scroll_offset = app.scroll_offset.min(ids.len().saturating_sub(1));

    app.row_boxes.clear();
    if ids.is_empty() {
        let message = match app.list.filter_mode() {
            FilterMode::All => "  Nothing to do.",
            FilterMode::Active => "  No active tasks.",
            FilterMode::Completed => "  No completed tasks.",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(app.theme.dim))),
            area,
        );
        return;
    }

    let mut lines = Vec::new();
    for (row, (index, id)) in ids
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .enumerate()
    {
        let Some(task) = app.list.task(id) else {
            continue;
        };
        app.row_boxes.push(RowBox::new(
            id.clone(),
            f64::from(area.y) + row as f64,
            1.0,
        ));

        let theme = &app.theme;
        let selected = index == app.cursor && app.mode != Mode::Insert;
        let dragging = app.drag.as_ref().is_some_and(|d| d.dragged() == id);
        let editing = app.mode == Mode::Edit && app.editing_id.as_deref() == Some(id.as_str());

        let mut row_style = Style::default();
        if dragging {
            row_style = row_style.bg(theme.drag_bg);
        } else if selected {
            row_style = row_style.bg(theme.selection_bg);
        }

        let marker = if selected || dragging { "\u{25B8} " } else { "  " };
        let check_style = if task.completed {
            Style::default().fg(theme.done)
        } else {
            Style::default().fg(theme.text)
        };

        let title_width = (area.width as usize).saturating_sub(6);
        let title_span = if editing {
            if let Ok(col) = u16::try_from(6 + app.editor.cursor_col())
                && col < area.width
            {
                frame.set_cursor_position(Position::new(area.x + col, area.y + row as u16));
            }
            Span::styled(app.editor.text().to_string(), Style::default().fg(theme.text_bright))
        } else if task.completed {
            Span::styled(
                truncate_to_width(&task.title, title_width),
                Style::default()
                    .fg(theme.dim)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            Span::styled(
                truncate_to_width(&task.title, title_width),
                Style::default().fg(theme.text),
            )
        };

        lines.push(
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.highlight)),
                Span::styled(task.checkbox(), check_style),
                Span::raw(" "),
                title_span,
            ])
            .style(row_style),
        );
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        format!(" {}", app.list.items_left_label()),
        Style::default().fg(theme.text),
    )];
    if app.list.has_completed() {
        spans.push(Span::styled("  c clear completed", Style::default().fg(theme.dim)));
    }
    if app.ui.show_key_hints {
        let hints = match app.mode {
            Mode::Navigate => "  a add  e edit  \u{2423} done  d delete  J/K move  tab filter  t theme  q quit",
            Mode::Insert | Mode::Edit => "  \u{23CE} save  esc cancel",
        };
        spans.push(Span::styled(hints, Style::default().fg(theme.dim)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

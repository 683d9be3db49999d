use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::model::FilterMode;

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // Keyboard input abandons a mouse drag
    if app.drag.is_some() {
        app.cancel_drag();
    }
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert | Mode::Edit => handle_edit(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => app.move_cursor(1),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => app.move_cursor(-1),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => app.move_cursor(isize::MAX),
        (_, KeyCode::Char('J')) => app.move_selected(1),
        (_, KeyCode::Char('K')) => app.move_selected(-1),
        (_, KeyCode::Char('a')) | (_, KeyCode::Char('i')) => app.begin_insert(),
        (_, KeyCode::Char('e')) | (_, KeyCode::Enter) => app.begin_edit(),
        (_, KeyCode::Char(' ')) | (_, KeyCode::Char('x')) => app.toggle_selected(),
        (_, KeyCode::Char('d')) | (_, KeyCode::Delete) => app.remove_selected(),
        (_, KeyCode::Char('c')) => app.clear_completed(),
        (_, KeyCode::Tab) => app.cycle_filter(),
        (_, KeyCode::Char('1')) => app.set_filter(FilterMode::All),
        (_, KeyCode::Char('2')) => app.set_filter(FilterMode::Active),
        (_, KeyCode::Char('3')) => app.set_filter(FilterMode::Completed),
        (_, KeyCode::Char('t')) => app.toggle_theme(),
        _ => {}
    }
}

fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => app.commit_edit(),
        (_, KeyCode::Esc) => app.cancel_edit(),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.editor.delete_word_back(),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => app.editor.home(),
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => app.editor.end(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.editor.clear(),
        (_, KeyCode::Backspace) => app.editor.backspace(),
        (_, KeyCode::Delete) => app.editor.delete(),
        (_, KeyCode::Left) => app.editor.left(),
        (_, KeyCode::Right) => app.editor.right(),
        (_, KeyCode::Home) => app.editor.home(),
        (_, KeyCode::End) => app.editor.end(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => app.editor.insert(c),
        _ => {}
    }
}

/// Handle a mouse event: left-button press/drag/release reorders rows.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Navigate {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.begin_drag(mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.drag_to(mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),
        MouseEventKind::ScrollDown => app.move_cursor(1),
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        _ => {}
    }
}

use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::model::{FilterMode, UiConfig};
use crate::ops::TodoList;
use crate::ops::reorder::{DragSession, RowBox, place};

use super::input;
use super::line_edit::LineEditor;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task into the input line
    Insert,
    /// Editing the title of `App::editing_id`
    Edit,
}

/// Main application state.
///
/// Task state lives in `list`; everything else here is view state derived
/// from it or carried between frames (cursor, edit buffer, drag, row layout).
pub struct App {
    pub list: TodoList,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub ui: UiConfig,
    /// Cursor index into the visible rows
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    pub editor: LineEditor,
    pub editing_id: Option<String>,
    pub drag: Option<DragSession>,
    /// Geometry of the rows drawn in the last frame
    pub row_boxes: Vec<RowBox>,
}

impl App {
    pub fn new(list: TodoList, ui: UiConfig) -> Self {
        let theme = Theme::for_mode(list.display_mode(), &ui);
        App {
            list,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            ui,
            cursor: 0,
            scroll_offset: 0,
            editor: LineEditor::default(),
            editing_id: None,
            drag: None,
            row_boxes: Vec::new(),
        }
    }

    /// Ids of the rows on screen, in display order. During a drag this is
    /// the live drag order.
    pub fn row_ids(&self) -> Vec<String> {
        match &self.drag {
            Some(session) => session.order().to_vec(),
            None => self.list.visible_tasks().iter().map(|t| t.id.clone()).collect(),
        }
    }

    pub fn cursor_id(&self) -> Option<String> {
        self.row_ids().into_iter().nth(self.cursor)
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.row_ids().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn select_id(&mut self, id: &str) {
        if let Some(i) = self.row_ids().iter().position(|r| r == id) {
            self.cursor = i;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.row_ids().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    // -----------------------------------------------------------------------
    // Task actions
    // -----------------------------------------------------------------------

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.cursor_id() {
            self.list.toggle_completed(&id);
            self.clamp_cursor();
        }
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.cursor_id() {
            self.list.remove(&id);
            self.clamp_cursor();
        }
    }

    pub fn clear_completed(&mut self) {
        if self.list.clear_completed() {
            self.clamp_cursor();
        }
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.list.set_filter_mode(mode);
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.list.filter_mode().next());
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.list.toggle_display_mode();
        self.theme = Theme::for_mode(mode, &self.ui);
    }

    /// Move the selected task one row up (`delta < 0`) or down among the
    /// visible rows.
    pub fn move_selected(&mut self, delta: isize) {
        let ids = self.row_ids();
        let Some(id) = ids.get(self.cursor).cloned() else {
            return;
        };
        let before = if delta < 0 {
            if self.cursor == 0 {
                return;
            }
            Some(ids[self.cursor - 1].as_str())
        } else {
            if self.cursor + 1 >= ids.len() {
                return;
            }
            ids.get(self.cursor + 2).map(|s| s.as_str())
        };
        let order = place(&ids, &id, before);
        self.list.reorder(&order);
        self.select_id(&id);
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn begin_insert(&mut self) {
        self.editor.clear();
        self.editing_id = None;
        self.mode = Mode::Insert;
    }

    pub fn begin_edit(&mut self) {
        let Some(id) = self.cursor_id() else {
            return;
        };
        let Some(task) = self.list.task(&id) else {
            return;
        };
        self.editor = LineEditor::with_text(&task.title);
        self.editing_id = Some(id);
        self.mode = Mode::Edit;
    }

    /// Submit the input line. In insert mode the input stays open for the
    /// next task; an edit returns to navigation.
    pub fn commit_edit(&mut self) {
        let text = self.editor.take();
        match self.mode {
            Mode::Insert => {
                if let Some(id) = self.list.add(&text) {
                    self.select_id(&id);
                }
            }
            Mode::Edit => {
                if let Some(id) = self.editing_id.take() {
                    self.list.rename(&id, &text);
                }
                self.mode = Mode::Navigate;
            }
            Mode::Navigate => {}
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editor.clear();
        self.editing_id = None;
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Dragging
    // -----------------------------------------------------------------------

    /// The row drawn at terminal row `y`, if any
    pub fn row_at(&self, y: u16) -> Option<&str> {
        let y = f64::from(y);
        self.row_boxes
            .iter()
            .find(|b| y >= b.top && y < b.top + b.height)
            .map(|b| b.id.as_str())
    }

    pub fn begin_drag(&mut self, y: u16) {
        let Some(id) = self.row_at(y).map(str::to_string) else {
            return;
        };
        debug!(%id, "drag start");
        self.drag = Some(DragSession::start(id.clone(), self.row_ids()));
        self.select_id(&id);
    }

    /// Pointer moved to terminal row `y` during a drag.
    ///
    /// A cell is one row tall, so the pointer is taken at the top of the
    /// cell when moving up and at its center when moving down. Either way
    /// the dragged row ends up on the row under the pointer.
    pub fn drag_to(&mut self, y: u16) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        let current_top = self
            .row_boxes
            .iter()
            .find(|b| b.id == session.dragged())
            .map(|b| b.top);
        let row = f64::from(y);
        let pointer = match current_top {
            Some(top) if row > top => row + 0.5,
            _ => row,
        };
        if session.move_to(&self.row_boxes, pointer) {
            let id = session.dragged().to_string();
            self.select_id(&id);
        }
    }

    /// Drop: commit the on-screen order to the task list.
    pub fn end_drag(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        let id = session.dragged().to_string();
        let order = session.finish();
        debug!(%id, "drag end");
        self.list.reorder(&order);
        self.select_id(&id);
    }

    pub fn cancel_drag(&mut self) {
        if let Some(session) = self.drag.take() {
            session.cancel();
        }
        self.clamp_cursor();
    }
}

/// Run the TUI until the user quits
pub fn run(list: TodoList, ui: UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(list, ui);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::ops::ids::SequentialIds;

    fn app_with(titles: &[&str]) -> App {
        let mut list = TodoList::load(Box::new(MemoryStore::new()), Box::new(SequentialIds::new()));
        for title in titles {
            list.add(title);
        }
        App::new(list, UiConfig::default())
    }

    fn titles(app: &App) -> Vec<String> {
        app.list.tasks().iter().map(|t| t.title.clone()).collect()
    }

    /// Lay rows out one per line starting at `top`, as the renderer does.
    fn layout(app: &mut App, top: u16) {
        app.row_boxes = app
            .row_ids()
            .into_iter()
            .enumerate()
            .map(|(i, id)| RowBox::new(id, f64::from(top) + i as f64, 1.0))
            .collect();
    }

    #[test]
    fn insert_mode_adds_and_stays_open() {
        let mut app = app_with(&[]);
        app.begin_insert();
        for c in "  Buy milk ".chars() {
            app.editor.insert(c);
        }
        app.commit_edit();
        assert_eq!(titles(&app), vec!["Buy milk"]);
        assert_eq!(app.mode, Mode::Insert);
        assert_eq!(app.editor.text(), "");
    }

    #[test]
    fn edit_with_blank_text_keeps_title() {
        let mut app = app_with(&["Alpha"]);
        app.begin_edit();
        assert_eq!(app.editor.text(), "Alpha");
        app.editor.clear();
        app.commit_edit();
        assert_eq!(titles(&app), vec!["Alpha"]);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn cancel_edit_discards_changes() {
        let mut app = app_with(&["Alpha"]);
        app.begin_edit();
        app.editor.insert('!');
        app.cancel_edit();
        assert_eq!(titles(&app), vec!["Alpha"]);
        assert!(app.editing_id.is_none());
    }

    #[test]
    fn toggle_under_active_filter_clamps_cursor() {
        let mut app = app_with(&["A", "B"]);
        app.set_filter(FilterMode::Active);
        app.cursor = 1;
        app.toggle_selected();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.row_ids(), vec!["t1".to_string()]);
    }

    #[test]
    fn move_selected_up_and_down() {
        let mut app = app_with(&["A", "B", "C"]);
        app.move_selected(1);
        assert_eq!(titles(&app), vec!["B", "A", "C"]);
        assert_eq!(app.cursor, 1);
        app.move_selected(1);
        assert_eq!(titles(&app), vec!["B", "C", "A"]);
        app.move_selected(1);
        assert_eq!(titles(&app), vec!["B", "C", "A"]);
        app.move_selected(-1);
        assert_eq!(titles(&app), vec!["B", "A", "C"]);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn drag_down_then_drop_reorders() {
        let mut app = app_with(&["A", "B", "C"]);
        layout(&mut app, 3);
        app.begin_drag(3);
        assert!(app.drag.is_some());

        app.drag_to(4);
        layout(&mut app, 3);
        assert_eq!(app.row_ids(), vec!["t2", "t1", "t3"]);
        // Store is untouched until the drop
        assert_eq!(titles(&app), vec!["A", "B", "C"]);

        app.drag_to(5);
        layout(&mut app, 3);
        app.end_drag();
        assert_eq!(titles(&app), vec!["B", "C", "A"]);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn drag_up_lands_on_pointer_row() {
        let mut app = app_with(&["A", "B", "C"]);
        layout(&mut app, 0);
        app.begin_drag(2);
        app.drag_to(0);
        app.end_drag();
        assert_eq!(titles(&app), vec!["C", "A", "B"]);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn drag_outside_rows_does_nothing() {
        let mut app = app_with(&["A"]);
        layout(&mut app, 3);
        app.begin_drag(10);
        assert!(app.drag.is_none());
        app.end_drag();
        assert_eq!(titles(&app), vec!["A"]);
    }

    #[test]
    fn cancel_drag_leaves_order() {
        let mut app = app_with(&["A", "B"]);
        layout(&mut app, 0);
        app.begin_drag(0);
        app.drag_to(1);
        app.cancel_drag();
        assert_eq!(titles(&app), vec!["A", "B"]);
    }

    #[test]
    fn theme_toggle_switches_palette() {
        let mut app = app_with(&[]);
        assert_eq!(app.theme, Theme::dark());
        app.toggle_theme();
        assert_eq!(app.theme, Theme::light());
    }
}

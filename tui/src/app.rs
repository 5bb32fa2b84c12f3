//! Application state for the terminal UI.
//!
//! Three focusable panes (creation form, search input, task list) compose
//! over a `TaskSession`. Search keystrokes and the completed-only toggle
//! update the session filters immediately; the refetch itself happens in
//! `poll`, which the event loop calls once per tick. At most one modal is
//! open at a time.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use task_client::{CreateTask, TaskFilters, TaskSession, Transport, UpdateTask};

/// Cursor-aware single-line text input.
#[derive(Debug, Default, Clone)]
pub struct Input {
    value: String,
    cursor: usize,
}

impl Input {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        let byte_index: usize = self.value.chars().take(self.cursor).map(char::len_utf8).sum();
        self.value.insert(byte_index, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte_index: usize = self
                .value
                .chars()
                .take(self.cursor - 1)
                .map(char::len_utf8)
                .sum();
            self.value.remove(byte_index);
            self.cursor -= 1;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Search,
    List,
}

pub enum Modal {
    Edit { id: i64, input: Input },
    ConfirmDelete { id: i64, name: String },
}

pub struct App<T: Transport> {
    pub session: TaskSession<T>,
    pub focus: Focus,
    pub form: Input,
    pub search: Input,
    pub show_completed_only: bool,
    pub selected: Option<usize>,
    pub modal: Option<Modal>,
    pub should_quit: bool,
}

impl<T: Transport> App<T> {
    pub fn new(session: TaskSession<T>) -> Self {
        Self {
            session,
            focus: Focus::Form,
            form: Input::default(),
            search: Input::default(),
            show_completed_only: false,
            selected: None,
            modal: None,
            should_quit: false,
        }
    }

    /// Reload the mirror when the filters changed. The event loop calls this
    /// once per tick, which makes it the single refetch trigger point — the
    /// initial load happens here too, since a fresh session starts stale.
    pub fn poll(&mut self) {
        if self.session.is_stale() {
            let _ = self.session.reload();
            self.clamp_selection();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }
        match key.code {
            KeyCode::Tab => self.cycle_focus(),
            _ => match self.focus {
                Focus::Form => self.handle_form_key(key),
                Focus::Search => self.handle_search_key(key),
                Focus::List => self.handle_list_key(key),
            },
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Form => Focus::Search,
            Focus::Search => Focus::List,
            Focus::List => Focus::Form,
        };
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        // The form is inert while a request is in flight.
        if self.session.loading() {
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.form.insert(c),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Left => self.form.move_left(),
            KeyCode::Right => self.form.move_right(),
            _ => {}
        }
    }

    /// Submitting an empty (or whitespace-only) name is a no-op; the input
    /// clears only after a successful create.
    fn submit_form(&mut self) {
        let name = self.form.value().trim().to_string();
        if name.is_empty() {
            return;
        }
        if self
            .session
            .create_task(CreateTask {
                name,
                completed: None,
            })
            .is_ok()
        {
            self.form.clear();
            self.clamp_selection();
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.search.insert(c);
                self.apply_filters();
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.apply_filters();
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('e') => self.open_edit_modal(),
            KeyCode::Char('d') => self.open_delete_modal(),
            KeyCode::Char('f') => {
                self.show_completed_only = !self.show_completed_only;
                self.apply_filters();
            }
            _ => {}
        }
    }

    /// Every search keystroke and filter flip lands here; the session only
    /// records the new filters, `poll` performs the refetch.
    fn apply_filters(&mut self) {
        let search = self.search.value().to_string();
        self.session.update_filters(TaskFilters {
            search: (!search.is_empty()).then_some(search),
            completed: self.show_completed_only.then_some(true),
        });
    }

    fn next(&mut self) {
        let len = self.session.tasks().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 >= len => 0,
            Some(i) => i + 1,
            None => 0,
        });
    }

    fn previous(&mut self) {
        let len = self.session.tasks().len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Flip the completed flag of the selected task, sending only `completed`.
    fn toggle_selected(&mut self) {
        let Some(i) = self.selected else { return };
        let Some((id, completed)) = self.session.tasks().get(i).map(|t| (t.id, t.completed)) else {
            return;
        };
        let _ = self.session.update_task(
            id,
            UpdateTask {
                name: None,
                completed: Some(!completed),
            },
        );
    }

    fn open_edit_modal(&mut self) {
        let Some(i) = self.selected else { return };
        let Some((id, name)) = self.session.tasks().get(i).map(|t| (t.id, t.name.clone())) else {
            return;
        };
        self.modal = Some(Modal::Edit {
            id,
            input: Input::with_value(&name),
        });
    }

    fn open_delete_modal(&mut self) {
        let Some(i) = self.selected else { return };
        let Some((id, name)) = self.session.tasks().get(i).map(|t| (t.id, t.name.clone())) else {
            return;
        };
        self.modal = Some(Modal::ConfirmDelete { id, name });
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match self.modal.take() {
            Some(Modal::Edit { id, mut input }) => match key.code {
                KeyCode::Enter => {
                    let name = input.value().trim().to_string();
                    if name.is_empty() {
                        // Saving is disabled until the name is non-empty.
                        self.modal = Some(Modal::Edit { id, input });
                    } else {
                        let _ = self.session.update_task(
                            id,
                            UpdateTask {
                                name: Some(name),
                                completed: None,
                            },
                        );
                    }
                }
                KeyCode::Esc => {}
                KeyCode::Char(c) => {
                    input.insert(c);
                    self.modal = Some(Modal::Edit { id, input });
                }
                KeyCode::Backspace => {
                    input.backspace();
                    self.modal = Some(Modal::Edit { id, input });
                }
                KeyCode::Left => {
                    input.move_left();
                    self.modal = Some(Modal::Edit { id, input });
                }
                KeyCode::Right => {
                    input.move_right();
                    self.modal = Some(Modal::Edit { id, input });
                }
                _ => self.modal = Some(Modal::Edit { id, input }),
            },
            Some(Modal::ConfirmDelete { id, name }) => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    let _ = self.session.delete_task(id);
                    self.clamp_selection();
                }
                KeyCode::Esc | KeyCode::Char('n') => {}
                _ => self.modal = Some(Modal::ConfirmDelete { id, name }),
            },
            None => {}
        }
    }

    /// Keep the selection inside the mirror after it shrank or was replaced.
    fn clamp_selection(&mut self) {
        let len = self.session.tasks().len();
        self.selected = match len {
            0 => None,
            _ => Some(self.selected.unwrap_or(0).min(len - 1)),
        };
    }
}

use ratatui::widgets::ListState;

use crate::config::AppConfig;
use crate::models::expense::Expense;
use crate::store::ExpenseStore;

#[derive(Debug, PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
    Editing(usize),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FormField {
    Title,
    Amount,
}

#[derive(Debug)]
pub struct App {
    pub store: ExpenseStore,
    pub config: AppConfig,
    pub list_state: ListState,
    pub input_mode: InputMode,
    pub form_field: FormField,
    pub title_input: String,
    pub amount_input: String,
    pub form_error: Option<String>,
}

impl App {
    pub fn new(store: ExpenseStore, config: AppConfig) -> Self {
        let mut list_state = ListState::default();
        if !store.is_empty() {
            list_state.select(Some(0));
        }

        App {
            store,
            config,
            list_state,
            input_mode: InputMode::Normal,
            form_field: FormField::Title,
            title_input: String::new(),
            amount_input: String::new(),
            form_error: None,
        }
    }

    pub fn next(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.store.len().saturating_sub(1) {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.store.len().saturating_sub(1)
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn begin_add(&mut self) {
        self.title_input.clear();
        self.amount_input.clear();
        self.form_field = FormField::Title;
        self.form_error = None;
        self.input_mode = InputMode::Adding;
    }

    /// Enter edit mode for the record at `index`, pre-filling the form.
    /// Out-of-range is a no-op; any earlier unsaved form state is discarded.
    pub fn begin_edit(&mut self, index: usize) {
        let Some(expense) = self.store.get(index) else {
            return;
        };

        self.title_input = expense.title.clone();
        self.amount_input = expense.amount.to_string();
        self.form_field = FormField::Title;
        self.form_error = None;
        self.input_mode = InputMode::Editing(index);
    }

    pub fn edit_selected(&mut self) {
        if let Some(index) = self.list_state.selected() {
            self.begin_edit(index);
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };

        if !self.store.remove(index) {
            return;
        }

        if self.store.is_empty() {
            self.list_state.select(None);
        } else if index >= self.store.len() {
            self.list_state.select(Some(self.store.len() - 1));
        }
    }

    /// Validate the form and apply it: append when adding, overwrite in
    /// place when editing. On a validation failure the message is surfaced
    /// and the form stays open with the list unchanged.
    pub fn submit_form(&mut self) {
        let expense = match Expense::from_input(&self.title_input, &self.amount_input) {
            Ok(expense) => expense,
            Err(e) => {
                self.form_error = Some(e.to_string());
                return;
            }
        };

        match self.input_mode {
            InputMode::Adding => {
                self.store.add(expense);
                if self.list_state.selected().is_none() {
                    self.list_state.select(Some(0));
                }
            }
            InputMode::Editing(index) => {
                self.store.update(index, expense);
            }
            InputMode::Normal => return,
        }

        self.close_form();
    }

    /// Leave the form without committing, discarding its transient state.
    pub fn cancel_form(&mut self) {
        self.close_form();
    }

    fn close_form(&mut self) {
        self.title_input.clear();
        self.amount_input.clear();
        self.form_field = FormField::Title;
        self.form_error = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_field(&mut self) {
        self.form_field = match self.form_field {
            FormField::Title => FormField::Amount,
            FormField::Amount => FormField::Title,
        };
    }

    pub fn handle_input(&mut self, c: char) {
        match self.form_field {
            FormField::Title => self.title_input.push(c),
            FormField::Amount => self.amount_input.push(c),
        }
    }

    pub fn handle_backspace(&mut self) {
        match self.form_field {
            FormField::Title => {
                self.title_input.pop();
            }
            FormField::Amount => {
                self.amount_input.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn empty_app(dir: &TempDir) -> App {
        let store = ExpenseStore::load(dir.path().join("expenses.json"));
        App::new(store, AppConfig::default())
    }

    fn add(app: &mut App, title: &str, amount: &str) {
        app.begin_add();
        app.title_input = title.to_string();
        app.amount_input = amount.to_string();
        app.submit_form();
    }

    #[test]
    fn typing_into_the_form_adds_a_record_and_clears_fields() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);

        app.begin_add();
        for c in "Bus".chars() {
            app.handle_input(c);
        }
        app.toggle_field();
        for c in "20".chars() {
            app.handle_input(c);
        }
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.total(), dec!(20));
        assert_eq!(app.title_input, "");
        assert_eq!(app.amount_input, "");
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn add_rejects_empty_title_without_mutating() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);

        app.begin_add();
        app.amount_input = "10".to_string();
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Adding);
        assert_eq!(app.form_error.as_deref(), Some("Please enter a title."));
        assert!(app.store.is_empty());
    }

    #[test]
    fn add_rejects_invalid_amount_without_mutating() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);

        app.begin_add();
        app.title_input = "Coffee".to_string();
        app.amount_input = "abc".to_string();
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Adding);
        assert_eq!(
            app.form_error.as_deref(),
            Some("Please enter a valid amount.")
        );
        assert!(app.store.is_empty());
    }

    #[test]
    fn edit_commit_updates_the_record_in_place() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);
        add(&mut app, "Tea", "5");

        app.begin_edit(0);
        assert_eq!(app.title_input, "Tea");
        assert_eq!(app.amount_input, "5");

        app.title_input = "Coffee".to_string();
        app.amount_input = "7".to_string();
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.get(0).unwrap().title, "Coffee");
        assert_eq!(app.store.total(), dec!(7));
    }

    #[test]
    fn edit_commit_with_invalid_input_keeps_record_and_stays_editing() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);
        add(&mut app, "Tea", "5");

        app.begin_edit(0);
        app.amount_input = "abc".to_string();
        app.submit_form();

        assert_eq!(app.input_mode, InputMode::Editing(0));
        assert_eq!(
            app.form_error.as_deref(),
            Some("Please enter a valid amount.")
        );
        assert_eq!(app.store.get(0).unwrap().amount, dec!(5));
    }

    #[test]
    fn cancel_discards_transient_form_state() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);
        add(&mut app, "Tea", "5");

        app.begin_edit(0);
        app.title_input = "Coffee".to_string();
        app.cancel_form();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.get(0).unwrap().title, "Tea");
        assert_eq!(app.title_input, "");
    }

    #[test]
    fn begin_edit_out_of_range_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);
        add(&mut app, "Tea", "5");

        app.begin_edit(3);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn entering_edit_replaces_a_pending_edit_session() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);
        add(&mut app, "Tea", "5");
        add(&mut app, "Bus", "20");

        app.begin_edit(0);
        app.title_input = "Coffee".to_string();

        app.begin_edit(1);
        assert_eq!(app.input_mode, InputMode::Editing(1));
        assert_eq!(app.title_input, "Bus");
        assert_eq!(app.store.get(0).unwrap().title, "Tea");
    }

    #[test]
    fn delete_clamps_the_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = empty_app(&dir);
        add(&mut app, "Tea", "5");
        add(&mut app, "Bus", "20");

        app.list_state.select(Some(1));
        app.delete_selected();
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.store.len(), 1);

        app.delete_selected();
        assert_eq!(app.list_state.selected(), None);
        assert!(app.store.is_empty());
    }
}

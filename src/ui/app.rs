use tui::widgets::ListState;

use crate::{
    errors::ItemError,
    intents::{ItemDraft, ViewSink},
    models::item_model::{Item, CATEGORIES},
    ui::region::{render, DisplayRegion},
};

pub struct StatefulList<T> {
    pub state: ListState,
    pub items: Vec<T>,
}

impl<T> StatefulList<T> {
    pub fn with_items(items: Vec<T>) -> StatefulList<T> {
        StatefulList {
            state: ListState::default(),
            items,
        }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn unselect(&mut self) {
        self.state.select(None);
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    None,
    Editing,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FormField {
    Title,
    Description,
    Category,
    DueDate,
}

/// The create form
#[derive(Debug, Clone, PartialEq)]
pub struct NewItemForm {
    pub title: String,
    pub description: String,
    pub category_index: usize,
    pub due_date: String,
    pub focus: FormField,
}

impl Default for NewItemForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category_index: 0,
            due_date: String::new(),
            focus: FormField::Title,
        }
    }
}

impl NewItemForm {
    pub fn category(&self) -> &'static str {
        CATEGORIES[self.category_index % CATEGORIES.len()]
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Category,
            FormField::Category => FormField::DueDate,
            FormField::DueDate => FormField::Title,
        };
    }

    pub fn previous_field(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::DueDate,
            FormField::Description => FormField::Title,
            FormField::Category => FormField::Description,
            FormField::DueDate => FormField::Category,
        };
    }

    pub fn next_category(&mut self) {
        self.category_index = (self.category_index + 1) % CATEGORIES.len();
    }

    pub fn previous_category(&mut self) {
        self.category_index = (self.category_index + CATEGORIES.len() - 1) % CATEGORIES.len();
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Category => None,
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn draft(&self) -> ItemDraft {
        ItemDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category().to_string(),
            due_date: self.due_date.clone(),
        }
    }
}

/// State of the board: the item region, the user id input, the create
/// form and which view is on top.
pub struct App {
    pub region: DisplayRegion,
    pub form: NewItemForm,
    pub user_id_input: String,
    pub api_url: String,
    pub error_message: String,
    pub input_mode: InputMode,
    navigation_stack: Vec<Route>,
}

#[derive(Debug)]
pub struct Route {
    pub active_block: ActiveBlock,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ActiveBlock {
    Home,
    Error,
    NewItem,
    UserId,
}

pub const DEFAULT_ROUTE: Route = Route {
    active_block: ActiveBlock::Home,
};

impl App {
    pub fn new<T: Into<String>>(user_id: T, api_url: T) -> App {
        App {
            region: DisplayRegion::new(),
            form: NewItemForm::default(),
            user_id_input: user_id.into(),
            api_url: api_url.into(),
            error_message: String::new(),
            input_mode: InputMode::None,
            navigation_stack: vec![DEFAULT_ROUTE],
        }
    }

    /// Gets the current active route
    pub fn get_current_route(&self) -> &Route {
        self.navigation_stack.last().unwrap_or(&DEFAULT_ROUTE)
    }

    /// Push a route to the navigation stack
    /// so that it is rendered
    pub fn push_navigation_stack(&mut self, active_block: ActiveBlock) {
        self.navigation_stack.push(Route { active_block });
    }

    pub fn pop_navigation_stack(&mut self) -> Option<Route> {
        if self.navigation_stack.len() == 1 {
            None
        } else {
            self.navigation_stack.pop()
        }
    }

    pub fn open_form(&mut self) {
        self.push_navigation_stack(ActiveBlock::NewItem);
        self.input_mode = InputMode::Editing;
    }

    pub fn open_user_input(&mut self) {
        self.push_navigation_stack(ActiveBlock::UserId);
        self.input_mode = InputMode::Editing;
    }

    /// Leave an editing view and go back to the list
    pub fn close_editor(&mut self) {
        if self.input_mode == InputMode::Editing {
            self.pop_navigation_stack();
            self.input_mode = InputMode::None;
        }
    }

    pub fn handle_error(&mut self, e: String) {
        self.push_navigation_stack(ActiveBlock::Error);
        self.input_mode = InputMode::None;
        self.error_message = e;
    }

    /// Dismiss the error view, resuming editing if it covered an editor
    pub fn close_error(&mut self) {
        if self.get_current_route().active_block != ActiveBlock::Error {
            return;
        }

        self.pop_navigation_stack();

        self.input_mode = match self.get_current_route().active_block {
            ActiveBlock::NewItem | ActiveBlock::UserId => InputMode::Editing,
            _ => InputMode::None,
        };
    }
}

impl ViewSink for App {
    fn show_items(&mut self, items: Vec<Item>) {
        render(&items, &mut self.region);
    }

    fn reset_form(&mut self) {
        self.form = NewItemForm::default();

        if self.get_current_route().active_block == ActiveBlock::NewItem {
            self.close_editor();
        }
    }

    fn show_error(&mut self, error: &ItemError) {
        self.handle_error(error.to_string());
    }
}

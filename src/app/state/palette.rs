use crate::app::command_palette::CommandItem;

/// Query, filtered view and cursor of an open command palette. Dropped as a
/// whole when the palette closes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaletteState {
    query: String,
    selected_index: usize,
    items: Vec<CommandItem>,
}

impl PaletteState {
    pub fn new(items: Vec<CommandItem>) -> Self {
        Self {
            query: String::new(),
            selected_index: 0,
            items,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn items(&self) -> &[CommandItem] {
        &self.items
    }

    /// Case-insensitive substring match on title or subtitle, in registry order.
    pub fn filtered_items(&self) -> Vec<&CommandItem> {
        if self.query.is_empty() {
            return self.items.iter().collect();
        }
        let q = self.query.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&q) || item.subtitle.to_lowercase().contains(&q)
            })
            .collect()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected_index = 0;
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.selected_index = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.selected_index = 0;
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.filtered_items().len() {
            self.selected_index += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn selected(&self) -> Option<&CommandItem> {
        self.filtered_items().get(self.selected_index).copied()
    }

    /// The action of the selected item, if the cursor still points into the
    /// filtered view.
    pub fn execute_selected(&self) -> Option<crate::app::action::Action> {
        self.selected().map(|item| item.action.clone())
    }

    pub fn execute_index(&self, index: usize) -> Option<crate::app::action::Action> {
        self.filtered_items()
            .get(index)
            .map(|item| item.action.clone())
    }
}

// Generic list state.
// Loading state, paged items and keyboard selection for list views.

use ratatui::widgets::ListState;

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Items loaded so far from a pager.
#[derive(Debug, Clone)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub end_reached: bool,
    pub loading_more: bool,
}

impl<T> Default for PaginatedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            end_reached: false,
            loading_more: false,
        }
    }
}

impl<T> PaginatedList<T> {
    pub fn new(items: Vec<T>, end_reached: bool) -> Self {
        Self {
            items,
            end_reached,
            loading_more: false,
        }
    }

    pub fn has_more(&self) -> bool {
        !self.end_reached
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// State for a selectable list with keyboard navigation.
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    pub data: LoadingState<PaginatedList<T>>,
    pub list_state: ListState,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            data: LoadingState::Idle,
            list_state: ListState::default(),
        }
    }
}

impl<T> SelectableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        if let Some(items) = self.data.data() {
            if items.is_empty() {
                return;
            }
            let i = match self.list_state.selected() {
                Some(i) if i >= items.len() - 1 => i, // Stay at end
                Some(i) => i + 1,
                None => 0,
            };
            self.list_state.select(Some(i));
        }
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        if let Some(items) = self.data.data() {
            if items.is_empty() {
                return;
            }
            let i = match self.list_state.selected() {
                Some(i) => i.saturating_sub(1),
                None => 0,
            };
            self.list_state.select(Some(i));
        }
    }

    /// Get the selected item.
    pub fn selected_item(&self) -> Option<&T> {
        let index = self.list_state.selected()?;
        let items = self.data.data()?;
        items.items.get(index)
    }

    /// Check if we're near the end of the list (for pagination trigger).
    pub fn near_end(&self, threshold: usize) -> bool {
        match (self.list_state.selected(), self.data.data()) {
            (Some(index), Some(items)) => {
                items.has_more()
                    && !items.loading_more
                    && index >= items.len().saturating_sub(threshold)
            }
            _ => false,
        }
    }

    /// Replace the items, keeping the selection where it was when possible.
    pub fn set_loaded(&mut self, items: Vec<T>, end_reached: bool) {
        let len = items.len();
        self.data = LoadingState::Loaded(PaginatedList::new(items, end_reached));
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    /// Mark an append as in flight.
    pub fn set_loading_more(&mut self, loading: bool) {
        if let LoadingState::Loaded(list) = &mut self.data {
            list.loading_more = loading;
        }
    }

    /// Set loading state.
    pub fn set_loading(&mut self) {
        self.data = LoadingState::Loading;
    }

    /// Set error state, unless there is already data worth keeping on screen.
    pub fn set_error(&mut self, error: String) {
        match &mut self.data {
            LoadingState::Loaded(list) if !list.is_empty() => list.loading_more = false,
            _ => self.data = LoadingState::Error(error),
        }
    }

    /// Drop all data and selection.
    pub fn reset(&mut self) {
        self.data = LoadingState::Idle;
        self.list_state.select(None);
    }
}

// Navigation state management.
// Handles the navigation stack and breadcrumb trail for drill-down views.

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone)]
pub struct BreadcrumbNode {
    /// Display label for the breadcrumb.
    pub label: String,
}

/// The current view level in the navigation hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLevel {
    /// Top level: listing or search results
    Users,
    /// Profile for a single user
    Detail { login: String },
}

impl ViewLevel {
    /// Create a breadcrumb node for this view level.
    pub fn to_breadcrumb(&self) -> BreadcrumbNode {
        let label = match self {
            ViewLevel::Users => "Users".to_string(),
            ViewLevel::Detail { login } => login.clone(),
        };
        BreadcrumbNode { label }
    }
}

/// Navigation stack; the root level is never popped.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    root: ViewLevel,
    /// Levels above the root (bottom = first drill-down, top = current)
    stack: Vec<ViewLevel>,
}

impl NavigationStack {
    /// Create a new navigation stack starting at the given level.
    pub fn new(root: ViewLevel) -> Self {
        Self {
            root,
            stack: Vec::new(),
        }
    }

    /// Get the current view level.
    pub fn current(&self) -> &ViewLevel {
        self.stack.last().unwrap_or(&self.root)
    }

    /// Push a new view level onto the stack (drill down).
    pub fn push(&mut self, level: ViewLevel) {
        self.stack.push(level);
    }

    /// Pop the current view level (go back). Returns false if at root.
    pub fn pop(&mut self) -> bool {
        self.stack.pop().is_some()
    }

    /// Check if we can go back (not at root).
    pub fn can_go_back(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Get the breadcrumb trail.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        std::iter::once(&self.root)
            .chain(self.stack.iter())
            .map(|level| level.to_breadcrumb())
            .collect()
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(ViewLevel::Users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_stack() {
        let mut nav = NavigationStack::default();

        assert!(!nav.can_go_back());
        assert_eq!(nav.current(), &ViewLevel::Users);

        nav.push(ViewLevel::Detail {
            login: "octocat".to_string(),
        });
        assert!(nav.can_go_back());
        assert_eq!(
            nav.current(),
            &ViewLevel::Detail {
                login: "octocat".to_string()
            }
        );

        assert!(nav.pop());
        assert_eq!(nav.current(), &ViewLevel::Users);

        // Can't pop past root
        assert!(!nav.pop());
        assert_eq!(nav.breadcrumbs().len(), 1);
    }

    #[test]
    fn test_breadcrumbs() {
        let mut nav = NavigationStack::default();
        nav.push(ViewLevel::Detail {
            login: "mojombo".to_string(),
        });

        let breadcrumbs = nav.breadcrumbs();
        assert_eq!(breadcrumbs.len(), 2);
        assert_eq!(breadcrumbs[0].label, "Users");
        assert_eq!(breadcrumbs[1].label, "mojombo");
    }
}

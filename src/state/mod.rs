// State management module.
// Handles navigation, data loading, and UI state for the views.

pub mod console;
pub mod detail;
pub mod list;
pub mod navigation;
pub mod users;

pub use console::{Console, ConsoleLevel};
pub use detail::UserDetailState;
pub use list::LoadingState;
pub use navigation::{BreadcrumbNode, NavigationStack, ViewLevel};
pub use users::UserListState;

// UI module for rendering the TUI.
// Contains widgets for breadcrumbs, the search box, lists and the profile view.

mod breadcrumb;
mod detail;
mod list;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::github::UserApi;
use crate::state::{ConsoleLevel, UserListState, ViewLevel};

/// Main draw function that renders the entire UI.
pub fn draw<A: UserApi + 'static>(frame: &mut Frame, app: &mut App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Breadcrumb
            Constraint::Length(3), // Search box
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Console message
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let summary = match app.nav.current() {
        ViewLevel::Users => list_summary(&app.users),
        ViewLevel::Detail { .. } => None,
    };
    breadcrumb::draw_breadcrumb(frame, &app.nav.breadcrumbs(), chunks[0], summary);

    draw_search_box(frame, &app.users, chunks[1]);

    match app.nav.current() {
        ViewLevel::Users => list::render_users_list(frame, &mut app.users, chunks[2]),
        ViewLevel::Detail { .. } => detail::render_user_detail(frame, &app.detail, chunks[2]),
    }

    draw_console_line(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn list_summary(users: &UserListState) -> Option<String> {
    let data = users.list.data.data()?;
    let suffix = if data.end_reached { "" } else { "+" };
    Some(format!("{}{} users ", data.len(), suffix))
}

/// Draw the search input; highlighted while it has focus.
fn draw_search_box(frame: &mut Frame, users: &UserListState, area: Rect) {
    let border_color = if users.editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Search ");

    let line = if users.editing {
        Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(users.input.as_str()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if users.input.is_empty() {
        Line::from(Span::styled(
            "Press / to search GitHub users",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::raw(users.input.as_str()))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw the newest console message.
fn draw_console_line<A: UserApi + 'static>(frame: &mut Frame, app: &App<A>, area: Rect) {
    let Some(msg) = app.console.latest() else {
        return;
    };
    let (icon, color) = match msg.level {
        ConsoleLevel::Error => ("❌", Color::Red),
        ConsoleLevel::Warn => ("⚠️", Color::Yellow),
        ConsoleLevel::Info => ("ℹ️", Color::Cyan),
    };
    let line = Line::from(vec![
        Span::raw(format!(" {} ", icon)),
        Span::styled(msg.message.as_str(), Style::default().fg(color)),
        Span::styled(
            format!("  {}", list::format_relative_time(&msg.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the status bar with keybinding hints.
fn draw_status_bar<A: UserApi + 'static>(frame: &mut Frame, app: &App<A>, area: Rect) {
    let hints = if app.users.editing {
        vec![
            Span::raw(" type "),
            Span::styled("Search", Style::default().fg(Color::DarkGray)),
            Span::raw("  ^u "),
            Span::styled("Clear", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵/Esc "),
            Span::styled("Done", Style::default().fg(Color::DarkGray)),
        ]
    } else if app.nav.can_go_back() {
        vec![
            Span::raw(" Esc "),
            Span::styled("Back", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Profile", Style::default().fg(Color::DarkGray)),
            Span::raw("  / "),
            Span::styled("Search", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50;
    let popup_height = 14;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("↑/↓ or j/k", "Navigate list"),
        key("Enter", "Open profile"),
        key("/", "Search users"),
        key("Esc", "Go back / clear search"),
        key("r", "Refresh or retry"),
        key("?", "Show/hide this help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use tokio::runtime::Handle;

    use super::*;
    use crate::cache::CacheDb;
    use crate::github::testing::FakeApi;
    use crate::model::User;
    use crate::paging::{Pagination, PagingConfig};
    use crate::repository::UserRepository;

    fn screen(app: &mut App<FakeApi>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_draw_users_and_search_hint() {
        let repo = Arc::new(UserRepository::new(
            Arc::new(FakeApi::new()),
            CacheDb::open_in_memory().unwrap(),
            PagingConfig::default(),
        ));
        let mut app = App::new(repo, Handle::current(), Duration::from_millis(500));
        let generation = app.users.begin_query("");
        let users = vec![User {
            id: 1,
            login: "mojombo".to_string(),
            avatar_url: String::new(),
        }];
        app.users
            .apply_loaded(generation, users, Pagination::EndReached);

        let text = screen(&mut app);

        assert!(text.contains("Press / to search GitHub users"));
        assert!(text.contains("mojombo"));
        assert!(text.contains("1 users"));
    }
}

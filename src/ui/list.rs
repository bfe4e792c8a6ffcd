// Generic list rendering for selectable items.
// Provides styled list views with loading and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::model::User;
use crate::state::{LoadingState, UserListState};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 365 {
        format!("{}y ago", duration.num_days() / 365)
    } else if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(vec![
        Line::from(format!("❌ {}", error)),
        Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

fn user_item(user: &User) -> ListItem<'_> {
    ListItem::new(Line::from(vec![
        Span::raw("👤 "),
        Span::styled(user.login.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            format!("  #{}", user.id),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

/// Render the listing or search results.
pub fn render_users_list(frame: &mut Frame, state: &mut UserListState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(block_title(state));
    let inner = block.inner(area);

    match &state.list.data {
        LoadingState::Idle => {
            frame.render_widget(block, area);
            render_empty(frame, inner, "Press r to load users");
        }
        LoadingState::Loading => {
            frame.render_widget(block, area);
            let message = if state.is_search() {
                "Searching"
            } else {
                "Loading users"
            };
            render_loading(frame, inner, message);
        }
        LoadingState::Error(e) => {
            frame.render_widget(block, area);
            render_error(frame, inner, e);
        }
        LoadingState::Loaded(data) if data.is_empty() => {
            frame.render_widget(block, area);
            if state.is_refreshing() {
                render_loading(frame, inner, "Loading users");
            } else if state.is_search() {
                render_empty(frame, inner, "No users match this search");
            } else {
                render_empty(frame, inner, "No users cached yet");
            }
        }
        LoadingState::Loaded(data) => {
            let mut items: Vec<ListItem> = data.items.iter().map(user_item).collect();

            // Footer row shows append progress and the end of the list
            let footer = if data.loading_more {
                Some(Span::styled(
                    "⏳ Loading more...",
                    Style::default().fg(Color::Yellow),
                ))
            } else if data.end_reached {
                Some(Span::styled(
                    format!("· {} users ·", data.len()),
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                None
            };
            if let Some(footer) = footer {
                items.push(ListItem::new(Line::from(footer)));
            }

            let title = if state.is_refreshing() {
                format!("{}⟳ ", block_title(state))
            } else {
                block_title(state)
            };

            let list_widget = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            frame.render_stateful_widget(list_widget, area, &mut state.list.list_state);
        }
    }
}

fn block_title(state: &UserListState) -> String {
    if state.is_search() {
        format!(" Search: {} ", state.active_query().trim())
    } else {
        " Users ".to_string()
    }
}

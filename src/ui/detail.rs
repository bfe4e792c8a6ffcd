// Profile view for a single user.

use ratatui::{prelude::*, widgets::*};

use crate::model::UserDetail;
use crate::state::UserDetailState;

use super::list::{format_relative_time, render_empty, render_loading};

fn field<'a>(label: &'a str, value: Option<&'a str>) -> Option<Line<'a>> {
    let value = value.filter(|v| !v.trim().is_empty())?;
    Some(Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ]))
}

fn profile_lines(detail: &UserDetail) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                detail.name.as_deref().unwrap_or(&detail.login),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  @{}", detail.login),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
    ];

    if let Some(bio) = detail.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        lines.push(Line::from(Span::styled(
            bio,
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    lines.extend(
        [
            field("Company", detail.company.as_deref()),
            field("Location", detail.location.as_deref()),
            field("Blog", detail.blog.as_deref()),
            field("Avatar", Some(detail.avatar_url.as_str())),
        ]
        .into_iter()
        .flatten(),
    );

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            detail.followers.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" followers  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            detail.following.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" following  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            detail.public_repos.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" repositories", Style::default().fg(Color::DarkGray)),
    ]));

    if let Some(created_at) = &detail.created_at {
        lines.push(Line::from(Span::styled(
            format!(
                "Joined {} ({})",
                created_at.format("%Y-%m-%d"),
                format_relative_time(created_at)
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

/// Render the profile, or a placeholder until one is available.
pub fn render_user_detail(frame: &mut Frame, state: &UserDetailState, area: Rect) {
    let title = if state.is_loading && state.data.is_some() {
        format!(" {} ⟳ ", state.login)
    } else {
        format!(" {} ", state.login)
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    match &state.data {
        Some(detail) => {
            let paragraph = Paragraph::new(profile_lines(detail))
                .block(block)
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        None => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            if state.is_loading {
                render_loading(frame, inner, "Loading profile");
            } else {
                render_empty(frame, inner, "Profile unavailable. Press r to retry");
            }
        }
    }
}

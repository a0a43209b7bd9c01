// UI module for rendering the TUI.
// Draws the session and animation settings views plus a status bar.

mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::session::AuthState;
use crate::settings::SettingsSnapshot;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Session => draw_session(frame, &app.auth_state, chunks[1]),
        Tab::Settings => draw_settings(frame, app.settings.as_ref(), chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{:<10}", text), Style::default().fg(Color::DarkGray))
}

/// Lines describing the session, in display order.
fn session_lines(state: &AuthState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let (status, color) = if state.is_loading {
        ("⏳ Checking session...", Color::Yellow)
    } else if state.is_authenticated {
        ("● Signed in", Color::Green)
    } else {
        ("○ Signed out", Color::DarkGray)
    };
    lines.push(Line::from(vec![
        label("Status"),
        Span::styled(status, Style::default().fg(color)),
    ]));

    if let Some(user) = &state.user {
        lines.push(Line::from(vec![
            label("User"),
            Span::raw(user.display_name()),
        ]));
        lines.push(Line::from(vec![
            label("Id"),
            Span::raw(user.id.clone()),
        ]));
        if user.is_admin {
            lines.push(Line::from(vec![
                label("Role"),
                Span::styled("admin", Style::default().fg(Color::Magenta)),
            ]));
        }
    }

    if let Some(error) = &state.error {
        let note = if state.user.is_some() {
            " (showing last known session)"
        } else {
            ""
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("❌ {}{}", error, note),
            Style::default().fg(Color::Red),
        )));
    }

    lines
}

fn draw_session(frame: &mut Frame, state: &AuthState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Session ");
    let text = Paragraph::new(session_lines(state))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(text, area);
}

fn draw_settings(frame: &mut Frame, snapshot: Option<&SettingsSnapshot>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Animation Settings ");

    let Some(snapshot) = snapshot else {
        let text = Paragraph::new("Settings provider not running")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    };

    if snapshot.is_loading {
        let text = Paragraph::new("⏳ Loading settings...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let settings = snapshot.effective();
    let mut lines = vec![
        Line::from(vec![
            label("Enabled"),
            Span::raw(if settings.enabled { "yes" } else { "no" }),
        ]),
        Line::from(vec![label("Speed"), Span::raw(format!("{:.2}x", settings.speed))]),
        Line::from(vec![
            label("Style"),
            Span::raw(settings.style.clone().unwrap_or_else(|| "default".to_string())),
        ]),
    ];

    if let Some(updated) = snapshot.updated_at {
        lines.push(Line::from(vec![
            label("Synced"),
            Span::raw(updated.format("%H:%M:%S").to_string()),
        ]));
    }
    if let Some(error) = &snapshot.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("❌ {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = vec![
        Span::raw(" Tab "),
        Span::styled("Switch", Style::default().fg(Color::DarkGray)),
        Span::raw("  r "),
        Span::styled("Refresh session", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        Span::raw("  │ "),
        Span::styled(app.server.as_str(), Style::default().fg(Color::Cyan)),
    ];

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::User;
    use crate::error::CueRoomError;
    use std::sync::Arc;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loading_lines() {
        let state = AuthState {
            is_loading: true,
            ..AuthState::default()
        };
        assert!(text_of(&session_lines(&state)).contains("Checking session"));
    }

    #[test]
    fn test_stale_session_lines() {
        let mut user = User::new("u1");
        user.is_admin = true;
        let state = AuthState {
            user: Some(user),
            is_loading: false,
            is_authenticated: true,
            error: Some(Arc::new(CueRoomError::Other("offline".to_string()))),
        };

        let text = text_of(&session_lines(&state));
        assert!(text.contains("Signed in"));
        assert!(text.contains("admin"));
        assert!(text.contains("offline (showing last known session)"));
    }

    #[test]
    fn test_signed_out_lines() {
        let text = text_of(&session_lines(&AuthState::default()));
        assert!(text.contains("Signed out"));
        assert!(!text.contains("User"));
    }
}

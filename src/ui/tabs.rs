// Header line: brand, tab selector, and a session indicator on the right.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::session::AuthState;

/// Dot and color summarizing the session at a glance.
fn session_badge(state: &AuthState) -> (&'static str, Color) {
    match (state.is_loading, state.is_authenticated, state.error.is_some()) {
        (true, _, _) => ("◌ checking", Color::Yellow),
        (false, true, true) => ("● offline", Color::Yellow),
        (false, true, false) => ("● online", Color::Green),
        (false, false, true) => ("○ unreachable", Color::Red),
        (false, false, false) => ("○ guest", Color::DarkGray),
    }
}

/// Draw the header at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(
        " TheCueRoom ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    for tab in Tab::ALL {
        let style = if tab == app.active_tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(tab.title(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    let (badge, color) = session_badge(&app.auth_state);
    frame.render_widget(
        Paragraph::new(Span::styled(badge, Style::default().fg(color))).alignment(Alignment::Right),
        inner,
    );
}

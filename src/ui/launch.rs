//! Placeholder screens for launched flows
//!
//! Staged loading, the direct player and the trailer player live outside
//! this crate; the terminal host shows a card for each so the hand-off and
//! the return to the detail screen can be exercised.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::Screen;
use crate::ui::Theme;

/// Draw a launched-flow screen into `area`
pub fn render(frame: &mut Frame, area: Rect, screen: &Screen) {
    let (heading, lines) = match screen {
        Screen::Detail => return,
        Screen::StagedLoading { title, transition } => {
            let mut lines = vec![
                Line::from(Span::styled(title.clone(), Theme::title())),
                Line::from(""),
                Line::from(Span::styled("⟳ Preparing stream...", Theme::accent())),
            ];
            if let Some(name) = transition {
                lines.push(Line::from(Span::styled(
                    format!("transition: {}", name),
                    Theme::dimmed(),
                )));
            }
            (" ⟳ LOADING ", lines)
        }
        Screen::DirectPlayer { title } => (
            " ▶ PLAYER ",
            vec![
                Line::from(Span::styled(title.clone(), Theme::title())),
                Line::from(""),
                Line::from(Span::styled("Playing", Theme::success())),
            ],
        ),
        Screen::Trailer { title, url } => (
            " ▶ TRAILER ",
            vec![
                Line::from(Span::styled(title.clone(), Theme::title())),
                Line::from(""),
                Line::from(Span::styled(url.clone(), Theme::text())),
            ],
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(heading, Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = lines;
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[esc]", Theme::keybind()),
        Span::styled(" back to details", Theme::dimmed()),
    ]));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

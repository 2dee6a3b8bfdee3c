//! Terminal rendering of the detail screen
//!
//! `TerminalDetailView` keeps what the presenter asked for (layout hints,
//! background, movie/show body, dialog, health banner) and queues navigation
//! requests for the app to act on. `render` draws that state.

use std::collections::VecDeque;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::models::{
    DeviceProfile, LayoutHints, LayoutStrategy, MediaKind, MediaRecord, TransitionHint,
};
use crate::presenter::DetailView;
use crate::ui::strings;
use crate::ui::Theme;

/// Rows always left for the content panel
const MIN_CONTENT_ROWS: u16 = 6;

/// Navigation requested by the presenter, drained by the app
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    StagedLoading {
        media: MediaRecord,
        transition: Option<TransitionHint>,
    },
    DirectPlayer {
        media: MediaRecord,
    },
    Trailer {
        media: MediaRecord,
        url: String,
    },
}

/// Modal message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}

/// DetailView backed by the terminal
#[derive(Debug)]
pub struct TerminalDetailView {
    profile: DeviceProfile,
    pub hints: Option<LayoutHints>,
    pub background: Option<String>,
    /// Media rendered in the body, with the kind the presenter chose
    pub content: Option<(MediaKind, MediaRecord)>,
    pub dialog: Option<Dialog>,
    pub banner: Option<String>,
    pending: VecDeque<Navigation>,
}

impl TerminalDetailView {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile,
            hints: None,
            background: None,
            content: None,
            dialog: None,
            banner: None,
            pending: VecDeque::new(),
        }
    }

    /// Next queued navigation request
    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.pending.pop_front()
    }

    /// Whether a dialog or banner covers the screen
    pub fn has_overlay(&self) -> bool {
        self.dialog.is_some() || self.banner.is_some()
    }

    /// Close the dialog, or else the banner. Returns true if one was open.
    pub fn dismiss_overlay(&mut self) -> bool {
        if self.dialog.take().is_some() {
            return true;
        }
        self.banner.take().is_some()
    }

    pub fn title(&self) -> &str {
        self.hints.as_ref().map(|h| h.title.as_str()).unwrap_or("DETAIL")
    }
}

impl DetailView for TerminalDetailView {
    fn device_profile(&self) -> DeviceProfile {
        self.profile
    }

    fn apply_layout_hints(&mut self, hints: &LayoutHints) {
        self.hints = Some(hints.clone());
    }

    fn load_background_image(&mut self, url: &str) {
        self.background = Some(url.to_string());
    }

    fn render_movie(&mut self, media: &MediaRecord) {
        self.content = Some((MediaKind::Movie, media.clone()));
    }

    fn render_show(&mut self, media: &MediaRecord) {
        self.content = Some((MediaKind::Show, media.clone()));
    }

    fn show_dialog(&mut self, title_key: &str, message_key: &str) {
        self.dialog = Some(Dialog {
            title: strings::text(title_key).to_string(),
            message: strings::text(message_key).to_string(),
        });
    }

    fn navigate_staged_loading(
        &mut self,
        media: &MediaRecord,
        transition: Option<&TransitionHint>,
    ) {
        self.pending.push_back(Navigation::StagedLoading {
            media: media.clone(),
            transition: transition.cloned(),
        });
    }

    fn navigate_direct_player(&mut self, media: &MediaRecord) {
        self.pending.push_back(Navigation::DirectPlayer {
            media: media.clone(),
        });
    }

    fn navigate_trailer(&mut self, media: &MediaRecord, url: &str) {
        self.pending.push_back(Navigation::Trailer {
            media: media.clone(),
            url: url.to_string(),
        });
    }

    fn show_health_banner(&mut self, classification_key: &str, seeds: u32, peers: u32) {
        self.banner = Some(strings::health_info(classification_key, seeds, peers));
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Draw the detail screen into `area`
pub fn render(frame: &mut Frame, area: Rect, view: &TerminalDetailView) {
    let Some(hints) = view.hints.as_ref() else {
        let loading = Paragraph::new("⟳ Loading...")
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let toolbar =
        Paragraph::new(format!(" ← {}", hints.title)).style(Theme::scrim(hints.scrim_color));
    frame.render_widget(toolbar, chunks[0]);

    let body = chunks[1];
    let max_top = body.height.saturating_sub(MIN_CONTENT_ROWS);

    match hints.strategy {
        LayoutStrategy::FixedBackground { height } => {
            let bg_height = clamp_rows(height, max_top);
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(bg_height), Constraint::Min(0)])
                .split(body);
            render_background(frame, parts[0], view.background.as_deref());
            render_content(frame, parts[1], view, hints);
        }
        LayoutStrategy::ScrollOverlay { overlay_top } => {
            render_background(frame, body, view.background.as_deref());
            let top = clamp_rows(overlay_top, max_top);
            let content = Rect {
                y: body.y + top,
                height: body.height - top,
                ..body
            };
            frame.render_widget(Clear, content);
            render_content(frame, content, view, hints);
        }
    }

    if let Some(banner) = &view.banner {
        render_banner(frame, body, banner);
    }
    if let Some(dialog) = &view.dialog {
        render_dialog(frame, area, dialog);
    }
}

fn clamp_rows(value: u32, max: u16) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX).min(max)
}

fn render_background(frame: &mut Frame, area: Rect, url: Option<&str>) {
    if area.height == 0 {
        return;
    }
    let label = url.unwrap_or("no image");
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("▒▒▒▒▒▒▒▒", Theme::backdrop())),
        Line::from(Span::styled(label, Theme::backdrop())),
    ];
    let background = Paragraph::new(lines)
        .style(Theme::backdrop())
        .alignment(Alignment::Center);
    frame.render_widget(background, area);
}

fn render_content(frame: &mut Frame, area: Rect, view: &TerminalDetailView, hints: &LayoutHints) {
    let Some((kind, media)) = view.content.as_ref() else {
        return;
    };

    let kind_label = match kind {
        MediaKind::Movie => " MOVIE ",
        MediaKind::Show => " TV SHOW ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(kind_label, Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let year = media.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(media.title.clone(), Theme::title()),
            Span::styled(year, Theme::dimmed()),
        ]),
        Line::from(""),
    ];

    if let Some(synopsis) = &media.synopsis {
        lines.push(Line::from(Span::styled(synopsis.clone(), Theme::text())));
        lines.push(Line::from(""));
    }

    // Play affordance only exists where the layout tints it
    let mut actions = Vec::new();
    if let Some(tint) = hints.play_tint {
        actions.push(Span::styled(" ▶ PLAY ", Theme::play_button(tint)));
        actions.push(Span::raw(" "));
    }
    actions.extend([
        Span::styled("[p]", Theme::keybind()),
        Span::styled(" play  ", Theme::dimmed()),
        Span::styled("[t]", Theme::keybind()),
        Span::styled(" trailer  ", Theme::dimmed()),
        Span::styled("[h]", Theme::keybind()),
        Span::styled(" health  ", Theme::dimmed()),
        Span::styled("[esc]", Theme::keybind()),
        Span::styled(" close", Theme::dimmed()),
    ]);
    lines.push(Line::from(actions));

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

fn render_banner(frame: &mut Frame, area: Rect, text: &str) {
    if area.height == 0 {
        return;
    }
    let row = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    frame.render_widget(Clear, row);
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", text), Theme::accent()),
        Span::styled(" [esc] close", Theme::dimmed()),
    ]))
    .style(Theme::status_bar());
    frame.render_widget(banner, row);
}

fn render_dialog(frame: &mut Frame, area: Rect, dialog: &Dialog) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5.min(area.height);

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(dialog.message.as_str(), Theme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(format!(" {} ", dialog.title), Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(popup, popup_area);
}

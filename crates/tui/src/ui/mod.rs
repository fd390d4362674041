//! Rendering. Every view reads `App` and draws; none of them mutate it.

pub mod admin;
pub mod form;
pub mod home;
pub mod runtime;
pub mod text_input;
pub mod utils;

use groundwork_engine::NoticeKind;
use groundwork_util::MessageKey;
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, NAV_ITEMS, Route};
use crate::theme;
use crate::ui::utils::{centered_rect, hint_spans};

pub fn draw(frame: &mut Frame, app: &App) {
    let [nav_area, body_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_nav(frame, app, nav_area);
    let hint = match &app.route {
        Route::Home => {
            home::draw(frame, app, body_area);
            app.text(MessageKey::HomeHint)
        }
        Route::Admin => {
            admin::draw(frame, app, body_area);
            app.text(MessageKey::AdminHint)
        }
        _ => {
            form::draw(frame, app, body_area);
            app.text(MessageKey::SubmitHint)
        }
    };
    frame.render_widget(Paragraph::new(Line::from(hint_spans(hint))), hint_area);

    if app.route == Route::Admin && app.admin.confirm_delete.is_some() {
        draw_message_modal(frame, app.text(MessageKey::NoticeTitle), app.text(MessageKey::ConfirmDelete), None, theme::text_style());
    }
    if let Some(notice) = app.notice {
        let style = match notice.kind {
            NoticeKind::Info => theme::success_style(),
            NoticeKind::Error => theme::error_style(),
        };
        draw_message_modal(
            frame,
            app.text(MessageKey::NoticeTitle),
            app.text(notice.message),
            Some(app.text(MessageKey::DismissHint)),
            style,
        );
    }
}

fn draw_nav(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = NAV_ITEMS
        .iter()
        .enumerate()
        .map(|(index, (key, _))| Line::from(format!("{} {}", index + 1, app.text(*key))))
        .collect();
    let selected = match app.route {
        Route::NewProspect | Route::EditProspect(_) => 3,
        _ => app.nav_cursor,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::text_muted())
        .highlight_style(theme::list_highlight_style())
        .block(theme::block(app.text(MessageKey::AppTitle), false));
    frame.render_widget(tabs, area);
}

fn draw_message_modal(frame: &mut Frame, title: &str, message: &str, hint: Option<&str>, style: Style) {
    let area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, area);
    let mut lines = vec![Line::from(""), Line::styled(message, style)];
    if let Some(hint) = hint {
        lines.push(Line::from(""));
        lines.push(Line::styled(hint, theme::text_muted()));
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(theme::block(title, true));
    frame.render_widget(paragraph, area);
}

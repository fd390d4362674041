//! Landing screen: services, FAQ and how to reach the business.

use groundwork_types::Field;
use groundwork_util::MessageKey;
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::theme;

const SERVICES: [(MessageKey, MessageKey); 3] = [
    (MessageKey::ServiceNewHomes, MessageKey::ServiceNewHomesBody),
    (MessageKey::ServiceRemodeling, MessageKey::ServiceRemodelingBody),
    (MessageKey::ServiceAdditions, MessageKey::ServiceAdditionsBody),
];

const FAQ: [(MessageKey, MessageKey); 3] = [
    (MessageKey::FaqEstimateQuestion, MessageKey::FaqEstimateAnswer),
    (MessageKey::FaqPermitsQuestion, MessageKey::FaqPermitsAnswer),
    (MessageKey::FaqTimelineQuestion, MessageKey::FaqTimelineAnswer),
];

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let [left, right] = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);
    let [services_area, faq_area] = Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(left);

    frame.render_widget(titled_entries(app, MessageKey::ServicesTitle, &SERVICES), services_area);
    frame.render_widget(titled_entries(app, MessageKey::FaqTitle, &FAQ), faq_area);
    frame.render_widget(contact_panel(app), right);
}

fn titled_entries<'a>(app: &'a App, title: MessageKey, entries: &[(MessageKey, MessageKey)]) -> Paragraph<'a> {
    let mut lines = Vec::new();
    for (heading, body) in entries {
        lines.push(Line::styled(app.text(*heading), theme::key_style()));
        lines.push(Line::styled(app.text(*body), theme::text_style()));
        lines.push(Line::from(""));
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(theme::block(app.text(title), false))
}

fn contact_panel(app: &App) -> Paragraph<'_> {
    let config = &app.config;
    let rows = [
        (app.localizer.field_label(Field::Phone), config.contact_phone.as_str()),
        (app.localizer.field_label(Field::Email), config.contact_email.as_str()),
        ("Facebook", config.social.facebook.as_str()),
        ("Instagram", config.social.instagram.as_str()),
        ("LinkedIn", config.social.linkedin.as_str()),
    ];
    let lines: Vec<Line> = rows
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), theme::text_muted()),
                Span::styled(value, theme::text_style()),
            ])
        })
        .collect();
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(theme::block(app.text(MessageKey::ContactUsTitle), false))
}

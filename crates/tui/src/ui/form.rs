//! Contact, quote and admin prospect forms.
//!
//! One row per field with its inline validation message underneath, a submit
//! button last, and the address suggestion list floating below the address
//! row while it is open.

use groundwork_engine::FormMode;
use groundwork_types::{Field, FormKind};
use groundwork_util::MessageKey;
use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, FormView};
use crate::theme;

const SUGGESTION_ROWS: u16 = 5;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let block = theme::block(app.text(form_title(form)), true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let controller = form.session.controller();
    if controller.is_loading() {
        frame.render_widget(Paragraph::new(app.text(MessageKey::Loading)).style(theme::text_muted()), inner);
        return;
    }

    let label_width = form
        .fields()
        .iter()
        .map(|field| app.localizer.field_label(*field).width())
        .max()
        .unwrap_or(0) as u16
        + 2;

    let mut lines: Vec<Line> = Vec::new();
    let mut focused_line = 0usize;
    for (index, field) in form.fields().iter().enumerate() {
        let focused = form.focus == index;
        if focused {
            focused_line = lines.len();
        }
        lines.push(field_line(app, form, *field, focused, label_width));
        if let Some(issue) = controller.errors().get(*field) {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(label_width as usize)),
                Span::styled(app.localizer.validation_message(issue), theme::error_style()),
            ]));
        }
    }
    lines.push(Line::from(""));
    if form.focused_field().is_none() {
        focused_line = lines.len();
    }
    lines.push(submit_line(app, form));

    let offset = focused_line.saturating_sub(inner.height.saturating_sub(1) as usize) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);

    let row_y = inner.y + (focused_line as u16).saturating_sub(offset);
    if form.focused_field().is_some() && row_y < inner.bottom() {
        let x = inner.x + label_width + form.editor.cursor_column();
        frame.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), row_y));
    }
    if form.suggestions_open() {
        draw_suggestions(frame, app, form, inner, row_y + 1, label_width);
    }
}

fn form_title(form: &FormView) -> MessageKey {
    match (form.session.controller().mode(), form.session.controller().kind()) {
        (FormMode::AdminEdit(_), _) => MessageKey::EditProspectTitle,
        (FormMode::AdminCreate, _) => MessageKey::NewProspectTitle,
        (FormMode::Contact, FormKind::Contact) => MessageKey::ContactTitle,
        (FormMode::Contact, FormKind::Quote) => MessageKey::QuoteTitle,
    }
}

fn field_line<'a>(app: &'a App, form: &'a FormView, field: Field, focused: bool, label_width: u16) -> Line<'a> {
    let label = app.localizer.field_label(field);
    let required = form.session.controller().kind().required_fields().contains(&field);
    let label_text = format!("{label}{}", if required { "*" } else { "" });
    let padded = format!("{label_text:<width$}", width = label_width as usize);
    let value = if focused {
        form.editor.input()
    } else {
        form.session.controller().value(field)
    };
    let value_style = if focused { theme::highlight_style() } else { theme::text_style() };
    Line::from(vec![
        Span::styled(padded, theme::text_muted()),
        Span::styled(value.replace('\n', " "), value_style),
    ])
}

fn submit_line<'a>(app: &'a App, form: &FormView) -> Line<'a> {
    let controller = form.session.controller();
    if controller.is_submitting() {
        return Line::styled(app.text(MessageKey::Submitting), theme::text_muted());
    }
    let style = if form.focused_field().is_none() {
        theme::list_highlight_style().add_modifier(Modifier::REVERSED)
    } else {
        theme::key_style()
    };
    Line::styled(format!("[ {} ]", app.text(MessageKey::SubmitButton)), style)
}

fn draw_suggestions(frame: &mut Frame, app: &App, form: &FormView, inner: Rect, top: u16, label_width: u16) {
    let suggestions = form.session.suggestions();
    let height = (suggestions.len() as u16).min(SUGGESTION_ROWS) + 2;
    let x = inner.x + label_width;
    let area = Rect::new(x, top, inner.right().saturating_sub(x), height).intersection(frame.area());
    if area.height < 3 {
        return;
    }

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|suggestion| ListItem::new(suggestion.label.as_str()).style(theme::text_style()))
        .collect();
    let list = List::new(items)
        .highlight_style(theme::list_highlight_style())
        .block(theme::block(app.text(MessageKey::Suggestions), true));
    let mut state = ListState::default().with_selected(Some(form.suggestion_cursor));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

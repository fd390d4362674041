//! Prospect list: filter line on top, sortable table below.

use groundwork_engine::SortDirection;
use groundwork_util::MessageKey;
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::theme;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let admin = &app.admin;
    let [filter_area, table_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);

    let filter_text = if admin.filter.input().is_empty() && !admin.filtering {
        Span::styled(app.text(MessageKey::FilterPlaceholder), theme::text_muted())
    } else {
        Span::styled(admin.filter.input(), theme::text_style())
    };
    let filter_block = theme::block("/", admin.filtering);
    let filter_inner = filter_block.inner(filter_area);
    frame.render_widget(Paragraph::new(Line::from(filter_text)).block(filter_block), filter_area);
    if admin.filtering {
        frame.set_cursor_position(Position::new(filter_inner.x + admin.filter.cursor_column(), filter_inner.y));
    }

    let block = theme::block(app.text(MessageKey::ProspectsTitle), !admin.filtering);
    if admin.loading {
        frame.render_widget(Paragraph::new(app.text(MessageKey::Loading)).style(theme::text_muted()).block(block), table_area);
        return;
    }
    if admin.table.is_empty() {
        frame.render_widget(
            Paragraph::new(app.text(MessageKey::ProspectsEmpty)).style(theme::text_muted()).block(block),
            table_area,
        );
        return;
    }

    let table = &admin.table;
    let header = Row::new(table.columns().iter().enumerate().map(|(index, column)| {
        let marker = match table.sort() {
            Some((sorted, SortDirection::Ascending)) if sorted == index => " ▲",
            Some((sorted, SortDirection::Descending)) if sorted == index => " ▼",
            _ => "",
        };
        Cell::from(format!("{}{marker}", column.header)).style(theme::title_style())
    }));
    let rows: Vec<Row> = table
        .visible_rows()
        .map(|row| {
            Row::new(
                table
                    .columns()
                    .iter()
                    .map(|column| Cell::from(table.cell_text(row, column)).style(theme::text_style())),
            )
        })
        .collect();
    let widths = vec![Constraint::Ratio(1, table.columns().len().max(1) as u32); table.columns().len()];

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme::list_highlight_style())
        .highlight_symbol("› ");
    let mut state = TableState::default().with_selected(table.selected_index());
    frame.render_stateful_widget(widget, table_area, &mut state);
}

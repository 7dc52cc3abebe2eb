use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table},
};

use crate::domain::{CMDMode, TVConfig};
use crate::model::{Model, UIData};

pub const SEARCH_BOX_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;
pub const STATUSLINE_HEIGHT: u16 = 1;
pub const PRIORITY_COLUMN_WIDTH: u16 = 12;
const SEARCH_PLACEHOLDER: &str = "Search influencers by name";

#[derive(Debug)]
pub struct TableUI {
    max_column_width: u16,
}

impl TableUI {
    pub fn new(config: &TVConfig) -> Self {
        Self {
            max_column_width: u16::try_from(config.max_column_width).unwrap_or(u16::MAX),
        }
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let uidata = model.get_uidata();
        let block = Block::bordered()
            .title(Line::from(format!(" Influencers [{}] ", uidata.name).bold()).centered())
            .title_bottom(Line::from(vec![" Help ".into(), "<?> ".blue().bold()]).centered())
            .border_set(border::THICK);
        let inner = block.inner(frame.area());
        frame.render_widget(block, frame.area());

        let [search_area, table_area, footer_area, status_area] = Layout::vertical([
            Constraint::Length(SEARCH_BOX_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
            Constraint::Length(STATUSLINE_HEIGHT),
        ])
        .areas(inner);

        self.draw_search_box(&uidata, frame, search_area);
        self.draw_table(&uidata, frame, table_area);
        self.draw_footer(&uidata, frame, footer_area);
        frame.render_widget(Paragraph::new(uidata.status_message.clone().italic()), status_area);

        if uidata.show_popup {
            let area = popup_area(frame.area(), 60, 60);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(uidata.popup_message.clone())
                    .block(Block::bordered().title(" Help ").border_set(border::ROUNDED)),
                area,
            );
        }
    }

    fn draw_search_box(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let searching = uidata.active_cmdinput && uidata.cmd_mode == Some(CMDMode::Search);
        let content = if searching {
            Line::from(vec!["/ ".into(), Span::raw(uidata.cmdinput.input.clone())])
        } else if uidata.search_term.is_empty() {
            Line::from(vec!["/ ".into(), SEARCH_PLACEHOLDER.dark_gray()])
        } else {
            Line::from(vec!["/ ".into(), uidata.search_term.clone().yellow()])
        };
        let block = Block::bordered().border_set(border::ROUNDED);
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(content).block(block), area);

        if searching {
            frame.set_cursor_position((search_cursor_x(inner, uidata.cmdinput.curser_pos), inner.y));
        }
    }

    fn draw_table(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let header = Row::new(uidata.headers.iter().enumerate().map(|(idx, name)| {
            let cell = Cell::from(name.clone());
            if idx == uidata.selected_column {
                cell.style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
            } else {
                cell.style(Style::default().add_modifier(Modifier::BOLD))
            }
        }))
        .style(Style::default().on_dark_gray());

        let rows = uidata
            .rows
            .iter()
            .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.clone()))));

        let widths = [
            Constraint::Max(self.max_column_width),
            Constraint::Max(self.max_column_width),
            Constraint::Max(self.max_column_width),
            Constraint::Max(self.max_column_width),
            Constraint::Max(self.max_column_width),
            Constraint::Length(PRIORITY_COLUMN_WIDTH),
        ];
        let table = Table::new(rows, widths).header(header).column_spacing(1);
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, uidata: &UIData, frame: &mut Frame, area: Rect) {
        let entering_page = uidata.active_cmdinput && uidata.cmd_mode == Some(CMDMode::GotoPage);
        let line = if entering_page {
            Line::from(vec![
                "Go to page: ".into(),
                uidata.cmdinput.input.clone().yellow().bold(),
            ])
        } else {
            Line::from(uidata.page_label.clone())
        };
        frame.render_widget(Paragraph::new(line).centered(), area);
    }
}

/// Column of the input cursor, kept inside the search box.
fn search_cursor_x(inner: Rect, curser_pos: usize) -> u16 {
    let pos = u16::try_from(curser_pos).unwrap_or(u16::MAX);
    // Offset by the "/ " prompt
    inner
        .x
        .saturating_add(2)
        .saturating_add(pos)
        .min(inner.right().saturating_sub(1))
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

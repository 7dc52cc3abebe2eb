use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, info, trace, warn};

use crate::domain::{CMDMode, HELP_TEXT, ITVError, Message, Record, SortOrder, TVConfig};
use crate::inputter::{InputResult, Inputter};
use crate::view::ViewState;

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    TABLE,
    POPUP,
    CMDINPUT,
}

pub const SORT_INDICATOR_UNSET: &str = "↕";
pub const SORT_INDICATOR_ASCENDING: &str = "▲";
pub const SORT_INDICATOR_DESCENDING: &str = "▼";

/// Everything the UI needs to draw a frame.
#[derive(Debug, Clone)]
pub struct UIData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<[String; 6]>,
    pub selected_column: usize,
    pub page_label: String,
    pub search_term: String,
    pub show_popup: bool,
    pub popup_message: String,
    pub cmdinput: InputResult,
    pub cmd_mode: Option<CMDMode>,
    pub active_cmdinput: bool,
    pub status_message: String,
    pub max_column_width: usize,
}

pub struct Model {
    config: TVConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    name: String,
    view: ViewState,
    selected_column: usize,
    input: Inputter,
    cmd_mode: Option<CMDMode>,
    last_input: InputResult,
    active_cmdinput: bool,
    status_message: String,
}

impl Model {
    pub fn init(config: &TVConfig, name: &str, records: &[Record]) -> Result<Self, ITVError> {
        let view = ViewState::new(records, config.page_size)?;
        let mut model = Self {
            config: config.clone(),
            status: Status::READY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            name: name.to_string(),
            selected_column: 0,
            input: Inputter::default(),
            cmd_mode: None,
            last_input: InputResult::default(),
            active_cmdinput: false,
            status_message: String::new(),
            view,
        };
        model.set_status_message(format!(
            "Loaded {} influencers",
            model.view.records().len()
        ));
        Ok(model)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn raw_keyevents(&self) -> bool {
        self.active_cmdinput
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn get_uidata(&self) -> UIData {
        let headers = self
            .view
            .columns()
            .iter()
            .map(|column| {
                let indicator = match column.order {
                    SortOrder::Ascending => SORT_INDICATOR_ASCENDING,
                    SortOrder::Descending => SORT_INDICATOR_DESCENDING,
                    SortOrder::Unset => SORT_INDICATOR_UNSET,
                };
                format!("{} {}", column.name, indicator)
            })
            .collect();
        let rows = self
            .view
            .current_page()
            .unwrap_or_default()
            .iter()
            .map(Record::cells)
            .collect();

        UIData {
            name: self.name.clone(),
            headers,
            rows,
            selected_column: self.selected_column,
            page_label: format!(
                "Page: {} / {}",
                self.view.page_index(),
                self.view.total_pages()
            ),
            search_term: self.view.search_term().to_string(),
            show_popup: self.modus == Modus::POPUP,
            popup_message: HELP_TEXT.to_string(),
            cmdinput: self.last_input.clone(),
            cmd_mode: self.cmd_mode,
            active_cmdinput: self.active_cmdinput,
            status_message: self.status_message.clone(),
            max_column_width: self.config.max_column_width,
        }
    }

    pub fn update(&mut self, message: Option<Message>) -> Result<(), ITVError> {
        if let Some(msg) = message {
            match self.modus {
                Modus::TABLE => match msg {
                    Message::Quit => self.quit(),
                    Message::MoveLeft => self.move_column_selection_left(),
                    Message::MoveRight => self.move_column_selection_right(),
                    Message::SortColumn => self.sort_selected_column(),
                    Message::NextPage => self.change_page(self.view.page_index() + 1),
                    Message::PrevPage => {
                        self.change_page(self.view.page_index().saturating_sub(1))
                    }
                    Message::FirstPage => self.change_page(1),
                    Message::LastPage => self.change_page(self.view.total_pages()),
                    Message::Search => self.enter_cmd_mode(CMDMode::Search),
                    Message::GotoPage => self.enter_cmd_mode(CMDMode::GotoPage),
                    Message::Help => self.show_help(),
                    _ => (),
                },
                Modus::POPUP => match msg {
                    Message::Quit => self.quit(),
                    Message::Exit | Message::Help => self.exit(),
                    _ => (),
                },
                Modus::CMDINPUT => {
                    if let Message::RawKey(key) = msg {
                        self.raw_input(key)
                    }
                }
            }
        }
        Ok(())
    }

    // -------------------- Control handling functions ---------------------- //

    fn exit(&mut self) {
        if self.modus == Modus::POPUP {
            trace!("Close popup ...");
            self.modus = self.previous_modus;
            self.previous_modus = Modus::POPUP;
        }
    }

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::POPUP;
    }

    fn raw_input(&mut self, key: KeyEvent) {
        if self.active_cmdinput {
            self.last_input = self.input.read(key);
            if self.last_input.finished {
                self.handle_cmd_input();
            }
        }
    }

    fn enter_cmd_mode(&mut self, mode: CMDMode) {
        trace!("Entering command mode {:?} ...", mode);
        self.previous_modus = self.modus;
        self.modus = Modus::CMDINPUT;
        self.cmd_mode = Some(mode);

        self.active_cmdinput = true;
        self.input.clear();
        self.input.set_digits_only(mode == CMDMode::GotoPage);
        self.last_input = self.input.get();
    }

    fn handle_cmd_input(&mut self) {
        trace!("Handle cmd input {:?}", self.last_input);

        self.active_cmdinput = false;
        self.modus = self.previous_modus;
        self.previous_modus = Modus::CMDINPUT;

        let cmd_mode = self.cmd_mode.take();
        if self.last_input.canceled {
            debug!("Input canceled");
            return;
        }

        let cmd_input = self.last_input.input.clone();
        match cmd_mode {
            Some(CMDMode::Search) => self.search(&cmd_input),
            Some(CMDMode::GotoPage) => match cmd_input.parse::<usize>() {
                Ok(page) => self.change_page(page),
                Err(_) => self.set_status_message(format!("Invalid page \"{cmd_input}\"")),
            },
            None => info!("Cmd mode is none!"),
        }
    }

    fn search(&mut self, term: &str) {
        match self.view.on_search_submit(term) {
            Ok(view) => {
                self.view = view;
                let found = self.view.active().len();
                if term.is_empty() {
                    self.set_status_message(format!("Showing all {found} influencers"));
                } else if found == 0 {
                    self.set_status_message("Found no matches!");
                } else {
                    self.set_status_message(format!("Found {found} results"));
                }
            }
            Err(e) => {
                warn!("Search for \"{term}\" failed: {e}");
                self.set_status_message(e.to_string());
            }
        }
    }

    fn sort_selected_column(&mut self) {
        match self.view.on_column_header_click(self.selected_column) {
            Ok(view) => {
                self.view = view;
                let column = &self.view.columns()[self.selected_column];
                let message = format!("Sorted by {} ({:?})", column.name, column.order);
                self.set_status_message(message);
            }
            Err(e) => {
                // The click is ignored, the current view stays as it is
                warn!("Sorting column {} failed: {e}", self.selected_column);
                self.set_status_message(e.to_string());
            }
        }
    }

    // Page bounds are checked here, the view state accepts any index
    fn change_page(&mut self, page: usize) {
        let total_pages = self.view.total_pages();
        if page >= 1 && page <= total_pages {
            self.view = self.view.on_page_index_change(page);
            trace!("Selected page {page}/{total_pages}");
        } else {
            self.set_status_message(format!("No page {page}, there are {total_pages} pages"));
        }
    }

    fn move_column_selection_left(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
    }

    fn move_column_selection_right(&mut self) {
        let last_column = self.view.columns().len().saturating_sub(1);
        self.selected_column = std::cmp::min(self.selected_column + 1, last_column);
    }
}

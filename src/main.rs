use clap::Parser;
use ratatui::DefaultTerminal;
use std::process::ExitCode;
use tracing::info;

use itv::controller::Controller;
use itv::domain::{DEFAULT_PAGE_SIZE, ITVError, TVConfig};
use itv::loader::{expand_path, load_records};
use itv::logging;
use itv::model::{Model, Status};
use itv::ui::TableUI;

/// Browse influencer records in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Dataset to show, a JSON array or a CSV file.
    data_file: String,

    /// Number of rows per page.
    #[arg(short = 'n', long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Where to write the log.
    #[arg(long, default_value = "itv.log")]
    log_file: String,

    /// Event poll interval in milliseconds.
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<(), ITVError> {
    let args = Args::parse();

    let cfg = TVConfig::default()
        .page_size(args.page_size)
        .event_poll_time(args.poll_ms)
        .log_file(expand_path(&args.log_file)?);
    logging::init(&cfg.log_file)?;
    info!("Starting itv with {:?}", cfg);

    let path = expand_path(&args.data_file)?;
    let records = load_records(&path)?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("???")
        .to_string();

    let mut model = Model::init(&cfg, &name, &records)?;
    let ui = TableUI::new(&cfg);
    let controller = Controller::new(&cfg);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut model, &ui, &controller);
    ratatui::restore();

    info!("Exiting itv");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    model: &mut Model,
    ui: &TableUI,
    controller: &Controller,
) -> Result<(), ITVError> {
    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event(model)?;
        model.update(message)?;
    }
    Ok(())
}

//! `datatable` - filter, sort and page through a JSON array of records.

mod error;
mod input;
mod paths;
mod render;
mod settings;

use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use datatable_lib::TableEngine;
use log::LevelFilter;
use log::error;
use log::info;
use simplelog::Config;
use simplelog::WriteLogger;

use crate::error::CliError;
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "datatable", version, about = "Sort, filter and paginate JSON records")]
struct Args {
    /// JSON file holding an array of records
    input: PathBuf,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Sort by column key; repeating a key flips its direction
    #[arg(long = "sort", value_name = "KEY")]
    sort: Vec<String>,

    /// Column filter, case-insensitive substring
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Search across all columns
    #[arg(long)]
    search: Option<String>,

    /// Page to show, 1-based
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long)]
    per_page: Option<usize>,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("missing column key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    paths::rotate_logs();
    let Some(log_path) = paths::log_file() else { return };
    if let Some(dir) = log_path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(file) = File::create(&log_path) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}

fn load_settings(args: &Args) -> Result<Settings, CliError> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => match paths::settings_file() {
            Some(path) => Settings::load_or_default(&path)?,
            None => Settings::default(),
        },
    };
    Ok(settings)
}

fn run(args: &Args) -> Result<String, CliError> {
    let settings = load_settings(args)?;
    let records = input::load_records(&args.input)?;

    let columns = settings.columns(&records);
    let layout = settings.layout(&columns);

    let mut engine = TableEngine::new(records, columns).with_config(settings.table.clone());
    if let Some(per_page) = args.per_page {
        engine.set_items_per_page(per_page);
    }

    for (key, value) in &args.filters {
        engine.handle_filter(key, value);
    }
    if let Some(search) = &args.search {
        engine.handle_search(search);
    }
    for key in &args.sort {
        engine.handle_sort(key);
    }
    engine.handle_page_change(args.page);

    let view = engine.view();
    info!(
        "{} of {} rows matched, page {}/{}",
        view.total_items(),
        engine.data().len(),
        view.current_page(),
        view.total_pages()
    );

    let visible = layout.visible_columns(engine.columns());
    Ok(render::render_table(&view, &visible))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

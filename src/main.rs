use clap::{Args, Parser, Subcommand};
use daylog::compose::{CompositionRequest, DumpComposer};
use daylog::config::{self, DaylogConfig};
use daylog::events::{self, NewEvent};
use daylog::layout::{Layout, available_layouts};
use daylog::logging::{LogConfig, LogFormat, init_logging};
use daylog::selector::{PhotoSelector, PhotoSet};
use daylog::store::{DumpStore, JsonStore};
use daylog::types::ImageRef;
use daylog::{output, render};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "daylog")]
#[command(about = "Register day events, attach photos, and compose photo dumps")]
#[command(long_about = "\
Register day events, attach photos, and compose photo dumps

A dump is a framed grid of an event's photos with an optional title and
memo. Layouts hold a fixed number of photos:

  grid4  2x2    grid6  2x3    grid8  2x4    grid9  3x3

Typical session:

  daylog event add --title \"Beach day\" --date 2025-06-01
  daylog photos add <event-id> beach-01.jpg beach-02.jpg ...
  daylog layouts <event-id>
  daylog compose <event-id> --layout grid6 --title \"Trip\" --background cream
  daylog render <event-id> --output beach.html

Records live under the store directory (default .daylog/) as JSON.
Run 'daylog gen-config' to generate a documented daylog.toml.")]
#[command(version)]
struct Cli {
    /// Working root holding daylog.toml and the store directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    /// Disable colored log output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage events
    #[command(subcommand)]
    Event(EventCommand),
    /// Manage an event's photos
    #[command(subcommand)]
    Photos(PhotosCommand),
    /// List the layouts an event's photos can fill
    Layouts { event_id: String },
    /// Compose and save the dump for an event
    Compose(ComposeArgs),
    /// Print an event's dump as JSON
    Show { event_id: String },
    /// Write an event's dump as a standalone HTML page
    Render {
        event_id: String,
        /// Output file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List events that have photos, newest first
    Gallery,
    /// Print a stock daylog.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum EventCommand {
    /// Register a new event
    Add {
        #[arg(long)]
        title: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Start time as HH:MM
        #[arg(long)]
        start: Option<String>,
        /// End time as HH:MM
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },
    /// List events, newest first
    List,
    /// Delete an event with its photos and dump
    Delete { event_id: String },
}

#[derive(Subcommand)]
enum PhotosCommand {
    /// Attach photo references to an event
    Add {
        event_id: String,
        #[arg(required = true)]
        photos: Vec<String>,
    },
    /// List an event's photos, numbered
    List { event_id: String },
    /// Remove one photo by its number; an existing dump is kept as composed
    Remove { event_id: String, number: usize },
}

#[derive(Args)]
struct ComposeArgs {
    event_id: String,

    /// Layout to fill
    #[arg(long, default_value_t = Layout::MINIMUM)]
    layout: Layout,

    /// Photo numbers to select, in display order (default: the first photos)
    #[arg(long, value_delimiter = ',')]
    pick: Vec<usize>,

    /// Dump title (implies --show-title)
    #[arg(long)]
    title: Option<String>,

    /// Dump memo (implies --show-memo)
    #[arg(long)]
    memo: Option<String>,

    /// Show a title; defaults to the event title
    #[arg(long)]
    show_title: bool,

    /// Show a memo; defaults to the event memo
    #[arg(long)]
    show_memo: bool,

    /// Render without frame, title, or memo
    #[arg(long)]
    no_frame: bool,

    /// Background: palette name or hex color
    #[arg(long)]
    background: Option<String>,

    #[arg(long)]
    font: Option<String>,

    /// Gap between cells in px (clamped to 0-32)
    #[arg(long)]
    gap: Option<u32>,

    /// Cell corner radius in px (clamped to 0-32)
    #[arg(long)]
    radius: Option<u32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(
        &LogConfig::from_verbosity(cli.verbose)
            .with_format(cli.log_format)
            .with_ansi(!cli.no_color),
    )?;

    match cli.command {
        Command::GenConfig => print!("{}", config::stock_config_toml()),
        command => run(command, &cli.root)?,
    }
    Ok(())
}

/// Run a command that needs the config and the store.
fn run(command: Command, root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config(root)?;
    let mut store = JsonStore::open(root.join(&config.store_dir))?;

    match command {
        Command::Event(EventCommand::Add {
            title,
            date,
            start,
            end,
            memo,
        }) => {
            let event = events::register_event(
                &mut store,
                NewEvent {
                    title,
                    date,
                    start_time: start,
                    end_time: end,
                    memo,
                },
            )?;
            output::print_event_created(&event);
        }
        Command::Event(EventCommand::List) => {
            output::print_event_list(&events::list_events(&store)?);
        }
        Command::Event(EventCommand::Delete { event_id }) => {
            events::delete_event(&mut store, &event_id)?;
            println!("Deleted {}", event_id);
        }
        Command::Photos(PhotosCommand::Add { event_id, photos }) => {
            let max = config.photos.max_per_event;
            let report = events::attach_photos(
                &mut store,
                &event_id,
                photos.into_iter().map(ImageRef::new),
                max,
            )?;
            output::print_attach_report(&report, max);
        }
        Command::Photos(PhotosCommand::List { event_id }) => {
            require_event(&store, &event_id)?;
            let photo_set = PhotoSet::new(store.get_photos(&event_id)?);
            output::print_photo_list(photo_set.as_slice());
        }
        Command::Photos(PhotosCommand::Remove { event_id, number }) => {
            let removed = events::remove_photo(&mut store, &event_id, number)?;
            println!("Removed {} {}", number, removed.digest());
        }
        Command::Layouts { event_id } => {
            require_event(&store, &event_id)?;
            let count = PhotoSet::new(store.get_photos(&event_id)?).len();
            output::print_layouts(&available_layouts(count), count);
        }
        Command::Compose(args) => {
            let request = build_request(&store, &config, &args)?;
            let dump = DumpComposer::new(&mut store).compose(request)?;
            output::print_dump(&dump);
        }
        Command::Show { event_id } => {
            let dump = require_dump(&store, &event_id)?;
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        Command::Render { event_id, output } => {
            let dump = require_dump(&store, &event_id)?;
            let path = output.unwrap_or_else(|| PathBuf::from(format!("dump-{event_id}.html")));
            render::write_document(&dump, &path)?;
            println!("Rendered {} → {}", event_id, path.display());
        }
        Command::Gallery => {
            output::print_gallery(&events::gallery(&store)?);
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

fn require_event(store: &JsonStore, event_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    match store.get_event(event_id)? {
        Some(_) => Ok(()),
        None => Err(events::EventError::NotFound(event_id.to_string()).into()),
    }
}

fn require_dump(
    store: &JsonStore,
    event_id: &str,
) -> Result<daylog::types::Dump, Box<dyn std::error::Error>> {
    store
        .get_dump(event_id)?
        .ok_or_else(|| format!("No dump composed for event {event_id}").into())
}

/// Run the selection step for `compose` and turn it into a request.
///
/// The selection starts from the layout's default. With `--pick`, the
/// defaults are toggled off and the picked photos toggled on in order, so
/// picking too many or an unknown number fails the same way an interactive
/// session would.
fn build_request(
    store: &JsonStore,
    config: &DaylogConfig,
    args: &ComposeArgs,
) -> Result<CompositionRequest, Box<dyn std::error::Error>> {
    let event = store
        .get_event(&args.event_id)?
        .ok_or_else(|| events::EventError::NotFound(args.event_id.clone()))?;
    let photo_set = PhotoSet::new(store.get_photos(&event.id)?);
    let mut selector = PhotoSelector::new(photo_set)?;

    if !available_layouts(selector.photo_set().len()).contains(&args.layout) {
        return Err(format!(
            "Layout {} needs {} photos, event has {}",
            args.layout,
            args.layout.required_count(),
            selector.photo_set().len()
        )
        .into());
    }
    selector.change_layout(args.layout);

    if !args.pick.is_empty() {
        for photo in selector.selected().to_vec() {
            selector.toggle(&photo)?;
        }
        for &number in &args.pick {
            let photo = selector
                .photo_set()
                .get_numbered(number)
                .cloned()
                .ok_or_else(|| format!("No photo numbered {number}"))?;
            selector.toggle(&photo)?;
        }
    }

    let mut style = config.style.to_style();
    if let Some(background) = &args.background {
        style.background_color = config
            .resolve_color(background)
            .ok_or_else(|| format!("Unknown background '{background}' (palette name or hex)"))?;
    }
    if let Some(font) = &args.font {
        style.font_family = font.clone();
    }
    if let Some(gap) = args.gap {
        style.image_gap = gap;
    }
    if let Some(radius) = args.radius {
        style.image_radius = radius;
    }

    let show_title = args.show_title || args.title.is_some();
    let show_memo = args.show_memo || args.memo.is_some();
    let title = args.title.clone().unwrap_or_else(|| event.title.clone());
    let memo = args
        .memo
        .clone()
        .or_else(|| event.memo.clone())
        .unwrap_or_default();

    Ok(CompositionRequest::from_selector(&event.id, &selector)
        .with_style(style)
        .with_title(title, show_title)
        .with_memo(memo, show_memo)
        .with_frame(!args.no_frame))
}

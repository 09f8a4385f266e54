mod api;


use clap::{Args, Parser, Subcommand};
use layout::consts::{DEFAULT_GRID_SIZE, LAYOUT_ID};
use layout::doc::{Block, BlockKind, Layout};
use layout::error::EditError;
use layout::repo::{LayoutRepository, PersistenceError};
use layout::store::{LayoutStore, StageConfig};

use crate::api::HttpRooms;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("{0}")]
    Persistence(#[from] PersistenceError),
    #[error("edit rejected: {0}")]
    Edit(#[from] EditError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "seatplan", about = "Seat planner layout editor")]
struct Cli {
    #[arg(long, env = "SEATPLAN_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "SEATPLAN_GRID_SIZE", default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Print the blocks of a layout.
    ///
    /// Without `--room` this reads the default layout, which the server
    /// creates and stores on first access.
    Show {
        #[command(flatten)]
        target: Target,
        /// Print the raw layout document instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List or fetch stored rooms.
    Rooms(RoomsCommand),
    /// Place a seat centred on the snapped point.
    #[command(allow_negative_numbers = true)]
    AddSeat {
        x: f64,
        y: f64,
        #[command(flatten)]
        target: Target,
    },
    /// Place an employee marker centred on the snapped point.
    #[command(allow_negative_numbers = true)]
    AddEmployee {
        x: f64,
        y: f64,
        #[command(flatten)]
        target: Target,
    },
    /// Seat a new employee on the free seat nearest to the point.
    #[command(allow_negative_numbers = true)]
    Assign {
        x: f64,
        y: f64,
        #[command(flatten)]
        target: Target,
    },
    /// Move a block's top-left corner to the snapped point.
    #[command(allow_negative_numbers = true)]
    Move {
        id: String,
        x: f64,
        y: f64,
        #[command(flatten)]
        target: Target,
    },
    /// Remove a block.
    Delete {
        id: String,
        #[command(flatten)]
        target: Target,
    },
    /// Change a block's label.
    Rename {
        id: String,
        label: String,
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct Target {
    /// Named room to edit instead of the default layout.
    #[arg(long)]
    room: Option<String>,
}

#[derive(Args, Debug)]
struct RoomsCommand {
    #[command(subcommand)]
    command: Option<RoomsSubcommand>,
}

#[derive(Subcommand, Debug)]
enum RoomsSubcommand {
    /// List every stored room.
    List,
    /// Print one room as JSON.
    ///
    /// The id `layout` names the default layout, which the server creates
    /// and stores on first access.
    Get { id: String },
}

/// A single edit applied to a freshly loaded session.
#[derive(Debug, Clone, PartialEq)]
enum Edit {
    Add { x: f64, y: f64, kind: BlockKind },
    Assign { x: f64, y: f64 },
    Move { id: String, x: f64, y: f64 },
    Delete { id: String },
    Rename { id: String, label: String },
}

impl Edit {
    fn apply(self, store: &mut LayoutStore) -> Result<Block, EditError> {
        match self {
            Self::Add { x, y, kind } => store.add_block(x, y, kind),
            Self::Assign { x, y } => store.place_employee_nearest(x, y),
            Self::Move { id, x, y } => store.move_block(&id, x, y),
            Self::Delete { id } => store.delete_block(&id),
            Self::Rename { id, label } => store.rename_block(&id, label),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let rooms = HttpRooms::new(&cli.base_url).map_err(CliError::InvalidBaseUrl)?;

    match cli.command {
        Command::Ping => {
            rooms.ping().await?;
            println!("ok");
            Ok(())
        }
        Command::Show { target, json } => run_show(&rooms, &target, json).await,
        Command::Rooms(command) => run_rooms(&rooms, command).await,
        Command::AddSeat { x, y, target } => {
            run_edit(&rooms, cli.grid_size, &target, Edit::Add { x, y, kind: BlockKind::Slot }).await
        }
        Command::AddEmployee { x, y, target } => {
            run_edit(&rooms, cli.grid_size, &target, Edit::Add { x, y, kind: BlockKind::Employee }).await
        }
        Command::Assign { x, y, target } => run_edit(&rooms, cli.grid_size, &target, Edit::Assign { x, y }).await,
        Command::Move { id, x, y, target } => {
            run_edit(&rooms, cli.grid_size, &target, Edit::Move { id, x, y }).await
        }
        Command::Delete { id, target } => run_edit(&rooms, cli.grid_size, &target, Edit::Delete { id }).await,
        Command::Rename { id, label, target } => {
            run_edit(&rooms, cli.grid_size, &target, Edit::Rename { id, label }).await
        }
    }
}

async fn run_show(rooms: &HttpRooms, target: &Target, json: bool) -> Result<(), CliError> {
    let id = target.room.as_deref().unwrap_or(LAYOUT_ID);
    let Some(layout) = rooms.read_layout(id).await? else {
        return Err(PersistenceError::Status { status: 404, message: format!("room not found: {id}") }.into());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        print!("{}", render_layout(&layout));
    }
    Ok(())
}

async fn run_rooms(rooms: &HttpRooms, command: RoomsCommand) -> Result<(), CliError> {
    match command.command.unwrap_or(RoomsSubcommand::List) {
        RoomsSubcommand::List => {
            for room in rooms.list_layouts().await? {
                println!("{}\t{}\t{} blocks", room.id, room.name, room.blocks.len());
            }
            Ok(())
        }
        RoomsSubcommand::Get { id } => {
            let Some(room) = rooms.read_layout(&id).await? else {
                return Err(PersistenceError::Status { status: 404, message: format!("room not found: {id}") }.into());
            };
            println!("{}", serde_json::to_string_pretty(&room)?);
            Ok(())
        }
    }
}

/// Load the target layout, apply one edit in edit mode, and save it back.
async fn run_edit(rooms: &dyn LayoutRepository, grid_size: f64, target: &Target, edit: Edit) -> Result<(), CliError> {
    let block = apply_edit(rooms, grid_size, target, edit).await?;
    println!("{}", render_block(&block));
    Ok(())
}

async fn apply_edit(
    rooms: &dyn LayoutRepository,
    grid_size: f64,
    target: &Target,
    edit: Edit,
) -> Result<Block, CliError> {
    let mut store = LayoutStore::with_grid_size(grid_size, StageConfig::default())?;
    let block = match &target.room {
        None => {
            store.load_layout(rooms).await?;
            store.toggle_edit_mode();
            let block = edit.apply(&mut store)?;
            store.save_layout(rooms).await?;
            block
        }
        Some(id) => {
            let name = store.load_room(rooms, id).await?.unwrap_or_else(|| id.clone());
            store.toggle_edit_mode();
            let block = edit.apply(&mut store)?;
            store.save_room(rooms, id, &name).await?;
            block
        }
    };
    Ok(block)
}

fn render_block(block: &Block) -> String {
    format!(
        "{}\t{}\t{}\t({}, {})\t{}x{}",
        block.id, block.kind, block.label, block.x, block.y, block.width, block.height
    )
}

fn render_layout(layout: &Layout) -> String {
    let mut out = format!(
        "{} ({}): {} seats, {} employees\n",
        layout.name,
        layout.id,
        layout.count_of(BlockKind::Slot),
        layout.count_of(BlockKind::Employee),
    );
    for block in &layout.blocks {
        out.push_str(&render_block(block));
        out.push('\n');
    }
    out
}

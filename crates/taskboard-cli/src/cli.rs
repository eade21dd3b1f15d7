use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_domain::{BoardId, ColumnId, TagId, TaskId};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A terminal client for a remote task board", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Base URL of the board service (or set TASKBOARD_API_URL)
    #[arg(long, global = true, value_name = "URL", env = "TASKBOARD_API_URL")]
    pub api_url: Option<String>,

    /// Where the session token is kept (or set TASKBOARD_CREDENTIALS)
    #[arg(long, global = true, value_name = "FILE", env = "TASKBOARD_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Board operations
    Board(BoardCommand),
    /// Inbox operations
    Inbox(InboxCommand),
    /// List (column) operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List all boards
    List,
    /// Show a board with its lists and tasks
    Show {
        #[arg(long)]
        id: BoardId,
    },
    /// Create a new board
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Rename a board
    Rename {
        #[arg(long)]
        id: BoardId,
        #[arg(long)]
        name: String,
    },
}

// Inbox commands
#[derive(Args)]
pub struct InboxCommand {
    #[command(subcommand)]
    pub action: InboxAction,
}

#[derive(Subcommand)]
pub enum InboxAction {
    /// Show the inbox and its tasks
    Show,
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Add a list to a board
    Create {
        #[arg(long)]
        board_id: BoardId,
        #[arg(long)]
        name: String,
    },
    /// Rename a list
    Rename {
        #[arg(long)]
        board_id: BoardId,
        #[arg(long)]
        id: ColumnId,
        #[arg(long)]
        name: String,
    },
    /// Delete a list and its tasks
    Delete {
        #[arg(long)]
        board_id: BoardId,
        #[arg(long)]
        id: ColumnId,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

/// Which list a task lives in: a board list, or the inbox.
#[derive(Args, Clone, Copy)]
pub struct TaskTarget {
    #[arg(long, required_unless_present = "inbox", conflicts_with = "inbox")]
    pub board_id: Option<BoardId>,
    /// Use the inbox instead of a board
    #[arg(long)]
    pub inbox: bool,
    /// Defaults to the inbox list when --inbox is given
    #[arg(long)]
    pub column_id: Option<ColumnId>,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task at the end of a list
    Create {
        #[command(flatten)]
        target: TaskTarget,
        #[arg(long)]
        name: String,
    },
    /// Update a task
    Update(TaskUpdateArgs),
    /// Delete a task
    Delete {
        #[command(flatten)]
        target: TaskTarget,
        #[arg(long)]
        id: TaskId,
    },
    /// Mark a task as done
    Done {
        #[command(flatten)]
        target: TaskTarget,
        #[arg(long)]
        id: TaskId,
    },
    /// Mark a task as not done
    Undone {
        #[command(flatten)]
        target: TaskTarget,
        #[arg(long)]
        id: TaskId,
    },
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[command(flatten)]
    pub target: TaskTarget,
    #[arg(long)]
    pub id: TaskId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    #[arg(long)]
    pub clear_due: bool,
    /// Flip a board tag on or off; repeatable
    #[arg(long = "toggle-tag", value_name = "TAG_ID")]
    pub toggle_tags: Vec<TagId>,
}

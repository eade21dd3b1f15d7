mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use taskboard_core::logging;
use taskboard_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let interactive = cli.command.is_none();
    let log_target = logging::LogTarget::select(logging::debug_log_from_env(), interactive);
    logging::init(&log_target)?;

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "taskboard", &mut std::io::stdout());
        return Ok(());
    }

    let mut ctx = match CliContext::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&e.to_string()),
    };

    match cli.command {
        None => {
            let mut app = App::new(ctx.auth, &ctx.config);
            app.run().await?;
        }
        Some(cmd) => {
            if let Err(e) = dispatch(&mut ctx, cmd).await {
                tracing::debug!("Command failed: {:#}", e);
                output::output_error(&e.to_string());
            }
        }
    }

    Ok(())
}

async fn dispatch(ctx: &mut CliContext, cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Login { username, password } => {
            handlers::auth::handle_login(ctx, &username, &password).await
        }
        Commands::Register {
            email,
            username,
            password,
        } => handlers::auth::handle_register(ctx, &email, &username, &password).await,
        Commands::Logout => handlers::auth::handle_logout(ctx),
        Commands::Whoami => handlers::auth::handle_whoami(ctx).await,
        Commands::Board(board_cmd) => handlers::board::handle(ctx, board_cmd.action).await,
        Commands::Inbox(inbox_cmd) => handlers::board::handle_inbox(ctx, inbox_cmd.action).await,
        Commands::Column(column_cmd) => handlers::column::handle(ctx, column_cmd.action).await,
        Commands::Task(task_cmd) => handlers::task::handle(ctx, task_cmd.action).await,
        Commands::Completions { .. } => Ok(()),
    }
}

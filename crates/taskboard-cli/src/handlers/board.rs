use crate::cli::{BoardAction, InboxAction};
use crate::context::CliContext;
use crate::output;
use taskboard_client::BoardDirectory;

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::List => {
            let directory = BoardDirectory::load(ctx.api()).await?;
            output::output_list(directory.boards().to_vec());
        }
        BoardAction::Show { id } => {
            let session = ctx.board(id).await?;
            output::output_success(session.snapshot());
        }
        BoardAction::Create { name, image_url } => {
            let mut directory = BoardDirectory::new(ctx.api());
            let board = directory.create(&name, image_url).await?;
            output::output_success(board);
        }
        BoardAction::Rename { id, name } => {
            let mut session = ctx.board(id).await?;
            session.rename_board(&name).await?;
            output::output_success(session.snapshot());
        }
    }
    Ok(())
}

pub async fn handle_inbox(ctx: &mut CliContext, action: InboxAction) -> anyhow::Result<()> {
    match action {
        InboxAction::Show => {
            let session = ctx.inbox().await?;
            output::output_success(session.snapshot());
        }
    }
    Ok(())
}

use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use taskboard_client::BoardSession;
use taskboard_domain::ColumnId;

fn column_output(session: &BoardSession, column_id: ColumnId) {
    match session.snapshot().column(column_id) {
        Some(column) => output::output_success(column),
        None => output::output_error(&format!("List not found: {}", column_id)),
    }
}

pub async fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Create { board_id, name } => {
            let mut session = ctx.board(board_id).await?;
            let column_id = session.create_column(&name).await?;
            column_output(&session, column_id);
        }
        ColumnAction::Rename { board_id, id, name } => {
            let mut session = ctx.board(board_id).await?;
            session.rename_column(id, &name).await?;
            column_output(&session, id);
        }
        ColumnAction::Delete { board_id, id } => {
            let mut session = ctx.board(board_id).await?;
            session.delete_column(id).await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
    }
    Ok(())
}

use crate::context::CliContext;
use crate::output;

pub async fn handle_login(
    ctx: &mut CliContext,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let user = ctx.auth.login(username, password).await?;
    output::output_success(user);
    Ok(())
}

pub async fn handle_register(
    ctx: &CliContext,
    email: &str,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    ctx.auth.register(email, username, password).await?;
    output::output_success(serde_json::json!({ "registered": username.trim() }));
    Ok(())
}

pub fn handle_logout(ctx: &mut CliContext) -> anyhow::Result<()> {
    ctx.auth.teardown()?;
    output::output_success(serde_json::json!({ "logged_out": true }));
    Ok(())
}

pub async fn handle_whoami(ctx: &mut CliContext) -> anyhow::Result<()> {
    ctx.auth.initialize().await?;
    match ctx.auth.user() {
        Some(user) => output::output_success(user),
        None => output::output_error("Not logged in"),
    }
    Ok(())
}

use super::Context;

pub async fn login(ctx: &Context, credential: &str) -> anyhow::Result<()> {
    let session = ctx.client.auth().login_with_google(credential).await?;
    println!("Signed in as {} <{}>", session.user.name, session.user.email);
    if session.user.is_admin() {
        println!("Role: admin");
    }
    if ctx.client.config().data_dir.is_none() {
        println!("Note: TAVOLA_DATA_DIR is unset, the session ends with this process");
    }
    Ok(())
}

pub fn logout(ctx: &Context) -> anyhow::Result<()> {
    ctx.client.auth().logout()?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> anyhow::Result<()> {
    if !ctx.client.is_authenticated() {
        println!("Not signed in");
        return Ok(());
    }
    let user = ctx.client.auth().me().await?;
    println!("{} <{}> ({})", user.name, user.email, user.role);
    Ok(())
}

//! Command handlers

mod account;
mod branches;
mod cart;
mod menu;
mod reports;
mod reservations;

use tavola_client::{NetworkHttpClient, TavolaClient};

use crate::cli::Command;

pub type Client = TavolaClient<NetworkHttpClient>;

/// What every handler gets
pub struct Context {
    pub client: Client,
    pub currency: String,
}

impl Context {
    pub fn page_size(&self) -> u32 {
        self.client.config().page_size
    }

    /// Admin-only commands bail out early without a session
    pub fn require_admin(&self) -> anyhow::Result<()> {
        if !self.client.is_authenticated() {
            anyhow::bail!("Not signed in; run `tavola login` first");
        }
        if !self.client.auth().is_admin() {
            anyhow::bail!("This command needs an admin account");
        }
        Ok(())
    }
}

pub async fn run(command: Command, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Command::Login { google_credential } => account::login(ctx, &google_credential).await,
        Command::Logout => account::logout(ctx),
        Command::Whoami => account::whoami(ctx).await,
        Command::Branches { action } => branches::run(ctx, action).await,
        Command::Menu(args) => menu::list(ctx, args).await,
        Command::Meals { action } => menu::run_admin(ctx, action).await,
        Command::Cart { action } => cart::run(ctx, action).await,
        Command::Reserve(args) => reservations::reserve(ctx, args).await,
        Command::Reservations { action } => reservations::run(ctx, action).await,
        Command::Report(args) => reports::report(ctx, args).await,
        Command::Dashboard { once } => reports::dashboard(ctx, once).await,
        Command::Page { slug } => reports::page(ctx, &slug).await,
        Command::Checkout {
            cart_id,
            reservation_id,
        } => reports::checkout(ctx, cart_id, reservation_id).await,
    }
}

//! Command-line schema

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shared::models::{GroupBy, MealCategory, ReservationAction, ReservationStatus};
use tavola_client::views::BranchField;

#[derive(Debug, Parser)]
#[command(name = "tavola", version, about = "Restaurant storefront and admin client")]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "TAVOLA_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the saved session
    #[arg(long, global = true, env = "TAVOLA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Currency symbol for amounts
    #[arg(long, global = true, env = "TAVOLA_CURRENCY", default_value = "EGP")]
    pub currency: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with a Google ID token
    Login {
        #[arg(long)]
        google_credential: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage branches
    Branches {
        #[command(subcommand)]
        action: BranchCommand,
    },
    /// Browse the menu
    Menu(MenuArgs),
    /// Switch meals on or off
    Meals {
        #[command(subcommand)]
        action: MealCommand,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Book a table
    Reserve(ReserveArgs),
    /// Manage reservations
    Reservations {
        #[command(subcommand)]
        action: ReservationCommand,
    },
    /// Profit and loss report
    Report(ReportArgs),
    /// Headline figures, refreshed periodically
    Dashboard {
        /// Print once and exit
        #[arg(long)]
        once: bool,
    },
    /// Show a CMS page
    Page { slug: String },
    /// Start a hosted checkout and print the payment URL
    Checkout {
        #[arg(long, required_unless_present = "reservation_id")]
        cart_id: Option<i64>,
        #[arg(long)]
        reservation_id: Option<i64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BranchCommand {
    List {
        /// Filter the page by name, city or address
        #[arg(long)]
        search: Option<String>,
        /// Match --search against one field only: name, city or address
        #[arg(long, requires = "search")]
        search_field: Option<BranchField>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Flip the active flag
    Toggle { id: i64 },
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct MenuArgs {
    #[arg(long)]
    pub category: Option<MealCategory>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub tag: Option<i64>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Include meals that are switched off
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Subcommand)]
pub enum MealCommand {
    /// Flip availability of one meal
    Toggle { id: i64 },
    /// Set availability of several meals
    Availability {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Switch off instead of on
        #[arg(long)]
        off: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    Show,
    Add {
        meal_id: i64,
        #[arg(default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity; 0 removes it
    Set { item_id: i64, quantity: u32 },
    /// One more of a line
    Inc { item_id: i64 },
    /// One less of a line; the last unit removes it
    Dec { item_id: i64 },
    Remove { item_id: i64 },
    Clear,
}

#[derive(Debug, Args)]
pub struct ReserveArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// HH:MM
    #[arg(long)]
    pub start: String,
    /// HH:MM
    #[arg(long)]
    pub end: String,
    #[arg(long)]
    pub party: u32,
    #[arg(long)]
    pub branch_id: Option<i64>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Only check availability
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Subcommand)]
pub enum ReservationCommand {
    List {
        #[arg(long)]
        status: Option<ReservationStatus>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Apply confirm, reject, cancel, complete or no-show
    Act {
        id: i64,
        action: ReservationAction,
    },
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Defaults to six days before --to
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Defaults to today
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long, default_value = "day")]
    pub group_by: GroupBy,
}

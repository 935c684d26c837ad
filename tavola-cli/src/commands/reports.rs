use shared::models::{CheckoutRequest, DashboardStats, DateRange};
use shared::util::today;
use tavola_client::DashboardPoller;

use super::Context;
use crate::cli::ReportArgs;
use crate::output::{Table, money};

pub async fn report(ctx: &Context, args: ReportArgs) -> anyhow::Result<()> {
    ctx.require_admin()?;
    let to = args.to.unwrap_or_else(today);
    let range = match args.from {
        Some(from) => DateRange::new(from, to),
        None => DateRange::last_7_days(to),
    };

    let overview = ctx.client.analytics().overview(range, args.group_by).await?;
    let summary = &overview.summary;
    let currency = ctx.currency.as_str();

    println!("{} to {} by {}", range.from, range.to, overview.group_by);
    println!("Revenue:  {}", money(summary.revenue, currency));
    println!("Expenses: {}", money(summary.expenses, currency));
    println!("Profit:   {}", money(summary.profit, currency));
    if let Some(margin) = summary.margin_percent() {
        println!("Margin:   {margin:.1}%");
    }
    println!();

    let mut table = Table::new(&["PERIOD", "REVENUE", "EXPENSES", "PROFIT"]);
    for point in &overview.chart {
        table.row(vec![
            point.label.clone(),
            money(point.revenue, currency),
            money(point.expenses, currency),
            money(point.profit, currency),
        ]);
    }
    table.print();
    Ok(())
}

fn print_stats(stats: &DashboardStats, currency: &str) {
    println!(
        "Today: {} reservations ({} pending), revenue {}, {} active branches",
        stats.today_reservations,
        stats.pending_reservations,
        money(stats.today_revenue, currency),
        stats.active_branches
    );
}

pub async fn dashboard(ctx: &Context, once: bool) -> anyhow::Result<()> {
    ctx.require_admin()?;
    if once {
        let stats = ctx.client.analytics().dashboard().await?;
        print_stats(&stats, &ctx.currency);
        return Ok(());
    }

    let poller = DashboardPoller::spawn(&ctx.client);
    let mut updates = poller.subscribe();
    println!("Refreshing every {:?}; Ctrl-C to stop", ctx.client.config().dashboard_poll_interval);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if state.loading {
                    continue;
                }
                if let Some(error) = &state.error {
                    eprintln!("refresh failed: {error}");
                }
                if let Some(stats) = &state.data {
                    print_stats(stats, &ctx.currency);
                }
            }
        }
    }

    poller.stop().await;
    Ok(())
}

pub async fn page(ctx: &Context, slug: &str) -> anyhow::Result<()> {
    let page = ctx.client.pages().get(slug).await?;
    println!("{}", page.title);
    println!("{}", "=".repeat(page.title.chars().count()));
    if !page.content.is_empty() {
        println!("{}", page.content);
    }
    if let Some(rating) = page.average_rating() {
        println!();
        println!("Rated {rating:.1}/5 from {} reviews", page.reviews.len());
    }
    if !page.chefs.is_empty() {
        let mut table = Table::new(&["CHEF", "ROLE"]);
        for chef in &page.chefs {
            table.row(vec![chef.name.clone(), chef.role.clone()]);
        }
        println!();
        table.print();
    }
    Ok(())
}

pub async fn checkout(
    ctx: &Context,
    cart_id: Option<i64>,
    reservation_id: Option<i64>,
) -> anyhow::Result<()> {
    let request = CheckoutRequest {
        cart_id,
        reservation_id,
        ..Default::default()
    };
    let redirect = ctx.client.payments().create_checkout_session(&request).await?;
    println!("Checkout session {}", redirect.session_id);
    println!("Pay at: {}", redirect.url);
    Ok(())
}

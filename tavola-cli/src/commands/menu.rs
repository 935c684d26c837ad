use shared::ListQuery;
use shared::models::MealQuery;
use tavola_client::views::MenuAdmin;

use super::Context;
use crate::cli::{MealCommand, MenuArgs};
use crate::output::{Table, money, pager, yes_no};

pub async fn list(ctx: &Context, args: MenuArgs) -> anyhow::Result<()> {
    let mut list = ListQuery::new().paginate(args.page, ctx.page_size());
    if let Some(text) = args.search.as_deref() {
        list = list.search(text);
    }
    let mut query = MealQuery::new(list);
    if let Some(category) = args.category {
        query = query.category(category);
    }
    if let Some(tag_id) = args.tag {
        query = query.tag(tag_id);
    }
    if !args.all {
        query = query.available_only();
    }

    let meals = ctx.client.meals().list(&query).await?;
    let mut table = Table::new(&["ID", "TITLE", "CATEGORY", "PRICE", "AVAILABLE", "TAGS"]);
    for meal in &meals.items {
        let tags = meal
            .tags
            .iter()
            .map(|t| t.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.row(vec![
            meal.id.to_string(),
            meal.title.clone(),
            meal.category.to_string(),
            money(meal.price, &ctx.currency),
            yes_no(meal.is_available).to_string(),
            tags,
        ]);
    }
    table.print();
    println!("{}", pager(&meals));
    Ok(())
}

pub async fn run_admin(ctx: &Context, action: MealCommand) -> anyhow::Result<()> {
    ctx.require_admin()?;
    let mut admin = MenuAdmin::new(ctx.client.meals(), ctx.page_size());

    match action {
        MealCommand::Toggle { id } => {
            let meal = admin.toggle_availability(id).await?;
            let status = if meal.is_available { "available" } else { "unavailable" };
            println!("Meal #{} {} is now {status}", meal.id, meal.title);
        }
        MealCommand::Availability { ids, off } => {
            let outcome = admin.set_availability_bulk(&ids, !off).await;
            println!("{}", outcome.summary());
            for (id, reason) in &outcome.failed {
                println!("  meal #{id}: {reason}");
            }
            if !outcome.is_complete() {
                anyhow::bail!("{} of {} meals failed", outcome.failed.len(), ids.len());
            }
        }
    }
    Ok(())
}

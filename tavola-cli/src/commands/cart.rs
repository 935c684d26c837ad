use shared::models::Cart;

use super::Context;
use crate::cli::CartCommand;
use crate::output::{Table, money};

pub async fn run(ctx: &Context, action: CartCommand) -> anyhow::Result<()> {
    if !ctx.client.is_authenticated() {
        anyhow::bail!("Not signed in; run `tavola login` first");
    }
    let cart = ctx.client.cart();

    let updated = match action {
        CartCommand::Show => cart.get().await?,
        CartCommand::Add { meal_id, quantity } => cart.add_item(meal_id, quantity).await?,
        CartCommand::Set { item_id, quantity } => cart.set_quantity(item_id, quantity).await?,
        CartCommand::Inc { item_id } => cart.increment(item_id).await?,
        CartCommand::Dec { item_id } => cart.decrement(item_id).await?,
        CartCommand::Remove { item_id } => cart.remove_item(item_id).await?,
        CartCommand::Clear => {
            cart.clear().await?;
            println!("Cart cleared");
            return Ok(());
        }
    };

    print_cart(&updated, &ctx.currency);
    Ok(())
}

fn print_cart(cart: &Cart, currency: &str) {
    let mut table = Table::new(&["ITEM", "MEAL", "QTY", "PRICE", "TOTAL"]);
    for item in &cart.items {
        table.row(vec![
            item.id.to_string(),
            item.meal.title.clone(),
            item.quantity.to_string(),
            money(item.meal.price, currency),
            money(item.line_total, currency),
        ]);
    }
    table.print();
    println!();
    println!("Items:    {}", cart.item_count());
    println!("Subtotal: {}", money(cart.subtotal, currency));
    println!("Tax:      {}", money(cart.tax, currency));
    println!("Total:    {}", money(cart.total, currency));
}

use shared::ListQuery;
use shared::models::BranchCreate;
use tavola_client::views::{BranchAdmin, ListView};

use super::Context;
use crate::cli::BranchCommand;
use crate::output::{Table, pager, yes_no};

pub async fn run(ctx: &Context, action: BranchCommand) -> anyhow::Result<()> {
    let mut admin = BranchAdmin::new(ctx.client.branches(), ctx.page_size());

    match action {
        BranchCommand::List {
            search,
            search_field,
            page,
        } => {
            let query = ListQuery::new().paginate(page, ctx.page_size());
            let mut view = ListView::new(ctx.client.branches(), ctx.page_size()).with_query(query);
            let state = view.load().await;
            if let Some(error) = &state.error {
                anyhow::bail!("{error}");
            }
            if let Some(text) = search {
                view.set_search(text);
                view.set_search_field(search_field.map(|f| f.accessor()));
            }

            let mut table = Table::new(&["ID", "NAME", "CITY", "ADDRESS", "PHONE", "ACTIVE"]);
            for branch in view.visible() {
                table.row(vec![
                    branch.id.to_string(),
                    branch.name.clone(),
                    branch.city.clone(),
                    branch.address.clone(),
                    branch.phone.clone(),
                    yes_no(branch.is_active).to_string(),
                ]);
            }
            table.print();
            if let Some(page) = &view.state().data {
                println!("{}", pager(page));
            }
        }
        BranchCommand::Add {
            name,
            address,
            phone,
            city,
            state,
            country,
        } => {
            ctx.require_admin()?;
            let draft = BranchCreate {
                name,
                address,
                phone,
                city,
                state,
                country,
                ..Default::default()
            };
            let branch = admin.submit(&draft).await?;
            println!("Created branch #{} {}", branch.id, branch.name);
        }
        BranchCommand::Toggle { id } => {
            ctx.require_admin()?;
            let branch = admin.toggle_active(id).await?;
            let status = if branch.is_active { "active" } else { "inactive" };
            println!("Branch #{} {} is now {status}", branch.id, branch.name);
        }
        BranchCommand::Delete { id } => {
            ctx.require_admin()?;
            admin.delete(id).await?;
            println!("Deleted branch #{id}");
        }
    }
    Ok(())
}

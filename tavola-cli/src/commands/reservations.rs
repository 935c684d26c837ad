use shared::ListQuery;
use shared::Validate;
use shared::models::{AvailabilityQuery, ReservationCreate, ReservationQuery};
use shared::util::{relative_day_label, today};

use super::Context;
use crate::cli::{ReservationCommand, ReserveArgs};
use crate::output::{Table, pager};

pub async fn reserve(ctx: &Context, args: ReserveArgs) -> anyhow::Result<()> {
    let draft = ReservationCreate {
        branch_id: args.branch_id,
        customer_name: args.name,
        customer_phone: args.phone,
        date: args.date,
        start_time: args.start,
        end_time: args.end,
        party_size: args.party,
        notes: args.notes,
        ..Default::default()
    };
    draft.validate()?;

    let service = ctx.client.reservations();
    let availability = service
        .check_availability(&AvailabilityQuery::from_create(&draft))
        .await?;

    if !availability.available {
        println!(
            "{}",
            availability
                .message
                .as_deref()
                .unwrap_or("No table is free for that slot")
        );
        for slot in &availability.suggested_slots {
            println!("  try {} - {}", slot.start_time, slot.end_time);
        }
        anyhow::bail!("Slot unavailable");
    }

    let tables = availability
        .tables
        .iter()
        .map(|t| format!("#{} (seats {})", t.table_number, t.capacity))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Available tables: {tables}");
    if args.check {
        return Ok(());
    }

    let reservation = service.create(&draft).await?;
    println!(
        "Reservation #{} for {} on {} {}-{} is {}",
        reservation.id,
        reservation.party_size,
        reservation.date,
        reservation.start_time,
        reservation.end_time,
        reservation.status
    );
    Ok(())
}

pub async fn run(ctx: &Context, action: ReservationCommand) -> anyhow::Result<()> {
    ctx.require_admin()?;
    let service = ctx.client.reservations();

    match action {
        ReservationCommand::List {
            status,
            date,
            search,
            page,
        } => {
            let mut list = ListQuery::new().paginate(page, ctx.page_size());
            if let Some(text) = search.as_deref() {
                list = list.search(text);
            }
            let mut query = ReservationQuery::new(list);
            if let Some(status) = status {
                query = query.status(status);
            }
            if let Some(date) = date {
                query = query.date(date);
            }

            let reservations = service.list(&query).await?;
            let today = today();
            let mut table = Table::new(&["ID", "CUSTOMER", "PHONE", "DAY", "TIME", "PARTY", "TABLE", "STATUS"]);
            for r in &reservations.items {
                let day = chrono::NaiveDate::parse_from_str(&r.date, "%Y-%m-%d")
                    .map(|d| relative_day_label(d, today))
                    .unwrap_or_else(|_| r.date.clone());
                table.row(vec![
                    r.id.to_string(),
                    r.customer_name.clone(),
                    r.customer_phone.clone(),
                    day,
                    format!("{}-{}", r.start_time, r.end_time),
                    r.party_size.to_string(),
                    r.table_number.map(|t| t.to_string()).unwrap_or_default(),
                    r.status.to_string(),
                ]);
            }
            table.print();
            println!("{}", pager(&reservations));
        }
        ReservationCommand::Act { id, action } => {
            let reservation = service.get(id).await?;
            let updated = service.transition(&reservation, action).await?;
            println!(
                "Reservation #{} moved from {} to {}",
                updated.id, reservation.status, updated.status
            );
        }
    }
    Ok(())
}

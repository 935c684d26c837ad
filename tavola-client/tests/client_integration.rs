// tavola-client/tests/client_integration.rs
// End-to-end flows against the in-process mock backend

mod common;

use std::time::Duration;

use axum::http::Method;
use chrono::{Days, Local};
use serde_json::json;
use shared::ListQuery;
use shared::models::{
    BranchCreate, CheckoutRequest, GroupBy, DateRange, MealCategory, MealCreate, MealUpdate,
    PageCreate, PageUpdate, ReservationAction, ReservationCreate, ReservationStatus, TagCreate,
    TagUpdate,
};
use tavola_client::views::{BranchAdmin, BranchField, ListView, MenuAdmin};
use tavola_client::{ClientError, DashboardPoller, TavolaClient};

use common::{MockBackend, router, test_config};

fn downtown() -> BranchCreate {
    BranchCreate {
        name: "Downtown".into(),
        address: "123 Main St".into(),
        phone: "+20100000000".into(),
        city: "Cairo".into(),
        ..Default::default()
    }
}

// ── Branches ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_branch_posts_once_then_refreshes_list() {
    let backend = MockBackend::new();
    let mut admin = BranchAdmin::new(backend.client.branches(), 10);
    admin.list_mut().load().await;
    backend.clear_requests();

    let branch = admin.submit(&downtown()).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 2, "{requests:?}");
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/branches");
    assert_eq!(
        requests[0].body,
        Some(json!({
            "name": "Downtown",
            "address": "123 Main St",
            "phone": "+20100000000",
            "city": "Cairo"
        }))
    );
    assert_eq!(requests[1].method, Method::GET);
    assert_eq!(requests[1].path, "/branches");

    assert!(admin.form_error().is_none());
    assert!(admin.list().find(branch.id).is_some());
}

#[tokio::test]
async fn test_blank_required_field_sends_nothing() {
    let backend = MockBackend::new();
    let mut admin = BranchAdmin::new(backend.client.branches(), 10);

    let cases = [
        (BranchCreate { name: " ".into(), ..downtown() }, "name is required"),
        (BranchCreate { address: String::new(), ..downtown() }, "address is required"),
        (BranchCreate { phone: String::new(), ..downtown() }, "phone is required"),
        (BranchCreate { city: String::new(), ..downtown() }, "city is required"),
    ];

    for (draft, message) in cases {
        let err = admin.submit(&draft).await.unwrap_err();
        assert!(err.is_validation(), "{err:?}");
        assert_eq!(admin.form_error(), Some(message));
    }
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_search_filters_loaded_rows_case_insensitively() {
    let backend = MockBackend::new();
    backend.seed_branch("Downtown", "Cairo", true);
    backend.seed_branch("Corniche", "Alexandria", true);
    backend.seed_branch("Zamalek", "cairo", false);
    backend.seed_branch("Fifth Settlement", "New Cairo", true);

    let mut admin = BranchAdmin::new(backend.client.branches(), 10);
    admin.list_mut().load().await;
    admin.list_mut().set_search("Cairo");

    let names: Vec<&str> = admin
        .list()
        .visible()
        .iter()
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(names, vec!["Downtown", "Zamalek", "Fifth Settlement"]);
}

#[tokio::test]
async fn test_search_field_narrows_to_city() {
    let backend = MockBackend::new();
    backend.seed_branch("Cairo Mall", "Giza", true);
    let downtown = backend.seed_branch("Downtown", "Cairo", true);

    let mut view = ListView::new(backend.client.branches(), 10);
    view.load().await;
    view.set_search("cairo");
    assert_eq!(view.visible().len(), 2);

    view.set_search_field(Some(BranchField::City.accessor()));
    let ids: Vec<i64> = view.visible().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![downtown]);

    view.set_search_field(None);
    assert_eq!(view.visible().len(), 2);
}

#[tokio::test]
async fn test_delete_accepts_confirmation_payload() {
    let backend = MockBackend::new();
    let keep = backend.seed_branch("Downtown", "Cairo", true);
    let gone = backend.seed_branch("Corniche", "Alexandria", true);
    let mut admin = BranchAdmin::new(backend.client.branches(), 10);
    admin.list_mut().load().await;
    backend.clear_requests();

    admin.delete(gone).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].path, format!("/branches/{gone}"));
    assert_eq!(requests[1].method, Method::GET);
    assert!(admin.list().find(gone).is_none());
    assert!(admin.list().find(keep).is_some());
}

#[tokio::test]
async fn test_toggle_active_updates_row_in_place() {
    let backend = MockBackend::new();
    backend.seed_branch("Downtown", "Cairo", true);
    let target = backend.seed_branch("Maadi", "Cairo", true);

    let mut admin = BranchAdmin::new(backend.client.branches(), 10);
    admin.list_mut().load().await;
    backend.clear_requests();

    let branch = admin.toggle_active(target).await.unwrap();
    assert!(!branch.is_active);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1, "no list reload expected: {requests:?}");
    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(requests[0].path, format!("/branches/{target}/status"));
    assert_eq!(requests[0].body, Some(json!({ "isActive": false })));

    assert!(!admin.list().find(target).unwrap().is_active);
    assert_eq!(admin.list().items().len(), 2);
}

#[tokio::test]
async fn test_pagination_controls_follow_total_pages() {
    let backend = MockBackend::new();
    for i in 0..25 {
        backend.seed_branch(&format!("Branch {i}"), "Giza", true);
    }

    let mut admin = BranchAdmin::new(backend.client.branches(), 10);
    admin.list_mut().load().await;

    let control = admin.list().page_control().unwrap();
    assert_eq!(control.buttons().count(), 3);
    assert!(control.prev_disabled);
    assert!(!control.next_disabled);

    admin.list_mut().go_to_page(3).await;
    let control = admin.list().page_control().unwrap();
    assert_eq!(control.current, 3);
    assert!(control.next_disabled);
    assert!(!control.prev_disabled);
    assert_eq!(admin.list().items().len(), 5);

    backend.clear_requests();
    admin.list_mut().go_to_page(9).await;
    admin.list_mut().next_page().await;
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_list_is_cached_until_invalidated() {
    let backend = MockBackend::new();
    backend.seed_branch("Downtown", "Cairo", true);
    let branches = backend.client.branches();
    let query = ListQuery::new();

    branches.list(&query).await.unwrap();
    branches.list(&query).await.unwrap();
    assert_eq!(backend.calls(Method::GET).len(), 1);

    branches.create(&downtown()).await.unwrap();
    let page = branches.list(&query).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(backend.calls(Method::GET).len(), 2);
}

#[tokio::test]
async fn test_reads_retry_on_server_errors() {
    let backend = MockBackend::new();
    let id = backend.seed_branch("Downtown", "Cairo", true);
    *backend.state.fail_next.lock().unwrap() = 2;

    let branch = backend.client.branches().get(id).await.unwrap();
    assert_eq!(branch.name, "Downtown");
    assert_eq!(backend.calls(Method::GET).len(), 3);
}

#[tokio::test]
async fn test_mutations_are_not_retried() {
    let backend = MockBackend::new();
    *backend.state.fail_next.lock().unwrap() = 1;

    let err = backend.client.branches().create(&downtown()).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.display_message(), "Service unavailable");
    assert_eq!(backend.requests().len(), 1);
}

// ── Menu ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_meal_availability_in_place() {
    let backend = MockBackend::new();
    let meal_id = backend.seed_meal("Molokhia", 85.0);

    let mut admin = MenuAdmin::new(backend.client.meals(), 10);
    admin.list_mut().load().await;
    backend.clear_requests();

    let meal = admin.toggle_availability(meal_id).await.unwrap();
    assert!(!meal.is_available);
    assert_eq!(backend.requests().len(), 1);
    assert!(!admin.list().find(meal_id).unwrap().is_available);
}

#[tokio::test]
async fn test_bulk_availability_reports_partial_failure() {
    let backend = MockBackend::new();
    let a = backend.seed_meal("Fatta", 120.0);
    let b = backend.seed_meal("Hawawshi", 70.0);

    let outcome = backend
        .client
        .meals()
        .bulk_set_availability(&[a, 999, b], false)
        .await;

    assert_eq!(outcome.succeeded.len(), 2);
    assert_eq!(outcome.failed, vec![(999, "Meal not found".to_string())]);
    assert_eq!(outcome.summary(), "2 updated, 1 failed");
    assert_eq!(backend.calls(Method::PATCH).len(), 3);
}

// ── Cart ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_decrement_to_zero_deletes_the_line() {
    let backend = MockBackend::new();
    let meal_id = backend.seed_meal("Koshari", 60.0);
    let cart = backend.client.cart();

    let added = cart.add_item(meal_id, 1).await.unwrap();
    let item_id = added.items[0].id;

    let after = cart.decrement(item_id).await.unwrap();
    assert!(after.is_empty());

    let requests = backend.requests();
    let last = requests.last().unwrap();
    assert_eq!(last.method, Method::DELETE);
    assert_eq!(last.path, format!("/cart/items/{item_id}"));
    assert!(
        backend.calls(Method::PUT).is_empty(),
        "zero quantity must never be written"
    );
    assert_eq!(backend.client.cart_store().summary().item_count, 0);
}

#[tokio::test]
async fn test_quantity_changes_use_server_totals() {
    let backend = MockBackend::new();
    let meal_id = backend.seed_meal("Koshari", 60.0);
    let cart = backend.client.cart();

    let item_id = cart.add_item(meal_id, 1).await.unwrap().items[0].id;
    let updated = cart.increment(item_id).await.unwrap();
    assert_eq!(updated.items[0].quantity, 2);
    assert_eq!(updated.subtotal, 120.0);

    let puts = backend.calls(Method::PUT);
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].body, Some(json!({ "quantity": 2 })));

    let err = cart.set_quantity(item_id, 500).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(backend.calls(Method::PUT).len(), 1);

    assert_eq!(backend.client.cart_store().summary().item_count, 2);
}

// ── Reservations ────────────────────────────────────────────────────

#[tokio::test]
async fn test_transition_refuses_unoffered_action() {
    let backend = MockBackend::new();
    let id = backend.seed_reservation("completed");
    let reservations = backend.client.reservations();

    let reservation = reservations.get(id).await.unwrap();
    let err = reservations
        .transition(&reservation, ReservationAction::Confirm)
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(backend.calls(Method::PATCH).is_empty());
}

#[tokio::test]
async fn test_confirm_pending_reservation() {
    let backend = MockBackend::new();
    let id = backend.seed_reservation("pending");
    let reservations = backend.client.reservations();

    let reservation = reservations.get(id).await.unwrap();
    let confirmed = reservations
        .transition(&reservation, ReservationAction::Confirm)
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    let patch = &backend.calls(Method::PATCH)[0];
    assert_eq!(patch.path, format!("/reservations/{id}/confirm"));

    let no_show = reservations
        .transition(&confirmed, ReservationAction::NoShow)
        .await
        .unwrap();
    assert_eq!(no_show.status, ReservationStatus::NoShow);
    assert_eq!(
        backend.calls(Method::PATCH)[1].path,
        format!("/reservations/{id}/no-show")
    );
}

#[tokio::test]
async fn test_reservation_in_the_past_is_rejected_locally() {
    let backend = MockBackend::new();
    let yesterday = Local::now().date_naive() - Days::new(1);
    let draft = ReservationCreate {
        customer_name: "Omar".into(),
        customer_phone: "+20111111111".into(),
        date: yesterday.format("%Y-%m-%d").to_string(),
        start_time: "19:00".into(),
        end_time: "21:00".into(),
        party_size: 2,
        ..Default::default()
    };

    let err = backend.client.reservations().create(&draft).await.unwrap_err();
    assert!(err.is_validation());
    assert!(backend.requests().is_empty());

    let tomorrow = Local::now().date_naive() + Days::new(1);
    let draft = ReservationCreate {
        date: tomorrow.format("%Y-%m-%d").to_string(),
        ..draft
    };
    let created = backend.client.reservations().create(&draft).await.unwrap();
    assert_eq!(created.status, ReservationStatus::Pending);
}

// ── Tags ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_tag_lifecycle_refreshes_list() {
    let backend = MockBackend::new();
    let tags = backend.client.tags();
    assert!(tags.list().await.unwrap().is_empty());
    backend.clear_requests();

    let tag = tags
        .create(&TagCreate {
            title: "Vegan".into(),
            background_color: Some("#2E7D32".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(tag.title, "Vegan");
    assert_eq!(tag.background_color, "#2E7D32");
    let post = &backend.calls(Method::POST)[0];
    assert_eq!(post.path, "/tags");
    assert_eq!(
        post.body,
        Some(json!({ "title": "Vegan", "backgroundColor": "#2E7D32" }))
    );

    // Create invalidated the cached list
    let listed = tags.list().await.unwrap();
    assert_eq!(listed.len(), 1);

    let update = TagUpdate {
        title: Some("Plant based".into()),
        ..Default::default()
    };
    tags.update(tag.id, &update).await.unwrap();
    assert_eq!(backend.calls(Method::PUT)[0].path, format!("/tags/{}", tag.id));
    assert_eq!(tags.list().await.unwrap()[0].title, "Plant based");

    tags.delete(tag.id).await.unwrap();
    assert!(tags.list().await.unwrap().is_empty());
    assert_eq!(backend.calls(Method::GET).len(), 3);
}

#[tokio::test]
async fn test_tag_bad_color_sends_nothing() {
    let backend = MockBackend::new();
    let tags = backend.client.tags();

    let err = tags
        .create(&TagCreate {
            title: "Spicy".into(),
            text_color: Some("red".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err:?}");

    let err = tags
        .update(
            7,
            &TagUpdate {
                title: Some("  ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err:?}");
    assert!(backend.requests().is_empty());
}

// ── Pages ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_page_slug_change_moves_cached_entry() {
    let backend = MockBackend::new();
    backend.seed_page("about", "About us");
    let pages = backend.client.pages();

    assert_eq!(pages.get("about").await.unwrap().title, "About us");
    backend.clear_requests();

    let moved = pages
        .update(
            "about",
            &PageUpdate {
                slug: Some("our-story".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.slug, "our-story");
    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[0].path, "/pages/about");

    // Served from the moved cache entry
    assert_eq!(pages.get("our-story").await.unwrap().title, "About us");
    assert_eq!(backend.requests().len(), 1);

    let err = pages.get("about").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)), "{err:?}");

    pages.delete("our-story").await.unwrap();
    assert!(pages.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_page_create_and_invalid_slug() {
    let backend = MockBackend::new();
    let pages = backend.client.pages();

    let err = pages.get("About Us").await.unwrap_err();
    assert!(err.is_validation(), "{err:?}");
    let err = pages
        .create(&PageCreate {
            slug: "-menu".into(),
            title: "Menu".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err:?}");
    assert!(backend.requests().is_empty());

    let page = pages
        .create(&PageCreate {
            slug: "catering".into(),
            title: "Catering".into(),
            content: "Events of any size".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.slug, "catering");
    assert_eq!(backend.calls(Method::POST)[0].path, "/pages");

    let err = pages
        .create(&PageCreate {
            slug: "catering".into(),
            title: "Again".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.display_message(), "Slug already in use");
}

// ── Meal editing ────────────────────────────────────────────────────

fn soup() -> MealCreate {
    MealCreate {
        title: "Lentil soup".into(),
        description: Some("With crispy onions".into()),
        price: 65.0,
        image: None,
        category: MealCategory::Lunch,
        is_available: None,
        tag_ids: Vec::new(),
    }
}

#[tokio::test]
async fn test_meal_create_and_update_validate_first() {
    let backend = MockBackend::new();
    let meals = backend.client.meals();

    let invalid = [
        MealCreate { title: " ".into(), ..soup() },
        MealCreate { price: -1.0, ..soup() },
        MealCreate { price: f64::NAN, ..soup() },
    ];
    for draft in &invalid {
        let err = meals.create(draft).await.unwrap_err();
        assert!(err.is_validation(), "{err:?}");
    }
    let err = meals
        .update(
            1,
            &MealUpdate {
                price: Some(-5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err:?}");
    assert!(backend.requests().is_empty());

    let meal = meals.create(&soup()).await.unwrap();
    assert!(meal.is_available);
    assert_eq!(backend.calls(Method::POST)[0].path, "/meals");

    let updated = meals
        .update(
            meal.id,
            &MealUpdate {
                price: Some(95.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 95.0);
    let put = &backend.calls(Method::PUT)[0];
    assert_eq!(put.path, format!("/meals/{}", meal.id));
    assert_eq!(put.body, Some(json!({ "price": 95.0 })));

    // The updated meal was written into the cache
    assert_eq!(meals.get(meal.id).await.unwrap().price, 95.0);
    assert!(backend.calls(Method::GET).is_empty());

    meals.delete(meal.id).await.unwrap();
    assert!(backend.state.meals.lock().unwrap().is_empty());
}

// ── Cart ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_clear_cart_empties_server_and_snapshot() {
    let backend = MockBackend::new();
    let meal = backend.seed_meal("Koshari", 45.0);
    let cart = backend.client.cart();
    cart.add_item(meal, 2).await.unwrap();
    assert!(backend.client.cart_store().snapshot().is_some());

    cart.clear().await.unwrap();

    assert_eq!(backend.calls(Method::DELETE)[0].path, "/cart");
    assert!(backend.client.cart_store().snapshot().is_none());
    let fresh = cart.get().await.unwrap();
    assert!(fresh.items.is_empty());
    assert_eq!(backend.calls(Method::GET).len(), 1);
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_persists_session_and_logout_clears_it() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config().with_data_dir(dir.path());
    let backend = MockBackend::with_config(config.clone());

    let session = backend
        .client
        .auth()
        .login_with_google("google-id-token")
        .await
        .unwrap();
    assert_eq!(session.token, "session-token");
    assert!(backend.client.auth().is_admin());
    assert!(dir.path().join("session.json").exists());

    // A second client over the same data directory picks the session up
    let restored = TavolaClient::in_process(router(backend.state.clone()), config).unwrap();
    assert!(restored.is_authenticated());
    let me = restored.auth().me().await.unwrap();
    assert_eq!(me.email, "salma@example.com");

    restored.auth().logout().unwrap();
    assert!(!dir.path().join("session.json").exists());
    let err = restored.auth().me().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_login_unsaved_session_stays_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the data directory should be
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let backend = MockBackend::with_config(test_config().with_data_dir(&blocker));

    let err = backend
        .client
        .auth()
        .login_with_google("google-id-token")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Storage(_)), "{err:?}");
    assert!(!backend.client.is_authenticated());
    assert!(backend.client.auth().current_user().is_none());
}

#[tokio::test]
async fn test_bad_credential_surfaces_backend_message() {
    let backend = MockBackend::new();
    let err = backend
        .client
        .auth()
        .login_with_google("forged")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert!(!backend.client.is_authenticated());

    let err = backend.client.auth().login_with_google("  ").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(backend.requests().len(), 1);
}

// ── Analytics, payments, dashboard ──────────────────────────────────

#[tokio::test]
async fn test_overview_fetches_summary_and_breakdown() {
    let backend = MockBackend::new();
    let range = DateRange::new(
        chrono::NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
    );

    let overview = backend
        .client
        .analytics()
        .overview(range, GroupBy::Week)
        .await
        .unwrap();

    assert_eq!(overview.summary.profit, 4500.0);
    assert_eq!(overview.chart.len(), 2);
    assert_eq!(overview.chart[0].revenue, 2500.5);
    assert_eq!(overview.chart[0].profit, 1200.5);
    assert_eq!(overview.chart[1].profit, -100.0);

    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert!(paths.contains(&"/analytics/summary".to_string()));
    assert!(paths.contains(&"/analytics/breakdown".to_string()));

    let inverted = DateRange::new(range.to, range.from);
    backend.clear_requests();
    assert!(backend.client.analytics().summary(inverted).await.is_err());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_checkout_returns_redirect_url() {
    let backend = MockBackend::new();
    let payments = backend.client.payments();

    let err = payments
        .create_checkout_session(&CheckoutRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(backend.requests().is_empty());

    let redirect = payments
        .create_checkout_session(&CheckoutRequest {
            cart_id: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(redirect.session_id, "cs_test_1");
    assert_eq!(redirect.url.scheme(), "https");
}

#[tokio::test]
async fn test_dashboard_poller_publishes_and_stops() {
    let backend = MockBackend::new();
    backend.seed_branch("Downtown", "Cairo", true);

    let poller =
        DashboardPoller::spawn_with_interval(backend.client.analytics(), Duration::from_millis(10));
    let mut updates = poller.subscribe();

    let stats = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            updates.changed().await.unwrap();
            if let Some(stats) = updates.borrow().data.clone() {
                return stats;
            }
        }
    })
    .await
    .unwrap();
    assert_eq!(stats.active_branches, 1);
    assert_eq!(stats.pending_reservations, 3);

    // Two ticks must have produced two requests
    tokio::time::timeout(Duration::from_secs(2), async {
        while backend.calls(Method::GET).len() < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();

    poller.stop().await;
    let after_stop = backend.requests().len();
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(backend.requests().len(), after_stop);
}

#[tokio::test]
async fn test_dashboard_poller_zero_interval_still_publishes() {
    let backend = MockBackend::new();
    let poller = DashboardPoller::spawn_with_interval(backend.client.analytics(), Duration::ZERO);
    let mut updates = poller.subscribe();

    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            updates.changed().await.unwrap();
            if updates.borrow().data.is_some() {
                break;
            }
        }
    })
    .await
    .unwrap();
    poller.stop().await;
}

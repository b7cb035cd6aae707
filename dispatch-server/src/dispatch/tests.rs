use chrono::Utc;
use shared::event::EventKind;
use shared::types::{OrderStatus, RiderStatus, Role};

use super::*;
use crate::db::DbService;
use crate::db::models::{Order, RiderProfile};
use crate::db::repository::{
    AccountRepository, OrderRepository, RestaurantRepository, RiderRepository,
};

const MINUTE_MS: i64 = 60_000;

struct Harness {
    dispatch: DispatchService,
    broadcaster: EventBroadcaster,
    accounts: AccountRepository,
    restaurants: RestaurantRepository,
    riders: RiderRepository,
    orders: OrderRepository,
}

async fn harness() -> Harness {
    let db = DbService::memory().await.unwrap();
    let broadcaster = EventBroadcaster::new();
    Harness {
        dispatch: DispatchService::new(db.db.clone(), broadcaster.clone()),
        broadcaster,
        accounts: AccountRepository::new(db.db.clone()),
        restaurants: RestaurantRepository::new(db.db.clone()),
        riders: RiderRepository::new(db.db.clone()),
        orders: OrderRepository::new(db.db.clone()),
    }
}

async fn seed_order(h: &Harness, order_ref: &str, prep_time: i64) -> Order {
    let manager = h
        .accounts
        .create(
            "Anna",
            &format!("{order_ref}@manager.test"),
            "secret1",
            Role::Manager,
        )
        .await
        .unwrap();
    let restaurant = h
        .restaurants
        .create("Thai Garden", "Pad Thai", manager.id.unwrap())
        .await
        .unwrap();
    h.orders
        .create(restaurant.id.unwrap(), order_ref, "2x Pad Thai", prep_time)
        .await
        .unwrap()
}

/// Returns (rider account id string, profile)
async fn seed_rider(h: &Harness, name: &str, email: &str) -> (String, RiderProfile) {
    let account = h
        .accounts
        .create(name, email, "secret1", Role::Rider)
        .await
        .unwrap();
    let account_id = account.id_string();
    let profile = h.riders.create(account.id.unwrap(), name).await.unwrap();
    (account_id, profile)
}

#[tokio::test]
async fn assign_sets_dispatch_time_and_flips_rider() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-1", 15).await;
    let (_, profile) = seed_rider(&h, "Bo", "bo@rider.test").await;
    let mut rx = h.broadcaster.subscribe();

    let before = Utc::now().timestamp_millis();
    let view = h
        .dispatch
        .assign(&order.id_string(), &profile.id_string())
        .await
        .unwrap();

    assert_eq!(view.status, OrderStatus::Prep);
    assert_eq!(view.rider_name.as_deref(), Some("Bo"));
    let dispatch_time = view.dispatch_time.unwrap();
    let expected = before + (15 + FIXED_ETA_MINUTES) * MINUTE_MS;
    assert!((dispatch_time - expected).abs() < 5_000);

    let rider = h.riders.find_by_id(profile.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(rider.status, RiderStatus::Busy);
    assert_eq!(rider.current_order, order.id);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.kind, EventKind::RiderAssigned);
    assert_eq!(event.order.order_id, "ORD-1");
}

#[tokio::test]
async fn assign_rejects_second_rider() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-2", 20).await;
    let (_, first) = seed_rider(&h, "Bo", "bo2@rider.test").await;
    let (_, second) = seed_rider(&h, "Cy", "cy@rider.test").await;
    let order_id = order.id_string();

    h.dispatch
        .assign(&order_id, &first.id_string())
        .await
        .unwrap();
    let err = h
        .dispatch
        .assign(&order_id, &second.id_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyAssigned));

    // the loser's rider keeps its availability
    let second = h.riders.find_by_id(second.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(second.status, RiderStatus::Available);
}

#[tokio::test]
async fn assign_rejects_busy_rider() {
    let h = harness().await;
    let first = seed_order(&h, "ORD-3", 20).await;
    let second = seed_order(&h, "ORD-4", 20).await;
    let (_, profile) = seed_rider(&h, "Bo", "bo3@rider.test").await;
    let rider_id = profile.id_string();

    h.dispatch
        .assign(&first.id_string(), &rider_id)
        .await
        .unwrap();
    let err = h
        .dispatch
        .assign(&second.id_string(), &rider_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RiderUnavailable));
}

#[tokio::test]
async fn assign_unknown_order_or_rider_is_not_found() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-5", 20).await;
    let (_, profile) = seed_rider(&h, "Bo", "bo5@rider.test").await;

    let err = h
        .dispatch
        .assign("order:nosuch", &profile.id_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = h
        .dispatch
        .assign(&order.id_string(), "rider:nosuch")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_assigns_have_exactly_one_winner() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-6", 20).await;
    let (_, a) = seed_rider(&h, "Bo", "bo6@rider.test").await;
    let (_, b) = seed_rider(&h, "Cy", "cy6@rider.test").await;
    let order_id = order.id_string();

    let rider_a = a.id_string();
    let rider_b = b.id_string();
    let (ra, rb) = tokio::join!(
        h.dispatch.assign(&order_id, &rider_a),
        h.dispatch.assign(&order_id, &rider_b),
    );

    assert_eq!(
        ra.is_ok() as u8 + rb.is_ok() as u8,
        1,
        "exactly one assign must win"
    );
    let loser = if ra.is_ok() { rb } else { ra };
    assert!(matches!(loser.unwrap_err(), AppError::AlreadyAssigned));

    // exactly one rider ended up busy
    let busy_a = h.riders.find_by_id(a.id.unwrap()).await.unwrap().unwrap();
    let busy_b = h.riders.find_by_id(b.id.unwrap()).await.unwrap().unwrap();
    let busy = [busy_a, busy_b]
        .iter()
        .filter(|r| r.status == RiderStatus::Busy)
        .count();
    assert_eq!(busy, 1);
}

#[tokio::test]
async fn full_lifecycle_delivers_and_releases_rider() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-7", 20).await;
    let (account_id, profile) = seed_rider(&h, "Bo", "bo7@rider.test").await;
    let order_id = order.id_string();

    h.dispatch
        .assign(&order_id, &profile.id_string())
        .await
        .unwrap();
    let estimate = h
        .orders
        .find_by_id(order.id.clone().unwrap())
        .await
        .unwrap()
        .unwrap()
        .dispatch_time
        .unwrap();

    let view = h
        .dispatch
        .advance(&order_id, OrderStatus::Picked, &account_id)
        .await
        .unwrap();
    assert_eq!(view.status, OrderStatus::Picked);

    let view = h
        .dispatch
        .advance(&order_id, OrderStatus::OnRoute, &account_id)
        .await
        .unwrap();
    assert_eq!(view.status, OrderStatus::OnRoute);

    let before = Utc::now().timestamp_millis();
    let view = h
        .dispatch
        .advance(&order_id, OrderStatus::Delivered, &account_id)
        .await
        .unwrap();
    assert_eq!(view.status, OrderStatus::Delivered);

    // estimate overwritten with the actual completion time
    let completed = view.dispatch_time.unwrap();
    assert!(completed < estimate);
    assert!((completed - before).abs() < 5_000);

    let rider = h.riders.find_by_id(profile.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(rider.status, RiderStatus::Available);
    assert!(rider.current_order.is_none());
}

#[tokio::test]
async fn advance_rejects_everything_but_the_immediate_successor() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-8", 20).await;
    let (account_id, profile) = seed_rider(&h, "Bo", "bo8@rider.test").await;
    let order_id = order.id_string();
    h.dispatch
        .assign(&order_id, &profile.id_string())
        .await
        .unwrap();

    // skip
    let err = h
        .dispatch
        .advance(&order_id, OrderStatus::OnRoute, &account_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition));

    h.dispatch
        .advance(&order_id, OrderStatus::Picked, &account_id)
        .await
        .unwrap();

    // no-op
    let err = h
        .dispatch
        .advance(&order_id, OrderStatus::Picked, &account_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition));

    // reversal (PREP is never a valid target)
    let err = h
        .dispatch
        .advance(&order_id, OrderStatus::Prep, &account_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition));
}

#[tokio::test]
async fn delivered_is_terminal() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-9", 20).await;
    let (account_id, profile) = seed_rider(&h, "Bo", "bo9@rider.test").await;
    let order_id = order.id_string();

    h.dispatch
        .assign(&order_id, &profile.id_string())
        .await
        .unwrap();
    for status in [OrderStatus::Picked, OrderStatus::OnRoute, OrderStatus::Delivered] {
        h.dispatch.advance(&order_id, status, &account_id).await.unwrap();
    }

    for status in [OrderStatus::Picked, OrderStatus::OnRoute, OrderStatus::Delivered] {
        let err = h
            .dispatch
            .advance(&order_id, status, &account_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition));
    }
}

#[tokio::test]
async fn only_the_assigned_rider_may_advance() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-10", 20).await;
    let (_, assigned) = seed_rider(&h, "Bo", "bo10@rider.test").await;
    let (other_account, _) = seed_rider(&h, "Cy", "cy10@rider.test").await;
    let order_id = order.id_string();

    h.dispatch
        .assign(&order_id, &assigned.id_string())
        .await
        .unwrap();

    let err = h
        .dispatch
        .advance(&order_id, OrderStatus::Picked, &other_account)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // order untouched
    let current = h.orders.find_by_id(order.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(current.status, OrderStatus::Prep);
}

#[tokio::test]
async fn advance_on_missing_order_is_not_found() {
    let h = harness().await;
    let (account_id, _) = seed_rider(&h, "Bo", "bo13@rider.test").await;

    // existence is checked before transition legality, even for PREP
    for status in [OrderStatus::Prep, OrderStatus::Picked] {
        let err = h
            .dispatch
            .advance("order:nosuch", status, &account_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

#[tokio::test]
async fn advance_on_unassigned_order_is_forbidden() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-11", 20).await;
    let (account_id, _) = seed_rider(&h, "Bo", "bo11@rider.test").await;

    let err = h
        .dispatch
        .advance(&order.id_string(), OrderStatus::Picked, &account_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn current_order_for_reports_assignment() {
    let h = harness().await;
    let order = seed_order(&h, "ORD-12", 20).await;
    let (account_id, profile) = seed_rider(&h, "Bo", "bo12@rider.test").await;

    assert!(h.dispatch.current_order_for(&account_id).await.unwrap().is_none());

    h.dispatch
        .assign(&order.id_string(), &profile.id_string())
        .await
        .unwrap();
    let current = h.dispatch.current_order_for(&account_id).await.unwrap().unwrap();
    assert_eq!(current.order_id, "ORD-12");

    let err = h
        .dispatch
        .current_order_for("account:nosuch")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn order_creation_validates_inputs() {
    let h = harness().await;
    let manager = h
        .accounts
        .create("Anna", "anna@manager.test", "secret1", Role::Manager)
        .await
        .unwrap();
    let restaurant = h
        .restaurants
        .create("Thai Garden", "Pad Thai", manager.id.unwrap())
        .await
        .unwrap();
    let rid = restaurant.id.unwrap();

    for prep in [0, 121, -5] {
        let err = h
            .orders
            .create(rid.clone(), "ORD-B", "2x Pad Thai", prep)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::db::repository::RepoError::Validation(_)));
    }
    // inclusive bounds
    h.orders.create(rid.clone(), "ORD-MIN", "Soup", 1).await.unwrap();
    h.orders.create(rid.clone(), "ORD-MAX", "Banquet", 120).await.unwrap();

    let err = h
        .orders
        .create(rid.clone(), "ORD-MIN", "Soup", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, crate::db::repository::RepoError::Duplicate(_)));

    let err = h.orders.create(rid, "", "Soup", 10).await.unwrap_err();
    assert!(matches!(err, crate::db::repository::RepoError::Validation(_)));
}

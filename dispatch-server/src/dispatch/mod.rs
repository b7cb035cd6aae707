//! 调度引擎 — 骑手指派与订单状态流转
//!
//! 订单与骑手的复合变更必须原子提交：`assign` 与 `advance` 都是单条
//! SurrealQL 事务脚本，校验在事务内重读后执行，违例以 `THROW "<marker>"`
//! 中止，整个事务要么全部生效要么全部回滚。并发下 RocksDB 乐观事务
//! 冲突时重试，败者在重读时命中 THROW，得到确定性的业务错误。
//!
//! # Invariants
//!
//! - An order has at most one assigned rider, ever (no reassignment).
//! - A busy rider always carries `current_order`; an available rider never
//!   does. Both flips commit with the order mutation or not at all.
//! - Status only moves along PREP → PICKED → ON_ROUTE → DELIVERED, one
//!   step at a time. DELIVERED is terminal.

use chrono::Utc;
use serde::Serialize;
use shared::client::OrderView;
use shared::event::DispatchEvent;
use shared::types::OrderStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::repository::{OrderRepository, RiderRepository, parse_record};
use crate::events::EventBroadcaster;
use crate::utils::{AppError, AppResult};

/// Fixed delivery leg added on top of prep time when estimating
/// dispatch time. Not route-aware.
pub const FIXED_ETA_MINUTES: i64 = 30;

/// Attempts per transaction before giving up on commit conflicts
const TXN_RETRIES: usize = 3;

const ASSIGN_SCRIPT: &str = r#"
BEGIN TRANSACTION;
LET $o = (SELECT * FROM $order)[0];
IF $o IS NONE { THROW "order_not_found" };
IF $o.assigned_rider IS NOT NONE { THROW "already_assigned" };
LET $r = (SELECT * FROM $rider)[0];
IF $r IS NONE { THROW "rider_not_found" };
IF $r.status != 'available' { THROW "rider_unavailable" };
UPDATE $order SET
    assigned_rider = $rider,
    dispatch_time = $now + (($o.prep_time + $eta) * 60000),
    updated_at = $now;
UPDATE $rider SET status = 'busy', current_order = $order;
COMMIT TRANSACTION;
"#;

const ADVANCE_SCRIPT: &str = r#"
BEGIN TRANSACTION;
LET $o = (SELECT * FROM $order)[0];
IF $o IS NONE { THROW "order_not_found" };
IF $o.assigned_rider IS NONE OR $o.assigned_rider != $rider { THROW "not_assigned_rider" };
IF $o.status != $expected { THROW "stale_status" };
IF $requested = 'DELIVERED' {
    UPDATE $order SET status = $requested, dispatch_time = $now, updated_at = $now;
    UPDATE $rider SET status = 'available', current_order = NONE;
} ELSE {
    UPDATE $order SET status = $requested, updated_at = $now;
};
COMMIT TRANSACTION;
"#;

/// 调度服务 — 指派与状态流转的唯一入口
#[derive(Clone)]
pub struct DispatchService {
    db: Surreal<Db>,
    orders: OrderRepository,
    riders: RiderRepository,
    broadcaster: EventBroadcaster,
}

impl DispatchService {
    pub fn new(db: Surreal<Db>, broadcaster: EventBroadcaster) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            riders: RiderRepository::new(db.clone()),
            db,
            broadcaster,
        }
    }

    /// Assign a rider (by profile id) to an unassigned order
    ///
    /// Sets `dispatch_time = now + (prep_time + FIXED_ETA_MINUTES)` and
    /// flips the rider to busy in the same transaction. Of two concurrent
    /// assigns exactly one wins; the loser gets [`AppError::AlreadyAssigned`]
    /// (or [`AppError::RiderUnavailable`] when racing over the rider).
    pub async fn assign(&self, order_id: &str, rider_profile_id: &str) -> AppResult<OrderView> {
        let order = parse_record("order", order_id)?;
        let rider = parse_record("rider", rider_profile_id)?;

        self.run_transaction(
            ASSIGN_SCRIPT,
            AssignVars {
                order: order.clone(),
                rider: rider.clone(),
                eta: FIXED_ETA_MINUTES,
            },
        )
        .await?;

        let view = self.load_view(&order).await?;
        tracing::info!(
            order = %order, rider = %rider,
            "rider assigned, dispatch estimated at {:?}", view.dispatch_time
        );
        self.broadcaster
            .publish(DispatchEvent::rider_assigned(view.clone(), rider.to_string()));
        Ok(view)
    }

    /// Advance an order one step along the lifecycle
    ///
    /// `requested` must be the immediate successor of the current status;
    /// the guard is compare-and-set on `predecessor(requested)`, which
    /// uniformly rejects skips, no-ops, reversals, and lost races. Only
    /// the assigned rider (identified by account id) may advance. The
    /// DELIVERED transition also stamps `dispatch_time` with the actual
    /// completion time and releases the rider.
    pub async fn advance(
        &self,
        order_id: &str,
        requested: OrderStatus,
        acting_rider_account: &str,
    ) -> AppResult<OrderView> {
        let order = parse_record("order", order_id)?;
        let account = parse_record("account", acting_rider_account)?;

        // PREP has no predecessor; `None` can never match a stored status,
        // so the script rejects it after the existence/ownership checks.
        let expected = requested.predecessor();

        let profile = self
            .riders
            .find_by_account(account)
            .await?
            .ok_or_else(|| AppError::not_found("Rider not found"))?;
        let rider = profile
            .id
            .ok_or_else(|| AppError::internal("rider profile missing id"))?;

        self.run_transaction(
            ADVANCE_SCRIPT,
            AdvanceVars {
                order: order.clone(),
                rider,
                expected,
                requested,
            },
        )
        .await?;

        let view = self.load_view(&order).await?;
        tracing::info!(order = %order, status = %requested, "order status advanced");
        self.broadcaster
            .publish(DispatchEvent::order_status_changed(view.clone()));
        Ok(view)
    }

    /// The order a rider (by account id) is currently carrying, if any
    ///
    /// A missing profile is an error; an idle rider is `None`.
    pub async fn current_order_for(&self, rider_account: &str) -> AppResult<Option<OrderView>> {
        let account = parse_record("account", rider_account)?;
        let profile = self
            .riders
            .find_by_account(account)
            .await?
            .ok_or_else(|| AppError::not_found("Rider not found"))?;

        match profile.current_order {
            Some(order) => Ok(Some(self.load_view(&order).await?)),
            None => Ok(None),
        }
    }

    async fn load_view(&self, order: &RecordId) -> AppResult<OrderView> {
        self.orders
            .find_view(order.clone())
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))
    }

    /// Run a transaction script, retrying on optimistic-commit conflicts
    ///
    /// Each attempt rebinds a fresh `$now` so a retried transaction
    /// re-reads and re-stamps consistently.
    ///
    /// An aborted multi-statement transaction reports one error per
    /// statement, and only the statement that hit the `THROW` carries the
    /// marker text (the rest report the generic failed-transaction
    /// message), so every statement error is scanned for a marker before
    /// the failure is treated as a conflict or a database error.
    async fn run_transaction(
        &self,
        script: &str,
        vars: impl Serialize + Clone + 'static,
    ) -> AppResult<()> {
        let mut last = AppError::internal("transaction retries exhausted");
        for attempt in 1..=TXN_RETRIES {
            let now = Utc::now().timestamp_millis();
            let mut response = self
                .db
                .query(script)
                .bind(vars.clone())
                .bind(("now", now))
                .await
                .map_err(|e| AppError::database(e.to_string()))?;
            let errors = response.take_errors();
            if errors.is_empty() {
                return Ok(());
            }
            if let Some(err) = errors.values().find_map(map_throw) {
                return Err(err);
            }
            if errors.values().any(is_commit_conflict) && attempt < TXN_RETRIES {
                tracing::debug!(attempt, "dispatch transaction conflict, retrying");
                last = AppError::database("transaction commit conflict");
                continue;
            }
            let text = errors
                .into_values()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::database(text));
        }
        Err(last)
    }
}

#[derive(Clone, Serialize)]
struct AssignVars {
    order: RecordId,
    rider: RecordId,
    eta: i64,
}

#[derive(Clone, Serialize)]
struct AdvanceVars {
    order: RecordId,
    rider: RecordId,
    expected: Option<OrderStatus>,
    requested: OrderStatus,
}

fn is_commit_conflict(err: &surrealdb::Error) -> bool {
    let text = err.to_string();
    text.contains("read or write conflict") || text.contains("can be retried")
}

/// Map a `THROW "<marker>"` abort back to the domain error it encodes
fn map_throw(err: &surrealdb::Error) -> Option<AppError> {
    let text = err.to_string();
    if text.contains("order_not_found") {
        Some(AppError::not_found("Order not found"))
    } else if text.contains("already_assigned") {
        Some(AppError::AlreadyAssigned)
    } else if text.contains("rider_not_found") {
        Some(AppError::not_found("Rider not found"))
    } else if text.contains("rider_unavailable") {
        Some(AppError::RiderUnavailable)
    } else if text.contains("stale_status") {
        Some(AppError::InvalidTransition)
    } else if text.contains("not_assigned_rider") {
        Some(AppError::forbidden("Access denied"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests;

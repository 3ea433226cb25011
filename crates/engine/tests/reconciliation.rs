use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveValue, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Statement,
};
use uuid::Uuid;

use engine::{
    BudgetScope, Engine, EngineError, Frequency, MoveItemsCmd, PlannedExpenseCmd,
    RecurringStatus, RecurringTransferCmd, ReviewAction, ReviewStatus, SubmitChargeCmd,
    SubmitReimbursementCmd, TransferExecution, TransferListFilter, TransferStatus,
    charges as charge_entity, reimbursements as reimbursement_entity,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in ["alice", "vera", "teo"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn circle_fund(engine: &Engine) -> (Uuid, Uuid) {
    let budget_id = engine
        .new_budget("Casa", BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    let fund_id = engine
        .new_fund(budget_id, "Spese comuni", Utc::now())
        .await
        .unwrap();
    (budget_id, fund_id)
}

async fn approved_reimbursement(engine: &Engine, fund_id: Uuid, user: &str, amount: i64) -> Uuid {
    let id = engine
        .submit_reimbursement(SubmitReimbursementCmd::new(
            fund_id,
            user,
            amount,
            "groceries",
            date(2026, 3, 10),
            Utc::now(),
        ))
        .await
        .unwrap();
    engine
        .review_reimbursement(id, "teo", ReviewAction::Approve, None, Utc::now())
        .await
        .unwrap();
    id
}

async fn approved_charge(engine: &Engine, fund_id: Uuid, user: &str, amount: i64) -> Uuid {
    let id = engine
        .submit_charge(SubmitChargeCmd::new(
            fund_id,
            user,
            amount,
            "key deposit",
            date(2026, 3, 12),
            Utc::now(),
        ))
        .await
        .unwrap();
    engine
        .review_charge(id, "teo", ReviewAction::Approve, None, Utc::now())
        .await
        .unwrap();
    id
}

async fn reimbursement_status(db: &DatabaseConnection, id: Uuid) -> ReviewStatus {
    let model = reimbursement_entity::Entity::find_by_id(id.to_string())
        .one(db)
        .await
        .unwrap()
        .unwrap();
    ReviewStatus::try_from(model.status.as_str()).unwrap()
}

async fn charge_status(db: &DatabaseConnection, id: Uuid) -> ReviewStatus {
    let model = charge_entity::Entity::find_by_id(id.to_string())
        .one(db)
        .await
        .unwrap()
        .unwrap();
    ReviewStatus::try_from(model.status.as_str()).unwrap()
}

#[tokio::test]
async fn netting_sums_credits_minus_open_debts() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    approved_reimbursement(&engine, fund_id, "alice", 12_000).await;
    approved_charge(&engine, fund_id, "alice", 5_000).await;

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].recipient_user_id, "alice");
    assert_eq!(transfers[0].total_amount_minor, 7_000);
    assert_eq!(transfers[0].reimbursement_count, 1);
    assert_eq!(transfers[0].status, TransferStatus::Pending);
}

#[tokio::test]
async fn refresh_is_idempotent() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    approved_reimbursement(&engine, fund_id, "alice", 8_000).await;
    approved_charge(&engine, fund_id, "vera", 3_000).await;

    let first = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    let second = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();

    assert_eq!(first.len(), 2);
    let ids = |ts: &[engine::PaymentTransfer]| {
        ts.iter()
            .map(|t| (t.id, t.total_amount_minor, t.reimbursement_count))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));

    let (listed, _) = engine
        .list_payment_transfers(BudgetScope::Circle, 10, None, &TransferListFilter::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn refresh_updates_pending_transfer_in_place() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    approved_reimbursement(&engine, fund_id, "alice", 4_000).await;
    let first = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();

    approved_reimbursement(&engine, fund_id, "alice", 2_500).await;
    let second = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();

    assert_eq!(first[0].id, second[0].id);
    assert_eq!(second[0].total_amount_minor, 6_500);
    assert_eq!(second[0].reimbursement_count, 2);
}

#[tokio::test]
async fn unreviewed_charges_count_as_debt() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    // Still pending review, but a debt is a debt.
    engine
        .submit_charge(SubmitChargeCmd::new(
            fund_id,
            "vera",
            4_200,
            "damage",
            date(2026, 2, 1),
            Utc::now(),
        ))
        .await
        .unwrap();

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].total_amount_minor, -4_200);
    assert_eq!(transfers[0].reimbursement_count, 0);
}

#[tokio::test]
async fn rejected_records_are_excluded_from_netting() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let id = engine
        .submit_reimbursement(SubmitReimbursementCmd::new(
            fund_id,
            "alice",
            9_000,
            "no receipt",
            date(2026, 3, 1),
            Utc::now(),
        ))
        .await
        .unwrap();
    engine
        .review_reimbursement(id, "teo", ReviewAction::Reject, Some("missing receipt"), Utc::now())
        .await
        .unwrap();

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert!(transfers.is_empty());
}

#[tokio::test]
async fn stale_pending_transfer_is_deleted() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let charge_id = engine
        .submit_charge(SubmitChargeCmd::new(
            fund_id,
            "vera",
            1_500,
            "late fee",
            date(2026, 2, 20),
            Utc::now(),
        ))
        .await
        .unwrap();

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(transfers.len(), 1);

    // The only contributing record drops out of netting.
    engine
        .review_charge(charge_id, "teo", ReviewAction::Reject, None, Utc::now())
        .await
        .unwrap();

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert!(transfers.is_empty());
    let (listed, _) = engine
        .list_payment_transfers(BudgetScope::Circle, 10, None, &TransferListFilter::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn zero_total_with_records_keeps_the_transfer() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    approved_reimbursement(&engine, fund_id, "alice", 5_000).await;
    approved_charge(&engine, fund_id, "alice", 5_000).await;

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].total_amount_minor, 0);

    let again = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].id, transfers[0].id);
}

#[tokio::test]
async fn execution_settles_records_and_transfer() {
    let (engine, db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let reimbursement_id = approved_reimbursement(&engine, fund_id, "alice", 12_000).await;
    let charge_id = approved_charge(&engine, fund_id, "alice", 5_000).await;

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    let outcome = engine
        .execute_transfer(BudgetScope::Circle, transfers[0].id, "teo", Utc::now())
        .await
        .unwrap();

    let TransferExecution::Executed(executed) = outcome else {
        panic!("expected an executed transfer");
    };
    assert_eq!(executed.status, TransferStatus::Executed);
    assert_eq!(executed.executed_by.as_deref(), Some("teo"));
    assert!(executed.executed_at.is_some());
    assert_eq!(
        reimbursement_status(&db, reimbursement_id).await,
        ReviewStatus::Paid
    );
    assert_eq!(charge_status(&db, charge_id).await, ReviewStatus::Paid);

    // Settled records do not net again.
    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert!(transfers.is_empty());
}

#[tokio::test]
async fn negative_execution_carries_debt_forward() {
    let (engine, db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let reimbursement_id = approved_reimbursement(&engine, fund_id, "vera", 3_000).await;
    let charge_id = approved_charge(&engine, fund_id, "vera", 10_000).await;

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(transfers[0].total_amount_minor, -7_000);

    let outcome = engine
        .execute_transfer(BudgetScope::Circle, transfers[0].id, "teo", Utc::now())
        .await
        .unwrap();
    assert_eq!(outcome, TransferExecution::CarriedForward { debt_minor: 7_000 });

    // The charge is consumed, the reimbursement stays approved, the transfer
    // row is gone.
    assert_eq!(charge_status(&db, charge_id).await, ReviewStatus::Paid);
    assert_eq!(
        reimbursement_status(&db, reimbursement_id).await,
        ReviewStatus::Approved
    );
    let err = engine
        .payment_transfer(BudgetScope::Circle, transfers[0].id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("payment transfer".to_string()));

    // The surviving reimbursement is swept into the next refresh.
    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].total_amount_minor, 3_000);
    assert_eq!(transfers[0].reimbursement_count, 1);
}

#[tokio::test]
async fn executing_twice_fails_without_side_effects() {
    let (engine, db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let reimbursement_id = approved_reimbursement(&engine, fund_id, "alice", 2_000).await;
    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    engine
        .execute_transfer(BudgetScope::Circle, transfers[0].id, "teo", Utc::now())
        .await
        .unwrap();

    let err = engine
        .execute_transfer(BudgetScope::Circle, transfers[0].id, "teo", Utc::now())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidState("payment transfer is not pending".to_string())
    );
    assert_eq!(
        reimbursement_status(&db, reimbursement_id).await,
        ReviewStatus::Paid
    );
}

#[tokio::test]
async fn concurrent_mutation_aborts_execution() {
    let (engine, db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let reimbursement_id = approved_reimbursement(&engine, fund_id, "alice", 6_000).await;
    let charge_id = approved_charge(&engine, fund_id, "alice", 1_000).await;
    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();

    // Someone else settles the reimbursement between netting and execution.
    let drifted = reimbursement_entity::ActiveModel {
        id: ActiveValue::Set(reimbursement_id.to_string()),
        status: ActiveValue::Set(ReviewStatus::Paid.as_str().to_string()),
        ..Default::default()
    };
    reimbursement_entity::Entity::update(drifted)
        .exec(&db)
        .await
        .unwrap();

    let err = engine
        .execute_transfer(BudgetScope::Circle, transfers[0].id, "teo", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));

    // Nothing partial: the charge is untouched and the transfer still pending.
    assert_eq!(charge_status(&db, charge_id).await, ReviewStatus::Approved);
    let (transfer, _) = engine
        .payment_transfer(BudgetScope::Circle, transfers[0].id)
        .await
        .unwrap();
    assert_eq!(transfer.status, TransferStatus::Pending);
}

#[tokio::test]
async fn recurring_generation_is_idempotent_per_period() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    engine
        .new_recurring_transfer(RecurringTransferCmd::new(
            "alice",
            fund_id,
            20_000,
            "cleaning service",
            Frequency::Monthly,
            date(2026, 1, 1),
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(
        engine.generate_recurring(date(2026, 1, 15), Utc::now()).await.unwrap(),
        1
    );
    assert_eq!(
        engine.generate_recurring(date(2026, 1, 28), Utc::now()).await.unwrap(),
        0
    );
    assert_eq!(
        engine.generate_recurring(date(2026, 2, 3), Utc::now()).await.unwrap(),
        1
    );

    // Generated credits are approved and net immediately.
    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(transfers[0].total_amount_minor, 40_000);
    assert_eq!(transfers[0].reimbursement_count, 2);
}

#[tokio::test]
async fn recurring_respects_window_and_pause() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let template_id = engine
        .new_recurring_transfer(
            RecurringTransferCmd::new(
                "vera",
                fund_id,
                5_000,
                "internet",
                Frequency::Monthly,
                date(2026, 3, 1),
                Utc::now(),
            )
            .end_date(date(2026, 4, 30)),
        )
        .await
        .unwrap();

    // Before the window opens.
    assert_eq!(
        engine.generate_recurring(date(2026, 2, 27), Utc::now()).await.unwrap(),
        0
    );
    // After the window closes.
    assert_eq!(
        engine.generate_recurring(date(2026, 5, 2), Utc::now()).await.unwrap(),
        0
    );

    engine
        .set_recurring_status(template_id, RecurringStatus::Paused)
        .await
        .unwrap();
    assert_eq!(
        engine.generate_recurring(date(2026, 3, 10), Utc::now()).await.unwrap(),
        0
    );

    engine
        .set_recurring_status(template_id, RecurringStatus::Active)
        .await
        .unwrap();
    assert_eq!(
        engine.generate_recurring(date(2026, 3, 10), Utc::now()).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn quarterly_template_generates_once_per_block() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    engine
        .new_recurring_transfer(RecurringTransferCmd::new(
            "alice",
            fund_id,
            30_000,
            "insurance",
            Frequency::Quarterly,
            date(2026, 2, 10),
            Utc::now(),
        ))
        .await
        .unwrap();

    assert_eq!(
        engine.generate_recurring(date(2026, 3, 1), Utc::now()).await.unwrap(),
        1
    );
    // Still the Feb-Apr block.
    assert_eq!(
        engine.generate_recurring(date(2026, 4, 30), Utc::now()).await.unwrap(),
        0
    );
    // Next block starts in May.
    assert_eq!(
        engine.generate_recurring(date(2026, 5, 2), Utc::now()).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn move_items_dry_run_matches_commit() {
    let (engine, _db) = engine_with_db().await;
    let (budget_id, source_fund) = circle_fund(&engine).await;
    let target_fund = engine
        .new_fund(budget_id, "Manutenzione", Utc::now())
        .await
        .unwrap();

    // Two reimbursements in range, one before the cutoff date.
    approved_reimbursement(&engine, source_fund, "alice", 4_000).await;
    engine
        .submit_reimbursement(SubmitReimbursementCmd::new(
            source_fund,
            "vera",
            2_000,
            "paint",
            date(2026, 3, 20),
            Utc::now(),
        ))
        .await
        .unwrap();
    engine
        .submit_reimbursement(SubmitReimbursementCmd::new(
            source_fund,
            "vera",
            1_000,
            "old receipt",
            date(2025, 12, 1),
            Utc::now(),
        ))
        .await
        .unwrap();
    engine
        .new_planned_expense(PlannedExpenseCmd::new(
            source_fund,
            9_000,
            "boiler check",
            date(2026, 6, 1),
            Utc::now(),
        ))
        .await
        .unwrap();

    let cmd = MoveItemsCmd::new(source_fund, target_fund, date(2026, 1, 1))
        .reimbursements(None)
        .planned_expenses(None);

    let preview = engine
        .move_fund_items(BudgetScope::Circle, cmd.clone().dry_run(true))
        .await
        .unwrap();
    assert!(preview.dry_run);
    assert_eq!(preview.moved.reimbursements, 2);
    assert_eq!(preview.moved.planned_expenses, 1);
    assert_eq!(preview.moved.direct_expenses, 0);
    assert_eq!(preview.source_fund, "Spese comuni");
    assert_eq!(preview.target_fund, "Manutenzione");

    let commit = engine
        .move_fund_items(BudgetScope::Circle, cmd.clone())
        .await
        .unwrap();
    assert_eq!(preview.moved, commit.moved);

    // Nothing matching the filter is left in the source fund.
    let after = engine
        .move_fund_items(BudgetScope::Circle, cmd.dry_run(true))
        .await
        .unwrap();
    assert_eq!(after.moved.reimbursements, 0);
    assert_eq!(after.moved.planned_expenses, 0);
}

#[tokio::test]
async fn move_items_honors_status_subsets() {
    let (engine, _db) = engine_with_db().await;
    let (budget_id, source_fund) = circle_fund(&engine).await;
    let target_fund = engine
        .new_fund(budget_id, "Archivio", Utc::now())
        .await
        .unwrap();

    approved_reimbursement(&engine, source_fund, "alice", 4_000).await;
    engine
        .submit_reimbursement(SubmitReimbursementCmd::new(
            source_fund,
            "vera",
            2_000,
            "paint",
            date(2026, 3, 20),
            Utc::now(),
        ))
        .await
        .unwrap();

    let cmd = MoveItemsCmd::new(source_fund, target_fund, date(2026, 1, 1))
        .reimbursements(Some(vec![ReviewStatus::Approved]))
        .dry_run(true);
    let preview = engine.move_fund_items(BudgetScope::Circle, cmd).await.unwrap();
    assert_eq!(preview.moved.reimbursements, 1);
}

#[tokio::test]
async fn move_items_rejects_same_source_and_target() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let err = engine
        .move_fund_items(
            BudgetScope::Circle,
            MoveItemsCmd::new(fund_id, fund_id, date(2026, 1, 1)).reimbursements(None),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidArgument("source and target fund must differ".to_string())
    );
}

#[tokio::test]
async fn scopes_are_isolated() {
    let (engine, _db) = engine_with_db().await;
    let (_, circle_fund_id) = circle_fund(&engine).await;

    let group_id = Uuid::new_v4();
    let group_budget = engine
        .new_budget("Gita", BudgetScope::Group(group_id), Utc::now())
        .await
        .unwrap();
    let group_fund = engine
        .new_fund(group_budget, "Cassa gita", Utc::now())
        .await
        .unwrap();

    approved_reimbursement(&engine, circle_fund_id, "alice", 1_000).await;
    approved_reimbursement(&engine, group_fund, "vera", 2_000).await;

    let circle = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    assert_eq!(circle.len(), 1);
    assert_eq!(circle[0].recipient_user_id, "alice");

    let group = engine
        .refresh_transfers(BudgetScope::Group(group_id), Utc::now())
        .await
        .unwrap();
    assert_eq!(group.len(), 1);
    assert_eq!(group[0].recipient_user_id, "vera");

    // A circle transfer is invisible (and inert) under the group scope.
    let err = engine
        .execute_transfer(BudgetScope::Group(group_id), circle[0].id, "teo", Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("payment transfer".to_string()));

    // Same for fund lookups across scopes.
    let err = engine
        .fund(BudgetScope::Circle, group_fund)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("fund".to_string()));
}

#[tokio::test]
async fn review_transitions_are_guarded() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    let id = engine
        .submit_reimbursement(SubmitReimbursementCmd::new(
            fund_id,
            "alice",
            1_000,
            "bus ticket",
            date(2026, 4, 1),
            Utc::now(),
        ))
        .await
        .unwrap();
    engine
        .review_reimbursement(id, "teo", ReviewAction::Reject, None, Utc::now())
        .await
        .unwrap();

    let err = engine
        .review_reimbursement(id, "teo", ReviewAction::Approve, None, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidState("cannot approve a rejected record".to_string())
    );

    let approved = approved_reimbursement(&engine, fund_id, "alice", 2_000).await;
    let err = engine
        .review_reimbursement(approved, "teo", ReviewAction::StartReview, None, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidState("cannot start_review a approved record".to_string())
    );
}

#[tokio::test]
async fn transfer_stats_count_by_status() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    approved_reimbursement(&engine, fund_id, "alice", 5_000).await;
    approved_reimbursement(&engine, fund_id, "vera", 3_000).await;

    let transfers = engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();
    engine
        .execute_transfer(BudgetScope::Circle, transfers[0].id, "teo", Utc::now())
        .await
        .unwrap();

    let stats = engine.transfer_stats(BudgetScope::Circle).await.unwrap();
    assert_eq!(stats.pending_count, 1);
    assert_eq!(stats.executed_count, 1);
    assert_eq!(stats.pending_total_minor + stats.executed_total_minor, 8_000);
}

#[tokio::test]
async fn transfer_listing_paginates_with_cursor() {
    let (engine, _db) = engine_with_db().await;
    let (_, fund_id) = circle_fund(&engine).await;

    approved_reimbursement(&engine, fund_id, "alice", 5_000).await;
    approved_reimbursement(&engine, fund_id, "vera", 3_000).await;
    engine
        .refresh_transfers(BudgetScope::Circle, Utc::now())
        .await
        .unwrap();

    let (first_page, cursor) = engine
        .list_payment_transfers(BudgetScope::Circle, 1, None, &TransferListFilter::default())
        .await
        .unwrap();
    assert_eq!(first_page.len(), 1);
    let cursor = cursor.expect("expected a second page");

    let (second_page, end) = engine
        .list_payment_transfers(
            BudgetScope::Circle,
            1,
            Some(&cursor),
            &TransferListFilter::default(),
        )
        .await
        .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_ne!(first_page[0].id, second_page[0].id);
    assert!(end.is_none());
}

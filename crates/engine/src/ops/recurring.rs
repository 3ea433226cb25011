//! The recurring generator.
//!
//! Walks the active templates and creates the current period's credit once
//! per `(template, period)` pair. Running it again in the same period is a
//! no-op, which makes the operation safe to trigger from a schedule and from
//! the UI at the same time.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{QueryFilter, TransactionTrait, prelude::*};

use crate::{
    RecurringStatus, RecurringTransfer, Reimbursement, ResultEngine, ReviewStatus,
    recurring_transfers, reimbursements,
};

use super::{Engine, with_tx};

impl Engine {
    /// Generate the ledger records due at `as_of` for every active template.
    ///
    /// Returns the number of newly created records; 0 means everything was
    /// already generated.
    pub async fn generate_recurring(
        &self,
        as_of: NaiveDate,
        now: DateTime<Utc>,
    ) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let templates = recurring_transfers::Entity::find()
                .filter(
                    recurring_transfers::Column::Status.eq(RecurringStatus::Active.as_str()),
                )
                .all(&db_tx)
                .await?;

            let mut created = 0u64;
            for model in templates {
                let template = RecurringTransfer::try_from(model)?;

                let Some(period_start) = template
                    .frequency
                    .period_start(template.start_date, as_of)
                else {
                    continue;
                };
                // The first period may begin before the template does; the
                // record date must stay inside [start_date, end_date].
                let record_date = period_start.max(template.start_date);
                if let Some(end) = template.end_date
                    && record_date > end
                {
                    continue;
                }

                let already_generated = reimbursements::Entity::find()
                    .filter(
                        reimbursements::Column::RecurringTransferId
                            .eq(template.id.to_string()),
                    )
                    .filter(reimbursements::Column::PeriodStart.eq(period_start))
                    .one(&db_tx)
                    .await?
                    .is_some();
                if already_generated {
                    continue;
                }

                self.require_fund(&db_tx, template.fund_id).await?;

                let mut credit = Reimbursement::new(
                    template.fund_id,
                    template.recipient_user_id.clone(),
                    template.recipient_user_id.clone(),
                    template.amount_minor,
                    template.description.clone(),
                    record_date,
                    now,
                )?;
                credit.status = ReviewStatus::Approved;
                credit.recurring_transfer_id = Some(template.id);
                credit.period_start = Some(period_start);

                reimbursements::ActiveModel::from(&credit)
                    .insert(&db_tx)
                    .await?;
                created += 1;
            }

            Ok(created)
        })
    }
}

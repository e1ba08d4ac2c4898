//! Purchase goal service
//!
//! Promotes savings plans into goals and keeps their monthly progress and
//! analyses consistent. Reads live on [`GoalBook`]; this service owns the
//! mutations.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{PocketError, PocketResult};
use crate::models::{
    GoalBook, GoalId, GoalStatus, GoalUpdate, Money, MonthKey, PurchaseGoal, PurchaseGoalAnalysis,
    SavingsPlan, SavingsProgress,
};

/// Mutating view over a user's goals
pub struct GoalService<'a> {
    book: &'a mut GoalBook,
}

impl<'a> GoalService<'a> {
    pub fn new(book: &'a mut GoalBook) -> Self {
        Self { book }
    }

    /// Create an active goal from a computed plan
    pub fn add_from_plan(
        &mut self,
        plan: &SavingsPlan,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> PocketResult<PurchaseGoal> {
        let mut goal = PurchaseGoal::from_plan(plan, now);
        goal.description = description;
        goal.validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        info!(goal = %goal.id, item = %goal.item, "goal created");
        self.book.goals.push(goal.clone());
        Ok(goal)
    }

    /// Apply a partial update to a goal
    pub fn update(
        &mut self,
        id: GoalId,
        update: GoalUpdate,
        now: DateTime<Utc>,
    ) -> PocketResult<PurchaseGoal> {
        let goal = self.goal_mut(id)?;
        let mut updated = goal.clone();
        updated.apply(update, now);
        updated
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        *goal = updated.clone();
        Ok(updated)
    }

    /// Delete a goal together with its progress records and analysis
    pub fn delete(&mut self, id: GoalId) -> PocketResult<PurchaseGoal> {
        let index = self
            .book
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| PocketError::goal_not_found(id.to_string()))?;

        let goal = self.book.goals.remove(index);
        self.book.progress.retain(|p| p.goal_id != id);
        self.book.analyses.retain(|a| a.goal_id != Some(id));
        Ok(goal)
    }

    /// Record what was actually set aside for a goal in `month`
    ///
    /// Upserts the month's record, recomputes running totals across the
    /// goal's months, updates `current_saved`, and completes the goal once
    /// the target is reached.
    pub fn record_progress(
        &mut self,
        id: GoalId,
        month: MonthKey,
        actual_amount: Money,
        now: DateTime<Utc>,
    ) -> PocketResult<SavingsProgress> {
        if actual_amount.is_negative() {
            return Err(PocketError::Validation(
                "Saved amount cannot be negative".into(),
            ));
        }

        let (planned, target) = {
            let goal = self.goal_mut(id)?;
            (goal.monthly_saving, goal.target_amount)
        };

        match self.book.progress.iter_mut().find(|p| p.is_for(id, month)) {
            Some(record) => {
                record.planned_amount = planned;
                record.actual_amount = actual_amount;
            }
            None => self.book.progress.push(SavingsProgress {
                goal_id: id,
                month,
                planned_amount: planned,
                actual_amount,
                cumulative_total: Money::zero(),
                percent_complete: 0.0,
                on_track: false,
            }),
        }

        let mut records: Vec<&mut SavingsProgress> = self
            .book
            .progress
            .iter_mut()
            .filter(|p| p.goal_id == id)
            .collect();
        records.sort_by_key(|p| p.month);

        let mut cumulative = Money::zero();
        let mut recorded = None;
        for record in records {
            cumulative += record.actual_amount;
            record.cumulative_total = cumulative;
            record.percent_complete = cumulative.percent_of(target).min(100.0);
            record.on_track = record.actual_amount >= record.planned_amount;
            if record.month == month {
                recorded = Some(record.clone());
            }
        }

        let goal = self.goal_mut(id)?;
        goal.current_saved = cumulative;
        goal.updated_at = now;
        if cumulative >= target && goal.status == GoalStatus::Active {
            info!(goal = %goal.id, "goal reached its target");
            goal.status = GoalStatus::Completed;
        }

        recorded.ok_or_else(|| PocketError::Storage(format!("progress for {} was not recorded", month)))
    }

    /// Store the analysis for a goal, replacing any earlier one
    pub fn save_analysis(
        &mut self,
        id: GoalId,
        mut analysis: PurchaseGoalAnalysis,
    ) -> PocketResult<()> {
        self.goal_mut(id)?;
        analysis.goal_id = Some(id);
        self.book.analyses.retain(|a| a.goal_id != Some(id));
        self.book.analyses.push(analysis);
        Ok(())
    }

    fn goal_mut(&mut self, id: GoalId) -> PocketResult<&mut PurchaseGoal> {
        self.book
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| PocketError::goal_not_found(id.to_string()))
    }
}

/// The month the next deposit for `goal` belongs to
///
/// Counts recorded months from the goal's start month.
pub fn next_deposit_month(book: &GoalBook, goal: &PurchaseGoal) -> MonthKey {
    let recorded = book.progress_for(goal.id).len() as u32;
    MonthKey::from_date(goal.start_date).plus_months(recorded)
}

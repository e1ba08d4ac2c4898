//! Tracker: the single owner of a user's state
//!
//! Every mutation goes through [`Tracker`]: it changes the in-memory
//! snapshot, then persists the whole snapshot and notifies subscribers.
//! A failed save is logged and leaves the in-memory change in place.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::calendar::Clock;
use crate::config::Settings;
use crate::error::{PocketError, PocketResult};
use crate::models::{
    Expense, ExpenseId, ExpenseUpdate, GoalBook, GoalId, GoalUpdate, Income, IncomeId,
    IncomeUpdate, Money, MonthKey, Notification, NotificationId, NotificationKind, PaymentRecord,
    PlanRequest, PlanWarning, PurchaseGoal, PurchaseGoalAnalysis, SavingsPlan, SavingsProgress,
    Snapshot,
};
use crate::services::payment::{find_record, is_paid};
use crate::services::planner::{self, estimate_variable_expenses};
use crate::services::{
    Dashboard, ExpenseService, GoalService, IncomeService, NotificationGenerator, PaymentLedger,
};
use crate::storage::SnapshotStore;

/// What changed in a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    ExpensesChanged,
    IncomesChanged,
    PaymentsChanged,
    NotificationsChanged,
    GoalsChanged,
}

/// Handle returned by [`Tracker::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(StoreEvent, &Snapshot)>;

/// Figures that tune aggregation and planning
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerOptions {
    pub upcoming_window_days: u32,
    pub variable_expense_ratio: f64,
    pub minimum_goal_target: Money,
    pub long_plan_months: u32,
    pub aggressive_saving_ratio: f64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for TrackerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            upcoming_window_days: settings.upcoming_window_days,
            variable_expense_ratio: settings.variable_expense_ratio,
            minimum_goal_target: settings.minimum_goal_target,
            long_plan_months: settings.long_plan_months,
            aggressive_saving_ratio: settings.aggressive_saving_ratio,
        }
    }
}

/// State holder for one user profile
pub struct Tracker {
    user_id: String,
    snapshot: Snapshot,
    store: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
    options: TrackerOptions,
    notifier: NotificationGenerator,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    last_save_error: Option<String>,
}

impl Tracker {
    /// Load a user's snapshot and run the initial due-date check
    ///
    /// A missing snapshot starts an empty profile. A snapshot that exists but
    /// cannot be read is an error, so it is never overwritten.
    pub fn load(
        user_id: impl Into<String>,
        store: Box<dyn SnapshotStore>,
        clock: Box<dyn Clock>,
        options: TrackerOptions,
    ) -> PocketResult<Self> {
        let user_id = user_id.into();
        let snapshot = match store.load(&user_id)? {
            Some(snapshot) => {
                debug!(user = %user_id, store = %store.describe(), "snapshot loaded");
                snapshot
            }
            None => {
                debug!(user = %user_id, "no snapshot yet, starting empty");
                Snapshot::default()
            }
        };

        let mut tracker = Self {
            user_id,
            snapshot,
            store,
            clock,
            options,
            notifier: NotificationGenerator::default(),
            observers: Vec::new(),
            next_subscription: 0,
            last_save_error: None,
        };
        tracker.check_notifications();
        Ok(tracker)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.today())
    }

    /// Error message of the most recent failed save, cleared by the next successful one
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    // Subscriptions

    /// Call `observer` after every commit
    pub fn subscribe(&mut self, observer: impl FnMut(StoreEvent, &Snapshot) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Persist the snapshot and notify subscribers
    fn commit(&mut self, event: StoreEvent) {
        match self.store.save(&self.user_id, &self.snapshot) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                warn!(
                    error = %e,
                    store = %self.store.describe(),
                    ?event,
                    "failed to persist snapshot, keeping changes in memory"
                );
                self.last_save_error = Some(e.to_string());
            }
        }

        for (_, observer) in self.observers.iter_mut() {
            observer(event, &self.snapshot);
        }
    }

    // Expenses

    pub fn expenses(&self) -> &[Expense] {
        &self.snapshot.expenses
    }

    pub fn expense_service(&self) -> ExpenseService<'_> {
        ExpenseService::new(&self.snapshot.expenses)
    }

    /// Find an expense by id reference or name
    pub fn find_expense(&self, reference: &str) -> PocketResult<&Expense> {
        self.expense_service()
            .find(reference)
            .ok_or_else(|| PocketError::expense_not_found(reference))
    }

    pub fn add_expense(&mut self, expense: Expense) -> PocketResult<Expense> {
        expense
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        info!(expense = %expense.id, name = %expense.name, "expense added");
        self.snapshot.expenses.push(expense.clone());
        self.commit(StoreEvent::ExpensesChanged);
        self.check_notifications();
        Ok(expense)
    }

    pub fn update_expense(&mut self, id: ExpenseId, update: ExpenseUpdate) -> PocketResult<Expense> {
        let expense = self.expense_mut(id)?;
        let mut updated = expense.clone();
        updated.apply(update);
        updated
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;
        *expense = updated.clone();

        self.commit(StoreEvent::ExpensesChanged);
        self.check_notifications();
        Ok(updated)
    }

    /// Delete an expense and every payment record referencing it
    pub fn delete_expense(&mut self, id: ExpenseId) -> PocketResult<Expense> {
        let index = self
            .snapshot
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| PocketError::expense_not_found(id.to_string()))?;

        let expense = self.snapshot.expenses.remove(index);
        let removed = PaymentLedger::new(&mut self.snapshot.payment_history).remove_expense(id);
        info!(expense = %id, payments = removed, "expense deleted");

        self.commit(StoreEvent::ExpensesChanged);
        Ok(expense)
    }

    /// Flip the active flag, returning the new state
    pub fn toggle_expense(&mut self, id: ExpenseId) -> PocketResult<bool> {
        let expense = self.expense_mut(id)?;
        expense.is_active = !expense.is_active;
        let active = expense.is_active;

        self.commit(StoreEvent::ExpensesChanged);
        if active {
            self.check_notifications();
        }
        Ok(active)
    }

    fn expense_mut(&mut self, id: ExpenseId) -> PocketResult<&mut Expense> {
        self.snapshot
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| PocketError::expense_not_found(id.to_string()))
    }

    // Incomes

    pub fn incomes(&self) -> &[Income] {
        &self.snapshot.incomes
    }

    pub fn income_service(&self) -> IncomeService<'_> {
        IncomeService::new(&self.snapshot.incomes)
    }

    pub fn find_income(&self, reference: &str) -> PocketResult<&Income> {
        self.income_service()
            .find(reference)
            .ok_or_else(|| PocketError::income_not_found(reference))
    }

    pub fn current_month_income(&self) -> Money {
        self.income_service().current_month_income(self.today())
    }

    pub fn add_income(&mut self, income: Income) -> PocketResult<Income> {
        income
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.snapshot.incomes.push(income.clone());
        self.commit(StoreEvent::IncomesChanged);
        Ok(income)
    }

    pub fn update_income(&mut self, id: IncomeId, update: IncomeUpdate) -> PocketResult<Income> {
        let income = self
            .snapshot
            .incomes
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| PocketError::income_not_found(id.to_string()))?;

        let mut updated = income.clone();
        updated.apply(update);
        updated
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;
        *income = updated.clone();

        self.commit(StoreEvent::IncomesChanged);
        Ok(updated)
    }

    pub fn delete_income(&mut self, id: IncomeId) -> PocketResult<Income> {
        let index = self
            .snapshot
            .incomes
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| PocketError::income_not_found(id.to_string()))?;

        let income = self.snapshot.incomes.remove(index);
        self.commit(StoreEvent::IncomesChanged);
        Ok(income)
    }

    // Payments

    /// Mark an expense paid for `month`; the paid value defaults to the expense value
    pub fn mark_paid(
        &mut self,
        expense_id: ExpenseId,
        month: MonthKey,
        paid_amount: Option<Money>,
    ) -> PocketResult<PaymentRecord> {
        if paid_amount.is_some_and(|a| a.is_negative()) {
            return Err(PocketError::Validation(
                "Paid amount cannot be negative".into(),
            ));
        }

        let expense = self
            .snapshot
            .expenses
            .iter()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| PocketError::expense_not_found(expense_id.to_string()))?;

        let now = self.clock.now();
        let record =
            PaymentLedger::new(&mut self.snapshot.payment_history).mark_paid(expense, month, paid_amount, now);

        self.commit(StoreEvent::PaymentsChanged);
        Ok(record)
    }

    /// Clear the paid status for `month`; returns false when nothing was recorded
    pub fn unmark_paid(&mut self, expense_id: ExpenseId, month: MonthKey) -> bool {
        let changed = PaymentLedger::new(&mut self.snapshot.payment_history).unmark_paid(expense_id, month);
        if changed {
            self.commit(StoreEvent::PaymentsChanged);
        }
        changed
    }

    pub fn is_paid(&self, expense_id: ExpenseId, month: MonthKey) -> bool {
        is_paid(&self.snapshot.payment_history, expense_id, month)
    }

    pub fn is_paid_this_month(&self, expense_id: ExpenseId) -> bool {
        self.is_paid(expense_id, self.current_month())
    }

    pub fn payment_record(&self, expense_id: ExpenseId, month: MonthKey) -> Option<&PaymentRecord> {
        find_record(&self.snapshot.payment_history, expense_id, month)
    }

    // Notifications

    /// Newest first
    pub fn notifications(&self) -> &[Notification] {
        &self.snapshot.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.snapshot.notifications.iter().filter(|n| !n.read).count()
    }

    /// Scan for due-date alerts, returning how many new ones were added
    pub fn check_notifications(&mut self) -> usize {
        let emitted = self.notifier.scan(
            &self.snapshot.expenses,
            &self.snapshot.notifications,
            self.clock.today(),
            self.clock.now(),
        );
        if emitted.is_empty() {
            return 0;
        }

        let count = emitted.len();
        for notification in &emitted {
            info!(message = %notification.message, "due-date alert");
        }
        // Newest first: the batch goes in front, keeping scan order within it
        let mut notifications = emitted;
        notifications.append(&mut self.snapshot.notifications);
        self.snapshot.notifications = notifications;
        self.commit(StoreEvent::NotificationsChanged);
        count
    }

    pub fn add_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        expense_id: Option<ExpenseId>,
    ) -> Notification {
        let mut notification = Notification::new(kind, message, self.clock.now());
        notification.expense_id = expense_id;
        self.snapshot.notifications.insert(0, notification.clone());
        self.commit(StoreEvent::NotificationsChanged);
        notification
    }

    pub fn mark_notification_read(&mut self, id: NotificationId) -> PocketResult<()> {
        let notification = self
            .snapshot
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| PocketError::notification_not_found(id.to_string()))?;

        if !notification.read {
            notification.read = true;
            self.commit(StoreEvent::NotificationsChanged);
        }
        Ok(())
    }

    /// Mark every notification read, returning how many changed
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.snapshot.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        if changed > 0 {
            self.commit(StoreEvent::NotificationsChanged);
        }
        changed
    }

    /// Remove all notifications, returning how many were removed
    pub fn clear_notifications(&mut self) -> usize {
        let removed = self.snapshot.notifications.len();
        self.snapshot.notifications.clear();
        self.commit(StoreEvent::NotificationsChanged);
        removed
    }

    // Dashboard and planning

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(
            &self.snapshot,
            self.options.upcoming_window_days,
            self.today(),
        )
    }

    /// Request built from current figures
    ///
    /// Income defaults to this month's income; fixed expenses are the active
    /// monthly total and variable spending is estimated from income.
    pub fn plan_request(
        &self,
        item: impl Into<String>,
        target_amount: Money,
        monthly_income: Option<Money>,
        custom_monthly_saving: Option<Money>,
    ) -> PlanRequest {
        let monthly_income = monthly_income.unwrap_or_else(|| self.current_month_income());
        PlanRequest {
            item: item.into(),
            target_amount,
            monthly_income,
            fixed_expenses: self.expense_service().total_monthly(),
            estimated_variable_expenses: estimate_variable_expenses(
                monthly_income,
                self.options.variable_expense_ratio,
            ),
            custom_monthly_saving,
        }
    }

    /// Validate a request and project it; `Ok(None)` when the plan is not possible
    pub fn compute_plan(&self, request: &PlanRequest) -> PocketResult<Option<SavingsPlan>> {
        request
            .validate(self.options.minimum_goal_target)
            .map_err(|e| PocketError::Validation(e.to_string()))?;
        Ok(planner::project(request, self.today()))
    }

    pub fn plan_warnings(&self, plan: &SavingsPlan) -> Vec<PlanWarning> {
        plan.warnings(self.options.long_plan_months, self.options.aggressive_saving_ratio)
    }

    // Goals

    pub fn goals(&self) -> &GoalBook {
        &self.snapshot.purchase_goals
    }

    pub fn find_goal(&self, reference: &str) -> PocketResult<&PurchaseGoal> {
        self.snapshot
            .purchase_goals
            .find(reference)
            .ok_or_else(|| PocketError::goal_not_found(reference))
    }

    /// Promote a plan into a goal
    pub fn save_goal(&mut self, plan: &SavingsPlan, description: Option<String>) -> PocketResult<PurchaseGoal> {
        let now = self.clock.now();
        let goal = GoalService::new(&mut self.snapshot.purchase_goals).add_from_plan(plan, description, now)?;
        self.commit(StoreEvent::GoalsChanged);
        Ok(goal)
    }

    pub fn update_goal(&mut self, id: GoalId, update: GoalUpdate) -> PocketResult<PurchaseGoal> {
        let now = self.clock.now();
        let goal = GoalService::new(&mut self.snapshot.purchase_goals).update(id, update, now)?;
        self.commit(StoreEvent::GoalsChanged);
        Ok(goal)
    }

    pub fn delete_goal(&mut self, id: GoalId) -> PocketResult<PurchaseGoal> {
        let goal = GoalService::new(&mut self.snapshot.purchase_goals).delete(id)?;
        self.commit(StoreEvent::GoalsChanged);
        Ok(goal)
    }

    pub fn record_goal_progress(
        &mut self,
        id: GoalId,
        month: MonthKey,
        actual_amount: Money,
    ) -> PocketResult<SavingsProgress> {
        let now = self.clock.now();
        let progress = GoalService::new(&mut self.snapshot.purchase_goals)
            .record_progress(id, month, actual_amount, now)?;
        self.commit(StoreEvent::GoalsChanged);
        Ok(progress)
    }

    pub fn save_goal_analysis(&mut self, id: GoalId, analysis: PurchaseGoalAnalysis) -> PocketResult<()> {
        GoalService::new(&mut self.snapshot.purchase_goals).save_analysis(id, analysis)?;
        self.commit(StoreEvent::GoalsChanged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::config::PocketPaths;
    use crate::models::{ExpenseCategory, GoalStatus};
    use crate::storage::LocalSnapshotStore;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker_at(temp_dir: &TempDir, today: NaiveDate) -> Tracker {
        let paths = PocketPaths::with_base_dir(temp_dir.path());
        Tracker::load(
            "local",
            Box::new(LocalSnapshotStore::at(&paths)),
            Box::new(FixedClock::new(today)),
            TrackerOptions::default(),
        )
        .unwrap()
    }

    /// Store whose saves always fail
    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn save(&self, _user_id: &str, _snapshot: &Snapshot) -> PocketResult<()> {
            Err(PocketError::Storage("disk full".into()))
        }

        fn load(&self, _user_id: &str) -> PocketResult<Option<Snapshot>> {
            Ok(None)
        }

        fn describe(&self) -> String {
            "broken".into()
        }
    }

    fn rent() -> Expense {
        Expense::new("Rent", Money::from_units(1200), ExpenseCategory::Housing).with_due_day(20)
    }

    #[test]
    fn test_mutations_persist() {
        let temp_dir = TempDir::new().unwrap();
        let today = date(2025, 4, 1);
        let mut tracker = tracker_at(&temp_dir, today);
        let rent = tracker.add_expense(rent()).unwrap();
        tracker
            .add_income(Income::new(Money::from_units(4000), "Salary", MonthKey::from_date(today)))
            .unwrap();

        let reloaded = tracker_at(&temp_dir, today);
        assert_eq!(reloaded.expenses().len(), 1);
        assert_eq!(reloaded.expenses()[0].id, rent.id);
        assert_eq!(reloaded.current_month_income(), Money::from_units(4000));
    }

    #[test]
    fn test_invalid_expense_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = tracker_at(&temp_dir, date(2025, 4, 1));

        let err = tracker
            .add_expense(Expense::new("  ", Money::from_units(10), ExpenseCategory::Other))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(tracker.expenses().is_empty());
        assert!(!PocketPaths::with_base_dir(temp_dir.path()).snapshot_file().exists());
    }

    #[test]
    fn test_failed_save_keeps_memory() {
        let mut tracker = Tracker::load(
            "local",
            Box::new(BrokenStore),
            Box::new(FixedClock::new(date(2025, 4, 1))),
            TrackerOptions::default(),
        )
        .unwrap();

        tracker.add_expense(rent()).unwrap();
        assert_eq!(tracker.expenses().len(), 1);
        assert!(tracker.last_save_error().unwrap().contains("disk full"));
    }

    #[test]
    fn test_delete_expense_cascades_payments() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = tracker_at(&temp_dir, date(2025, 4, 1));
        let rent = tracker.add_expense(rent()).unwrap();
        let month = tracker.current_month();
        tracker.mark_paid(rent.id, month, None).unwrap();
        assert!(tracker.is_paid_this_month(rent.id));

        tracker.delete_expense(rent.id).unwrap();
        assert!(tracker.snapshot().payment_history.is_empty());
        assert!(tracker.delete_expense(rent.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_mark_paid_uses_expense_value_and_upserts() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = tracker_at(&temp_dir, date(2025, 4, 1));
        let rent = tracker.add_expense(rent()).unwrap();
        let month = tracker.current_month();

        let first = tracker.mark_paid(rent.id, month, None).unwrap();
        assert_eq!(first.paid_value, Some(Money::from_units(1200)));

        tracker.mark_paid(rent.id, month, Some(Money::from_units(1150))).unwrap();
        assert_eq!(tracker.snapshot().payment_history.len(), 1);
        assert_eq!(
            tracker.payment_record(rent.id, month).unwrap().paid_value,
            Some(Money::from_units(1150))
        );

        assert!(tracker.unmark_paid(rent.id, month));
        assert!(!tracker.is_paid(rent.id, month));
        assert!(!tracker.unmark_paid(rent.id, month.next()));
    }

    #[test]
    fn test_notifications_on_add_and_no_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = tracker_at(&temp_dir, date(2025, 4, 13));

        tracker.add_expense(rent()).unwrap();
        assert_eq!(tracker.notifications().len(), 1);
        assert_eq!(tracker.notifications()[0].message, "Rent is due in 7 days (day 20)");

        assert_eq!(tracker.check_notifications(), 0);
        let reloaded = tracker_at(&temp_dir, date(2025, 4, 13));
        assert_eq!(reloaded.notifications().len(), 1);
    }

    #[test]
    fn test_notifications_newest_first_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = tracker_at(&temp_dir, date(2025, 4, 13));
        tracker.add_notification(NotificationKind::CategoryLimit, "first", None);
        let second = tracker.add_notification(NotificationKind::ValueIncrease, "second", None);

        assert_eq!(tracker.notifications()[0].message, "second");
        assert_eq!(tracker.unread_count(), 2);

        tracker.mark_notification_read(second.id).unwrap();
        assert_eq!(tracker.unread_count(), 1);
        assert_eq!(tracker.mark_all_notifications_read(), 1);
        assert_eq!(tracker.clear_notifications(), 2);
        assert!(tracker.notifications().is_empty());
    }

    #[test]
    fn test_subscribers_see_commits() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = tracker_at(&temp_dir, date(2025, 4, 1));
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let id = tracker.subscribe(move |event, snapshot| {
            sink.borrow_mut().push((event, snapshot.expenses.len()));
        });

        tracker.add_expense(rent()).unwrap();
        assert_eq!(events.borrow().as_slice(), &[(StoreEvent::ExpensesChanged, 1)]);

        assert!(tracker.unsubscribe(id));
        tracker.clear_notifications();
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_plan_from_current_figures() {
        let temp_dir = TempDir::new().unwrap();
        let today = date(2025, 4, 1);
        let mut tracker = tracker_at(&temp_dir, today);
        tracker
            .add_expense(Expense::new("Rent", Money::from_units(2000), ExpenseCategory::Housing))
            .unwrap();
        tracker
            .add_income(Income::new(Money::from_units(5000), "Salary", MonthKey::from_date(today)))
            .unwrap();

        let request = tracker.plan_request("Laptop", Money::from_units(3000), None, None);
        assert_eq!(request.fixed_expenses, Money::from_units(2000));
        assert_eq!(request.estimated_variable_expenses, Money::from_units(1500));

        let plan = tracker.compute_plan(&request).unwrap().unwrap();
        assert_eq!(plan.months_needed, 6);
        assert!(tracker.plan_warnings(&plan).is_empty());

        let low = tracker.plan_request("Mug", Money::from_units(20), None, None);
        assert!(tracker.compute_plan(&low).unwrap_err().is_validation());

        let endless = tracker.plan_request(
            "Boat",
            Money::from_units(50_000),
            None,
            Some(Money::from_cents(1)),
        );
        let err = tracker.compute_plan(&endless).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("1200 months"));
    }

    #[test]
    fn test_goal_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let today = date(2025, 4, 1);
        let mut tracker = tracker_at(&temp_dir, today);
        let request = tracker.plan_request(
            "Bike",
            Money::from_units(600),
            Some(Money::from_units(3000)),
            Some(Money::from_units(300)),
        );
        let plan = tracker.compute_plan(&request).unwrap().unwrap();
        let goal = tracker.save_goal(&plan, None).unwrap();

        tracker
            .record_goal_progress(goal.id, MonthKey::from_date(today), Money::from_units(300))
            .unwrap();
        tracker
            .record_goal_progress(goal.id, MonthKey::from_date(today).next(), Money::from_units(300))
            .unwrap();

        let reloaded = tracker_at(&temp_dir, today);
        let stored = reloaded.goals().goal(goal.id).unwrap();
        assert_eq!(stored.current_saved, Money::from_units(600));
        assert_eq!(stored.status, GoalStatus::Completed);
        assert_eq!(reloaded.find_goal("bike").unwrap().id, goal.id);

        tracker.delete_goal(goal.id).unwrap();
        assert!(tracker.goals().goals.is_empty());
        assert!(tracker.goals().progress.is_empty());
    }
}

//! The application state and every action a user can take on it.

use std::rc::Rc;

use chrono::{NaiveDate, Utc};
use yew::functional::Reducible;

use crate::{
    error::DraftError,
    model::TransactionDraft,
    repository::TransactionRepository,
    settings::{
        is_supported_currency, parse_threshold, Settings, DEFAULT_INCOME_GOAL,
        DEFAULT_MONTHLY_BUDGET,
    },
    storage::{BrowserStorage, KeyValueStore, MemoryStore},
    view_model::DashboardView,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Transactions,
    Analytics,
    Settings,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Transactions => "Add Transaction",
            Section::Analytics => "Analytics",
            Section::Settings => "Settings",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Navigate(Section),
    Submit(TransactionDraft),
    Delete(i64),
    /// Only dispatched once the user has confirmed.
    ClearAll,
    ToggleTheme,
    SetCurrency(String),
    SetMonthlyBudget(String),
    SetIncomeGoal(String),
}

/// Owns the transactions, the settings and the navigation state. Every
/// mutation is written to the store before [FinanceTracker::apply] returns.
#[derive(Clone)]
pub struct FinanceTracker {
    store: Rc<dyn KeyValueStore>,
    repository: TransactionRepository,
    settings: Settings,
    section: Section,
    form_error: Option<DraftError>,
}

impl PartialEq for FinanceTracker {
    // The store handle never changes after start-up.
    fn eq(&self, other: &Self) -> bool {
        self.repository == other.repository
            && self.settings == other.settings
            && self.section == other.section
            && self.form_error == other.form_error
    }
}

impl FinanceTracker {
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let repository = TransactionRepository::load_or_default(store.as_ref());
        let settings = Settings::load(store.as_ref());

        tracing::info!(
            transactions = repository.len(),
            currency = %settings.currency,
            dark_mode = settings.dark_mode,
            "Loaded saved state"
        );

        Self {
            store,
            repository,
            settings,
            section: Section::Dashboard,
            form_error: None,
        }
    }

    /// Load from `window.localStorage`, or run on a throwaway in-memory store
    /// when the browser denies access to it.
    pub fn open_browser() -> Self {
        let store: Rc<dyn KeyValueStore> = match BrowserStorage::open() {
            Ok(storage) => Rc::new(storage),
            Err(err) => {
                tracing::warn!("{err}; changes will not survive a reload");
                Rc::new(MemoryStore::new())
            }
        };

        Self::load(store)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn form_error(&self) -> Option<&DraftError> {
        self.form_error.as_ref()
    }

    #[cfg(test)]
    pub fn repository(&self) -> &TransactionRepository {
        &self.repository
    }

    pub fn view(&self, today: NaiveDate) -> DashboardView {
        DashboardView::build(self.repository.transactions(), &self.settings, today)
    }

    pub fn apply(&mut self, action: Action, now_ms: i64) {
        let store = self.store.clone();
        let store = store.as_ref();

        match action {
            Action::Navigate(section) => {
                self.section = section;
                self.form_error = None;
            }
            Action::Submit(draft) => {
                let id = self.repository.next_id(now_ms);
                match draft.into_transaction(id) {
                    Ok(transaction) => {
                        tracing::info!(
                            id,
                            kind = transaction.kind.as_str(),
                            amount = transaction.amount,
                            "Added transaction"
                        );
                        if let Err(err) = self.repository.add(transaction, store) {
                            tracing::error!("Could not save transactions: {err}");
                        }
                        self.form_error = None;
                        self.section = Section::Dashboard;
                    }
                    Err(err) => {
                        tracing::debug!("Rejected transaction form: {err}");
                        self.form_error = Some(err);
                    }
                }
            }
            Action::Delete(id) => match self.repository.remove(id, store) {
                Ok(true) => tracing::info!(id, "Deleted transaction"),
                Ok(false) => tracing::debug!(id, "No transaction to delete"),
                Err(err) => tracing::error!("Could not save transactions: {err}"),
            },
            Action::ClearAll => {
                let count = self.repository.len();
                if let Err(err) = self.repository.clear(store) {
                    tracing::error!("Could not save transactions: {err}");
                }
                tracing::info!(count, "Cleared all transactions");
            }
            Action::ToggleTheme => {
                self.settings.dark_mode = !self.settings.dark_mode;
                if let Err(err) = self.settings.save_dark_mode(store) {
                    tracing::error!("Could not save theme: {err}");
                }
                tracing::info!(
                    "Theme toggled: {}",
                    if self.settings.dark_mode { "dark" } else { "light" }
                );
            }
            Action::SetCurrency(symbol) => {
                if !is_supported_currency(&symbol) {
                    tracing::warn!("Ignoring unsupported currency {symbol:?}");
                    return;
                }
                self.settings.currency = symbol;
                if let Err(err) = self.settings.save_currency(store) {
                    tracing::error!("Could not save currency: {err}");
                }
            }
            Action::SetMonthlyBudget(raw) => {
                self.settings.monthly_budget = parse_threshold(&raw, DEFAULT_MONTHLY_BUDGET);
                if let Err(err) = self.settings.save_monthly_budget(store) {
                    tracing::error!("Could not save monthly budget: {err}");
                }
            }
            Action::SetIncomeGoal(raw) => {
                self.settings.income_goal = parse_threshold(&raw, DEFAULT_INCOME_GOAL);
                if let Err(err) = self.settings.save_income_goal(store) {
                    tracing::error!("Could not save income goal: {err}");
                }
            }
        }
    }
}

impl Reducible for FinanceTracker {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action, Utc::now().timestamp_millis());
        Rc::new(next)
    }
}

/// The current calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::NaiveDate;

    use crate::{
        error::DraftError,
        model::{TransactionDraft, TransactionType},
        settings::DEFAULT_MONTHLY_BUDGET,
        storage::{
            KeyValueStore, MemoryStore, CURRENCY_KEY, DARK_MODE_KEY, INCOME_GOAL_KEY,
            MONTHLY_BUDGET_KEY,
        },
    };

    use super::{Action, FinanceTracker, Section};

    const NOW: i64 = 1_704_153_600_000;

    fn draft(amount: &str, kind: TransactionType, category: &str, date: &str) -> TransactionDraft {
        TransactionDraft {
            amount: amount.to_string(),
            kind,
            category: category.to_string(),
            date: date.to_string(),
        }
    }

    fn tracker() -> (Rc<MemoryStore>, FinanceTracker) {
        let store = Rc::new(MemoryStore::new());
        let tracker = FinanceTracker::load(store.clone());
        (store, tracker)
    }

    #[test]
    fn starts_on_the_dashboard_with_defaults() {
        let (_, tracker) = tracker();

        assert_eq!(tracker.section(), Section::Dashboard);
        assert!(tracker.repository().is_empty());
        assert!(tracker.settings().dark_mode);
    }

    #[test]
    fn submit_adds_persists_and_returns_to_dashboard() {
        let (store, mut tracker) = tracker();
        tracker.apply(Action::Navigate(Section::Transactions), NOW);

        tracker.apply(
            Action::Submit(draft("100", TransactionType::Income, "Salary", "2024-01-01")),
            NOW,
        );
        tracker.apply(
            Action::Submit(draft("40", TransactionType::Expense, "food", "2024-01-02")),
            NOW,
        );

        assert_eq!(tracker.section(), Section::Dashboard);
        assert_eq!(tracker.form_error(), None);

        let view = tracker.view(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(view.totals.income, 100.0);
        assert_eq!(view.totals.expenses, 40.0);
        assert_eq!(view.totals.balance, 60.0);

        let reloaded = FinanceTracker::load(store);
        assert_eq!(reloaded.repository(), tracker.repository());
    }

    #[test]
    fn submissions_in_the_same_millisecond_get_distinct_ids() {
        let (_, mut tracker) = tracker();

        for _ in 0..3 {
            tracker.apply(
                Action::Submit(draft("1", TransactionType::Expense, "Food", "2024-01-01")),
                NOW,
            );
        }

        let ids: Vec<i64> = tracker
            .repository()
            .transactions()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![NOW, NOW + 1, NOW + 2]);
    }

    #[test]
    fn invalid_submission_keeps_state_and_reports_error() {
        let (_, mut tracker) = tracker();
        tracker.apply(Action::Navigate(Section::Transactions), NOW);

        tracker.apply(
            Action::Submit(draft("abc", TransactionType::Expense, "Food", "2024-01-01")),
            NOW,
        );

        assert!(tracker.repository().is_empty());
        assert_eq!(tracker.section(), Section::Transactions);
        assert_eq!(tracker.form_error(), Some(&DraftError::InvalidAmount));

        tracker.apply(Action::Navigate(Section::Dashboard), NOW);
        assert_eq!(tracker.form_error(), None);
    }

    #[test]
    fn delete_and_clear() {
        let (_, mut tracker) = tracker();
        for _ in 0..3 {
            tracker.apply(
                Action::Submit(draft("5", TransactionType::Expense, "Food", "2024-01-01")),
                NOW,
            );
        }

        tracker.apply(Action::Delete(NOW + 1), NOW);
        assert_eq!(tracker.repository().len(), 2);

        tracker.apply(Action::Delete(12345), NOW);
        assert_eq!(tracker.repository().len(), 2);

        tracker.apply(Action::ClearAll, NOW);
        assert!(tracker.repository().is_empty());
    }

    #[test]
    fn settings_changes_are_persisted() {
        let (store, mut tracker) = tracker();

        tracker.apply(Action::ToggleTheme, NOW);
        tracker.apply(Action::SetCurrency("€".to_string()), NOW);
        tracker.apply(Action::SetMonthlyBudget("0".to_string()), NOW);
        tracker.apply(Action::SetIncomeGoal("2500".to_string()), NOW);

        assert!(!tracker.settings().dark_mode);
        assert_eq!(tracker.settings().monthly_budget, DEFAULT_MONTHLY_BUDGET);
        assert_eq!(store.get(DARK_MODE_KEY), Ok(Some("false".to_string())));
        assert_eq!(store.get(CURRENCY_KEY), Ok(Some("€".to_string())));
        assert_eq!(store.get(MONTHLY_BUDGET_KEY), Ok(Some("5000".to_string())));
        assert_eq!(store.get(INCOME_GOAL_KEY), Ok(Some("2500".to_string())));

        let reloaded = FinanceTracker::load(store);
        assert_eq!(reloaded.settings(), tracker.settings());
    }

    #[test]
    fn unsupported_currency_is_ignored() {
        let (store, mut tracker) = tracker();
        tracker.apply(Action::SetCurrency("£".to_string()), NOW);

        tracker.apply(Action::SetCurrency("X$".to_string()), NOW);
        tracker.apply(Action::SetCurrency(String::new()), NOW);

        assert_eq!(tracker.settings().currency, "£");
        assert_eq!(store.get(CURRENCY_KEY), Ok(Some("£".to_string())));
    }

    #[test]
    fn progress_follows_the_goals() {
        let (_, mut tracker) = tracker();
        tracker.apply(Action::SetIncomeGoal("200".to_string()), NOW);
        tracker.apply(
            Action::Submit(draft("500", TransactionType::Income, "Salary", "2024-01-01")),
            NOW,
        );
        tracker.apply(
            Action::Submit(draft("1250", TransactionType::Expense, "Rent", "2024-01-01")),
            NOW,
        );

        let view = tracker.view(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(view.progress.income_percent, 100.0);
        assert_eq!(view.progress.expense_percent, 25.0);
        assert_eq!(view.income_progress_label, "100.0% of goal ($200)");
    }
}

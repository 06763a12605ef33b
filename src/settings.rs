use crate::{
    error::StorageError,
    storage::{
        KeyValueStore, CURRENCY_KEY, DARK_MODE_KEY, INCOME_GOAL_KEY, MONTHLY_BUDGET_KEY,
    },
};

pub const DEFAULT_CURRENCY: &str = "$";
pub const DEFAULT_MONTHLY_BUDGET: f64 = 5000.0;
pub const DEFAULT_INCOME_GOAL: f64 = 10000.0;

/// Currency symbols offered by the settings page, with their labels.
pub const CURRENCIES: [(&str, &str); 5] = [
    ("$", "USD ($)"),
    ("€", "EUR (€)"),
    ("£", "GBP (£)"),
    ("¥", "JPY (¥)"),
    ("₱", "PHP (₱)"),
];

/// Whether `symbol` is one of [CURRENCIES].
pub fn is_supported_currency(symbol: &str) -> bool {
    CURRENCIES.iter().any(|(supported, _)| *supported == symbol)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub currency: String,
    pub dark_mode: bool,
    pub monthly_budget: f64,
    pub income_goal: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            dark_mode: true,
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
            income_goal: DEFAULT_INCOME_GOAL,
        }
    }
}

impl Settings {
    /// Read each setting from its own key, falling back to the default for
    /// anything missing, unreadable or invalid.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let read = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{err}");
                None
            }
        };

        let currency = match read(CURRENCY_KEY) {
            Some(symbol) if is_supported_currency(&symbol) => symbol,
            Some(symbol) => {
                tracing::warn!("Stored currency {symbol:?} is not supported, using {DEFAULT_CURRENCY}");
                DEFAULT_CURRENCY.to_string()
            }
            None => DEFAULT_CURRENCY.to_string(),
        };
        // Only an explicit "false" selects the light theme.
        let dark_mode = read(DARK_MODE_KEY).as_deref() != Some("false");
        let monthly_budget = read(MONTHLY_BUDGET_KEY)
            .map(|raw| parse_threshold(&raw, DEFAULT_MONTHLY_BUDGET))
            .unwrap_or(DEFAULT_MONTHLY_BUDGET);
        let income_goal = read(INCOME_GOAL_KEY)
            .map(|raw| parse_threshold(&raw, DEFAULT_INCOME_GOAL))
            .unwrap_or(DEFAULT_INCOME_GOAL);

        Self {
            currency,
            dark_mode,
            monthly_budget,
            income_goal,
        }
    }

    pub fn save_currency(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(CURRENCY_KEY, &self.currency)
    }

    pub fn save_dark_mode(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })
    }

    pub fn save_monthly_budget(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(MONTHLY_BUDGET_KEY, &self.monthly_budget.to_string())
    }

    pub fn save_income_goal(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(INCOME_GOAL_KEY, &self.income_goal.to_string())
    }
}

/// Parse a budget or goal entered by the user. Text that is not a positive,
/// finite number yields `default`.
pub fn parse_threshold(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{
        KeyValueStore, MemoryStore, CURRENCY_KEY, DARK_MODE_KEY, INCOME_GOAL_KEY,
        MONTHLY_BUDGET_KEY,
    };

    use super::{
        is_supported_currency, parse_threshold, Settings, CURRENCIES, DEFAULT_CURRENCY,
        DEFAULT_INCOME_GOAL, DEFAULT_MONTHLY_BUDGET,
    };

    #[test]
    fn empty_store_gives_defaults() {
        let settings = Settings::load(&MemoryStore::new());

        assert_eq!(settings, Settings::default());
        assert!(settings.dark_mode);
        assert_eq!(settings.currency, "$");
    }

    #[test]
    fn stored_values_are_loaded() {
        let store = MemoryStore::new();
        store.set(CURRENCY_KEY, "€").unwrap();
        store.set(DARK_MODE_KEY, "false").unwrap();
        store.set(MONTHLY_BUDGET_KEY, "1200.5").unwrap();
        store.set(INCOME_GOAL_KEY, "abc").unwrap();

        let settings = Settings::load(&store);

        assert_eq!(settings.currency, "€");
        assert!(!settings.dark_mode);
        assert_eq!(settings.monthly_budget, 1200.5);
        assert_eq!(settings.income_goal, DEFAULT_INCOME_GOAL);
    }

    #[test]
    fn unsupported_currency_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(CURRENCY_KEY, "X$").unwrap();
        assert_eq!(Settings::load(&store).currency, DEFAULT_CURRENCY);

        store.set(CURRENCY_KEY, "").unwrap();
        assert_eq!(Settings::load(&store).currency, DEFAULT_CURRENCY);

        assert!(CURRENCIES.iter().all(|(symbol, _)| is_supported_currency(symbol)));
        assert!(!is_supported_currency(" €"));
    }

    #[test]
    fn anything_but_false_means_dark_mode() {
        let store = MemoryStore::new();
        store.set(DARK_MODE_KEY, "no").unwrap();

        assert!(Settings::load(&store).dark_mode);
    }

    #[test]
    fn saved_settings_round_trip_through_the_store() {
        let store = MemoryStore::new();
        let settings = Settings {
            currency: "£".to_string(),
            dark_mode: false,
            monthly_budget: 750.0,
            income_goal: 3000.0,
        };

        settings.save_currency(&store).unwrap();
        settings.save_dark_mode(&store).unwrap();
        settings.save_monthly_budget(&store).unwrap();
        settings.save_income_goal(&store).unwrap();

        assert_eq!(Settings::load(&store), settings);
        assert_eq!(store.get(MONTHLY_BUDGET_KEY), Ok(Some("750".to_string())));
    }

    #[test]
    fn non_positive_thresholds_fall_back_to_default() {
        assert_eq!(parse_threshold(" 2500 ", DEFAULT_MONTHLY_BUDGET), 2500.0);
        assert_eq!(parse_threshold("0", DEFAULT_MONTHLY_BUDGET), DEFAULT_MONTHLY_BUDGET);
        assert_eq!(parse_threshold("-10", DEFAULT_MONTHLY_BUDGET), DEFAULT_MONTHLY_BUDGET);
        assert_eq!(parse_threshold("", DEFAULT_INCOME_GOAL), DEFAULT_INCOME_GOAL);
        assert_eq!(parse_threshold("NaN", DEFAULT_INCOME_GOAL), DEFAULT_INCOME_GOAL);
    }
}

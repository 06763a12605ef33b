use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::{
    animation::{
        bar_style, slide_in_style, use_count_up, use_reveal, BAR_STAGGER_MS, ROW_STAGGER_MS,
    },
    icons::{icon_credit_card, icon_trending_up, icon_wallet},
    model::{TransactionDraft, TransactionType},
    settings::{Settings, CURRENCIES},
    tracker::{today, Action},
    view_model::{format_currency, CategoryBar, DashboardView, TransactionRow},
};

const CATEGORY_SUGGESTIONS: [&str; 9] = [
    "Food",
    "Transport",
    "Housing",
    "Utilities",
    "Entertainment",
    "Health",
    "Shopping",
    "Salary",
    "Other",
];

const CLEAR_ALL_PROMPT: &str =
    "Are you sure you want to delete all transactions? This cannot be undone.";

pub fn page_shell(title: &'static str, children: Html) -> Html {
    html! {
        <section class="content-section active">
            <div class="section-header">
                <h1>{ title }</h1>
            </div>
            <div class="section-body">
                { children }
            </div>
        </section>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum StatIcon {
    Wallet,
    UpRight,
    CreditCard,
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: &'static str,
    value: String,
    icon: StatIcon,
    #[prop_or_default]
    class: Classes,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class={classes!("stat-card", props.class.clone())}>
            <div>
                <p class="stat-title">{ props.title }</p>
                <h3 class="stat-value">{ props.value.clone() }</h3>
            </div>
            <div class="stat-icon">
                {
                    match props.icon {
                        StatIcon::Wallet => icon_wallet(),
                        StatIcon::UpRight => icon_trending_up(),
                        StatIcon::CreditCard => icon_credit_card(),
                    }
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub view: DashboardView,
    pub on_action: Callback<Action>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardProps) -> Html {
    let view = &props.view;
    let balance = use_count_up(view.totals.balance);

    html! {
        { page_shell(
            "Dashboard",
            html! {
                <>
                    <div class="stat-grid">
                        <StatCard title="Total Balance" value={format_currency(balance, &view.currency)} icon={StatIcon::Wallet} />
                        <StatCard title="Total Income" value={view.income_label.clone()} icon={StatIcon::UpRight} class={classes!("delay-200")} />
                        <StatCard title="Total Expenses" value={view.expenses_label.clone()} icon={StatIcon::CreditCard} class={classes!("delay-400")} />
                    </div>

                    <div class="quick-stats">
                        <div class="quick-stat">
                            <span class="quick-stat-label">{"Spent today"}</span>
                            <span class="quick-stat-value">{ view.today_label.clone() }</span>
                        </div>
                        <div class="quick-stat">
                            <span class="quick-stat-label">{"Spent this week"}</span>
                            <span class="quick-stat-value">{ view.week_label.clone() }</span>
                        </div>
                    </div>

                    <GoalProgress
                        income_percent={view.progress.income_percent}
                        expense_percent={view.progress.expense_percent}
                        income_label={view.income_progress_label.clone()}
                        expense_label={view.expense_progress_label.clone()}
                    />

                    <RecentTransactions rows={view.rows.clone()} on_action={props.on_action.clone()} />
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
struct GoalProgressProps {
    income_percent: f64,
    expense_percent: f64,
    income_label: String,
    expense_label: String,
}

#[function_component(GoalProgress)]
fn goal_progress(props: &GoalProgressProps) -> Html {
    let revealed = use_reveal((props.income_percent, props.expense_percent));
    let width = |percent: f64, delay_ms: u32| {
        let percent = if revealed { percent } else { 0.0 };
        format!("width: {percent}%; transition: width 0.8s ease {delay_ms}ms;")
    };

    html! {
        <div class="card progress-card">
            <div class="progress-row">
                <div class="progress-row-header">
                    <span>{"Income goal"}</span>
                    <span id="income-label" class="progress-label">{ props.income_label.clone() }</span>
                </div>
                <div class="progress-bar">
                    <div id="income-progress" class="progress-fill income" style={width(props.income_percent, 100)}></div>
                </div>
            </div>
            <div class="progress-row">
                <div class="progress-row-header">
                    <span>{"Monthly budget"}</span>
                    <span id="expense-label" class="progress-label">{ props.expense_label.clone() }</span>
                </div>
                <div class="progress-bar">
                    <div id="expense-progress" class="progress-fill expense" style={width(props.expense_percent, 200)}></div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RecentTransactionsProps {
    rows: Vec<TransactionRow>,
    on_action: Callback<Action>,
}

#[function_component(RecentTransactions)]
fn recent_transactions(props: &RecentTransactionsProps) -> Html {
    let revealed = use_reveal(props.rows.clone());

    html! {
        <div class="card">
            <div class="card-header">
                <h3>{"Recent Transactions"}</h3>
            </div>
            <table class="transactions-table">
                <thead>
                    <tr>
                        <th>{"Date"}</th>
                        <th>{"Category"}</th>
                        <th>{"Amount"}</th>
                        <th>{"Type"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody id="transactions-body">
                    { if props.rows.is_empty() {
                        html! { <tr><td colspan="5" class="empty">{"No transactions yet."}</td></tr> }
                    } else {
                        html! {
                            <>
                                { for props.rows.iter().enumerate().map(|(index, row)| {
                                    let on_delete = {
                                        let on_action = props.on_action.clone();
                                        let id = row.id;
                                        Callback::from(move |_| on_action.emit(Action::Delete(id)))
                                    };

                                    html! {
                                        <tr key={row.id.to_string()} style={slide_in_style(revealed, index, ROW_STAGGER_MS)}>
                                            <td>{ row.date.clone() }</td>
                                            <td>{ row.category.clone() }</td>
                                            <td>{ row.amount_label.clone() }</td>
                                            <td class={row.type_class}>{ row.type_label.clone() }</td>
                                            <td>
                                                <button type="button" class="delete-btn" aria-label="Delete transaction" onclick={on_delete}>{"✕"}</button>
                                            </td>
                                        </tr>
                                    }
                                }) }
                            </>
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub currency: String,
    pub error: Option<String>,
    pub on_action: Callback<Action>,
}

/// The entry form. Its fields reset whenever it is mounted, which happens
/// each time the user comes back to this section.
#[function_component(TransactionFormPage)]
pub fn transaction_form_page(props: &TransactionFormProps) -> Html {
    let form_amount = use_state(|| "".to_string());
    let form_type = use_state(|| TransactionType::Expense);
    let form_category = use_state(|| "".to_string());
    let form_date = use_state(|| today().format("%Y-%m-%d").to_string());

    let on_submit = {
        let form_amount = form_amount.clone();
        let form_type = form_type.clone();
        let form_category = form_category.clone();
        let form_date = form_date.clone();
        let on_action = props.on_action.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_action.emit(Action::Submit(TransactionDraft {
                amount: (*form_amount).clone(),
                kind: *form_type,
                category: (*form_category).clone(),
                date: (*form_date).clone(),
            }));
        })
    };

    let on_amount_input = {
        let form_amount = form_amount.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                form_amount.set(input.value());
            }
        })
    };

    let on_type_change = {
        let form_type = form_type.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form_type.set(TransactionType::from_form_value(&select.value()));
        })
    };

    let on_category_input = {
        let form_category = form_category.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                form_category.set(input.value());
            }
        })
    };

    let on_date_input = {
        let form_date = form_date.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                form_date.set(input.value());
            }
        })
    };

    let is_income = *form_type == TransactionType::Income;

    html! {
        { page_shell(
            "Add Transaction",
            html! {
                <form id="transaction-form" class="card transaction-form" onsubmit={on_submit}>
                    <label for="amount">{ format!("Amount ({})", props.currency) }</label>
                    <input id="amount" type="number" step="0.01" min="0" placeholder="0.00" value={(*form_amount).clone()} oninput={on_amount_input} />

                    <label for="type">{"Type"}</label>
                    <select id="type" onchange={on_type_change}>
                        <option value="expense" selected={!is_income}>{"Expense"}</option>
                        <option value="income" selected={is_income}>{"Income"}</option>
                    </select>

                    <label for="category">{"Category"}</label>
                    <input id="category" list="category-options" placeholder="e.g. Food" value={(*form_category).clone()} oninput={on_category_input} />
                    <datalist id="category-options">
                        { for CATEGORY_SUGGESTIONS.iter().map(|c| html! { <option value={*c} /> }) }
                    </datalist>

                    <label for="date">{"Date"}</label>
                    <input id="date" type="date" value={(*form_date).clone()} oninput={on_date_input} />

                    {
                        if let Some(msg) = &props.error {
                            html! { <p class="form-error">{ msg.clone() }</p> }
                        } else {
                            html! {}
                        }
                    }

                    <button type="submit" class="primary-btn">{"Add Transaction"}</button>
                </form>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
pub struct AnalyticsProps {
    pub categories: Vec<CategoryBar>,
}

#[function_component(AnalyticsPage)]
pub fn analytics_page(props: &AnalyticsProps) -> Html {
    let revealed = use_reveal(props.categories.clone());

    html! {
        { page_shell(
            "Analytics",
            html! {
                <>
                    <div class="card">
                        <div class="card-header">
                            <h3>{"Spending by Category"}</h3>
                        </div>
                        <div id="category-chart" class="chart">
                            { if props.categories.is_empty() {
                                html! { <p class="chart-empty">{"No expense data available yet"}</p> }
                            } else {
                                html! {
                                    <>
                                        { for props.categories.iter().enumerate().map(|(index, bar)| {
                                            let wrapper_style = if revealed {
                                                format!("opacity: 1; transition: opacity 0.5s ease {}ms;", index as u32 * BAR_STAGGER_MS)
                                            } else {
                                                "opacity: 0;".to_string()
                                            };

                                            html! {
                                                <div key={bar.category.clone()} class="chart-bar-wrapper" style={wrapper_style}>
                                                    <div class="chart-bar" style={bar_style(revealed, index, bar.height_percent)}>
                                                        <span class="chart-value">{ bar.bar_label.clone() }</span>
                                                    </div>
                                                    <span class="chart-label" title={bar.category.clone()}>{ bar.category.clone() }</span>
                                                </div>
                                            }
                                        }) }
                                    </>
                                }
                            }}
                        </div>
                    </div>

                    <div class="card">
                        <div class="card-header">
                            <h3>{"Monthly Summary"}</h3>
                        </div>
                        <div id="monthly-summary-list">
                            { for props.categories.iter().enumerate().map(|(index, bar)| {
                                let width = if revealed { bar.height_percent } else { 0.0 };
                                html! {
                                    <div key={bar.category.clone()} class="summary-item">
                                        <div class="summary-item-header">
                                            <span>{ bar.category.clone() }</span>
                                            <span class="summary-amount">{ bar.summary_label.clone() }</span>
                                        </div>
                                        <div class="progress-bar">
                                            <div class="progress-fill" style={format!("width: {width}%; transition: width 0.8s ease {}ms;", index as u32 * BAR_STAGGER_MS)}></div>
                                        </div>
                                    </div>
                                }
                            }) }
                        </div>
                    </div>
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
pub struct SettingsProps {
    pub settings: Settings,
    pub on_action: Callback<Action>,
}

#[function_component(SettingsPage)]
pub fn settings_page(props: &SettingsProps) -> Html {
    let settings = &props.settings;

    let on_toggle_theme = {
        let on_action = props.on_action.clone();
        Callback::from(move |_| on_action.emit(Action::ToggleTheme))
    };

    let on_currency_change = {
        let on_action = props.on_action.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_action.emit(Action::SetCurrency(select.value()));
        })
    };

    let on_budget_change = {
        let on_action = props.on_action.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_action.emit(Action::SetMonthlyBudget(input.value()));
        })
    };

    let on_goal_change = {
        let on_action = props.on_action.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_action.emit(Action::SetIncomeGoal(input.value()));
        })
    };

    let on_clear_all = {
        let on_action = props.on_action.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .and_then(|window| window.confirm_with_message(CLEAR_ALL_PROMPT).ok())
                .unwrap_or(false);
            if confirmed {
                on_action.emit(Action::ClearAll);
            }
        })
    };

    html! {
        { page_shell(
            "Settings",
            html! {
                <div class="settings-grid">
                    <div class="card">
                        <h2>{"Appearance"}</h2>
                        <button id="theme-toggle" type="button" class="secondary-btn" onclick={on_toggle_theme}>
                            { if settings.dark_mode { "Switch to Light Mode" } else { "Switch to Dark Mode" } }
                        </button>
                    </div>

                    <div class="card">
                        <h2>{"Preferences"}</h2>
                        <label for="currency-selector">{"Currency"}</label>
                        <select id="currency-selector" onchange={on_currency_change}>
                            { for CURRENCIES.iter().map(|(symbol, label)| html! {
                                <option value={*symbol} selected={settings.currency == *symbol}>{ *label }</option>
                            }) }
                        </select>

                        <label for="monthly-budget">{"Monthly budget"}</label>
                        <input id="monthly-budget" type="number" min="0" step="0.01" value={settings.monthly_budget.to_string()} onchange={on_budget_change} />

                        <label for="income-goal">{"Income goal"}</label>
                        <input id="income-goal" type="number" min="0" step="0.01" value={settings.income_goal.to_string()} onchange={on_goal_change} />
                    </div>

                    <div class="card danger-zone">
                        <h2>{"Danger Zone"}</h2>
                        <p>{"Delete every stored transaction. Settings are kept."}</p>
                        <button id="clear-all-btn" type="button" class="danger-btn" onclick={on_clear_all}>{"Clear All Transactions"}</button>
                    </div>
                </div>
            }
        ) }
    }
}

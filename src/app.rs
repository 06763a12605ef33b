use yew::prelude::*;

use crate::{
    icons::{icon_bar_chart, icon_layout_grid, icon_plus, icon_settings},
    pages::{AnalyticsPage, DashboardPage, SettingsPage, TransactionFormPage},
    tracker::{today, Action, FinanceTracker, Section},
};

struct NavItem {
    section: Section,
    icon: fn() -> Html,
}

const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        section: Section::Dashboard,
        icon: icon_layout_grid,
    },
    NavItem {
        section: Section::Transactions,
        icon: icon_plus,
    },
    NavItem {
        section: Section::Analytics,
        icon: icon_bar_chart,
    },
    NavItem {
        section: Section::Settings,
        icon: icon_settings,
    },
];

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active: Section,
    on_action: Callback<Action>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    html! {
        <nav class="sidebar">
            <div class="brand">{"Pocket Ledger"}</div>
            { for NAV_ITEMS.iter().map(|item| {
                let is_active = item.section == props.active;
                let on_action = props.on_action.clone();
                let section = item.section;

                html! {
                    <button
                        type="button"
                        class={classes!("nav-btn", is_active.then_some("active"))}
                        onclick={Callback::from(move |_| on_action.emit(Action::Navigate(section)))}
                    >
                        <span class="nav-icon">{ (item.icon)() }</span>
                        <span>{ item.section.label() }</span>
                    </button>
                }
            }) }
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    dark_mode: bool,
    on_action: Callback<Action>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let on_toggle = {
        let on_action = props.on_action.clone();
        Callback::from(move |_| on_action.emit(Action::ToggleTheme))
    };

    html! {
        <header class="app-header">
            <div class="spacer"></div>
            <button id="theme-toggle-header" type="button" class="icon-btn" aria-label="Toggle theme" onclick={on_toggle}>
                { if props.dark_mode { "🌙" } else { "☀️" } }
            </button>
        </header>
    }
}

fn apply_theme(dark_mode: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        tracing::warn!("No document body to apply the theme to");
        return;
    };

    body.set_class_name(if dark_mode { "dark-mode" } else { "light-mode" });
}

#[function_component(App)]
pub fn app() -> Html {
    let tracker = use_reducer(FinanceTracker::open_browser);
    let dark_mode = tracker.settings().dark_mode;

    use_effect_with_deps(
        move |dark_mode| {
            apply_theme(*dark_mode);
            || ()
        },
        dark_mode,
    );

    let on_action = {
        let tracker = tracker.clone();
        Callback::from(move |action: Action| tracker.dispatch(action))
    };

    let content = match tracker.section() {
        Section::Dashboard => html! {
            <DashboardPage view={tracker.view(today())} on_action={on_action.clone()} />
        },
        Section::Transactions => html! {
            <TransactionFormPage
                currency={tracker.settings().currency.clone()}
                error={tracker.form_error().map(|err| err.to_string())}
                on_action={on_action.clone()}
            />
        },
        Section::Analytics => html! {
            <AnalyticsPage categories={tracker.view(today()).categories} />
        },
        Section::Settings => html! {
            <SettingsPage settings={tracker.settings().clone()} on_action={on_action.clone()} />
        },
    };

    html! {
        <div class="layout">
            <Sidebar active={tracker.section()} on_action={on_action.clone()} />
            <div class="main">
                <Header dark_mode={dark_mode} on_action={on_action} />
                <main class="content">
                    { content }
                </main>
            </div>
        </div>
    }
}

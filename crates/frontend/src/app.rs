use crate::shared::config::ConsoleConfig;
use crate::system::sql_console::ui::SqlConsolePage;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App(config: ConsoleConfig) -> impl IntoView {
    // REST base URL and log level for every page
    provide_context(config);

    view! {
        <ConfigProvider>
            <SqlConsolePage />
        </ConfigProvider>
    }
}

use aedemo::view::{View, NAV_ITEMS};
use leptos::prelude::*;

use super::{Toast, ToastLevel};
use crate::ui_model::{nav_class, APP_SUBTITLE, APP_TITLE, BRAND_MARK, FOOTER};

#[component]
pub(super) fn Topbar(
    active: ReadSignal<View>,
    status: ReadSignal<String>,
    is_running: ReadSignal<bool>,
    navigate: Callback<View>,
) -> impl IntoView {
    view! {
        <header class="app-header">
            <div class="app-header-left">
                <div class="brand-mark" aria-hidden="true">{BRAND_MARK}</div>
                <div>
                    <h1 class="brand">{APP_TITLE}</h1>
                    <p class="subtle">{APP_SUBTITLE}</p>
                </div>
            </div>
            <nav class="app-header-right">
                {NAV_ITEMS
                    .iter()
                    .map(|item| {
                        let target = item.view;
                        view! {
                            <button
                                class=move || nav_class(active.get(), target)
                                on:click=move |_| navigate.run(target)
                            >
                                {item.label}
                            </button>
                        }
                    })
                    .collect_view()}
                <span class="status">{move || status.get()}</span>
                <Show when=move || is_running.get()>
                    <span class="live-dot" title="Training"></span>
                </Show>
            </nav>
        </header>
    }
}

#[component]
pub(super) fn ToastStack(toasts: RwSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toast-stack" aria-live="polite" aria-relevant="additions removals">
            <For
                each=move || toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    let class = match t.level {
                        ToastLevel::Info => "toast info",
                        ToastLevel::Success => "toast success",
                        ToastLevel::Error => "toast error",
                    };
                    view! {
                        <div class=class>
                            <div style="flex: 1; white-space: pre-wrap;">{t.message}</div>
                            <button
                                class="toast-close"
                                title="Dismiss"
                                on:click=move |_| toasts.update(|ts| ts.retain(|x| x.id != id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
pub(super) fn Footer() -> impl IntoView {
    view! {
        <footer class="app-footer">
            <p>{FOOTER[0]}</p>
            <p>{FOOTER[1]}</p>
            <p class="subtle">{FOOTER[2]}</p>
        </footer>
    }
}

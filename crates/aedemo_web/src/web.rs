use std::time::Duration;

use aedemo::config::DemoConfig;
use aedemo::controller::{DemoController, TickOutcome};
use aedemo::error::{DemoError, DemoResult};
use aedemo::evaluation::EvaluationReport;
use aedemo::preview::{
    LoadedDataset, PREPROCESS_STEPS, SAMPLE_CSV, SAMPLE_CSV_FILENAME, SAMPLE_CSV_MIME,
};
use aedemo::schedule::{Tick, TickHandle, TickScheduler};
use aedemo::trainer::EpochRecord;
use aedemo::view::View;
use leptos::html;
use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod charts;
mod files;
mod shell;

use crate::ui_model::{
    looks_like_csv, loss_series, mae_bars, metric_text, progress_width, view_subtitle,
    ARCHITECTURE, IMPLEMENTATION_NOTES, LANDING_FEATURES, LANDING_INTRO, MAE_CAPTION,
    QUICK_START, SIMULATION_NOTE, TRAIN_COLOR, UPLOAD_EMPTY, UPLOAD_EMPTY_HINT, UPLOAD_OK,
    UPLOAD_NEXT, UPLOAD_REJECTED, VAL_COLOR,
};
use shell::{Footer, ToastStack, Topbar};

const CHART_BG: &str = "#0f172a";
const CHART_GRID: &str = "rgba(255,255,255,0.1)";
const MAX_TOASTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug)]
struct Toast {
    id: u64,
    level: ToastLevel,
    message: String,
}

/// `setInterval` registration owned by the controller while a run is active.
struct IntervalHandle {
    id: Option<i32>,
}

impl TickHandle for IntervalHandle {
    fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(w) = web_sys::window() {
                w.clear_interval_with_handle(id);
            }
        }
    }
}

struct IntervalScheduler<F> {
    on_tick: F,
}

impl<F> TickScheduler for IntervalScheduler<F>
where
    F: Fn(Tick) + Clone + 'static,
{
    type Handle = IntervalHandle;

    fn schedule(&mut self, period: Duration, run_id: u64) -> DemoResult<IntervalHandle> {
        let window =
            web_sys::window().ok_or_else(|| DemoError::Scheduler("no window".to_string()))?;

        let on_tick = self.on_tick.clone();
        let cb = Closure::wrap(Box::new(move || {
            on_tick(Tick { run_id });
        }) as Box<dyn FnMut()>);

        let ms = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ms,
            )
            .map_err(|_| DemoError::Scheduler("failed to start interval".to_string()))?;
        // One closure leaks per started run. Stale callbacks after
        // clearInterval are dropped by run id.
        cb.forget();
        Ok(IntervalHandle { id: Some(id) })
    }
}

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let demo = StoredValue::new(DemoController::<IntervalHandle>::new(DemoConfig::default()));

    let (active, set_active) = signal(View::Landing);
    let (progress, set_progress) = signal(0u8);
    let (history, set_history) = signal(Vec::<EpochRecord>::new());
    let (dataset, set_dataset) = signal::<Option<LoadedDataset>>(None);
    let (report, set_report) = signal(EvaluationReport::default());
    let (is_running, set_is_running) = signal(false);
    let (status, set_status) = signal(String::new());
    let toasts = RwSignal::new(Vec::<Toast>::new());
    let next_toast_id = StoredValue::new(0u64);

    let push_toast = move |level: ToastLevel, message: String| {
        let mut id = 0;
        next_toast_id.update_value(|n| {
            *n += 1;
            id = *n;
        });
        toasts.update(|ts| {
            ts.push(Toast { id, level, message });
            if ts.len() > MAX_TOASTS {
                ts.remove(0);
            }
        });
    };

    let refresh = move || {
        demo.with_value(|d| {
            set_active.set(d.view());
            set_progress.set(d.progress());
            set_history.set(d.history().to_vec());
            set_dataset.set(d.dataset().cloned());
            set_report.set(d.report().clone());
            set_is_running.set(d.trainer().is_running());
        });
    };

    let deliver_tick = move |tick: Tick| {
        let mut outcome = TickOutcome::Ignored;
        demo.update_value(|d| outcome = d.on_tick(tick));
        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Advanced(r) => {
                refresh();
                set_status.set(format!("epoch {}", r.epoch));
            }
            TickOutcome::Completed(r) => {
                refresh();
                set_status.set(format!("trained {} epochs", r.epoch));
                push_toast(ToastLevel::Success, "Training complete".to_string());
            }
        }
    };

    let navigate = Callback::new(move |target: View| {
        let mut sched = IntervalScheduler {
            on_tick: deliver_tick,
        };
        let mut res = Ok(());
        demo.update_value(|d| res = d.go_to(target, &mut sched));
        match res {
            Ok(()) => {
                refresh();
                if target == View::Train {
                    set_status.set("training".to_string());
                }
            }
            Err(e) => push_toast(ToastLevel::Error, e.to_string()),
        }
    });

    let on_file = Callback::new(move |ev: web_sys::Event| {
        let Some(file) = files::first_selected_file(&ev) else {
            return;
        };
        let name = file.name();
        if !looks_like_csv(&name) {
            push_toast(ToastLevel::Info, format!("{name} is not a .csv file"));
        }
        wasm_bindgen_futures::spawn_local(async move {
            let text = match files::read_file_text(file).await {
                Ok(text) => text,
                Err(e) => {
                    push_toast(ToastLevel::Error, e);
                    return;
                }
            };
            let mut sched = IntervalScheduler {
                on_tick: deliver_tick,
            };
            let mut res = Ok(());
            demo.update_value(|d| res = d.load_csv(Some(name.clone()), &text, &mut sched));
            refresh();
            match res {
                Ok(()) => set_status.set(format!("loaded {name}")),
                Err(DemoError::MalformedInput) => {
                    push_toast(ToastLevel::Error, UPLOAD_REJECTED.to_string())
                }
                Err(e) => push_toast(ToastLevel::Error, e.to_string()),
            }
        });
    });

    let on_sample = Callback::new(move |()| {
        match files::download_text(SAMPLE_CSV_FILENAME, SAMPLE_CSV_MIME, SAMPLE_CSV) {
            Ok(()) => set_status.set(format!("downloaded {SAMPLE_CSV_FILENAME}")),
            Err(e) => push_toast(ToastLevel::Error, format!("download failed: {e}")),
        }
    });

    let on_export = Callback::new(move |()| {
        let notice = demo.with_value(|d| d.export_results());
        push_toast(ToastLevel::Info, notice.to_string());
    });

    on_cleanup(move || {
        // Landing cancels a running interval.
        let mut sched = IntervalScheduler {
            on_tick: deliver_tick,
        };
        demo.update_value(|d| {
            if let Err(e) = d.go_to(View::Landing, &mut sched) {
                warn!(error = %e, "cleanup navigation failed");
            }
        });
    });

    view! {
        <div class="app">
            <Topbar active=active status=status is_running=is_running navigate=navigate />
            <main class="app-main">
                {move || match active.get() {
                    View::Landing => view! { <LandingView navigate=navigate /> }.into_any(),
                    View::Upload => {
                        view! {
                            <UploadView
                                dataset=dataset
                                navigate=navigate
                                on_file=on_file
                                on_sample=on_sample
                            />
                        }
                            .into_any()
                    }
                    View::Preprocess => {
                        view! { <PreprocessView dataset=dataset navigate=navigate /> }.into_any()
                    }
                    View::Train => {
                        view! { <TrainView progress=progress history=history /> }.into_any()
                    }
                    View::Results => {
                        view! {
                            <ResultsView report=report navigate=navigate on_export=on_export />
                        }
                            .into_any()
                    }
                }}
            </main>
            <Footer />
            <ToastStack toasts=toasts />
        </div>
    }
}

#[component]
fn ScreenHeading(screen: View) -> impl IntoView {
    view! {
        <div class="screen-heading">
            <h2>{screen.title()}</h2>
            {view_subtitle(screen).map(|s| view! { <p class="subtle">{s}</p> })}
        </div>
    }
}

#[component]
fn LandingView(navigate: Callback<View>) -> impl IntoView {
    view! {
        <section class="landing">
            <div class="landing-copy">
                <ScreenHeading screen=View::Landing />
                <p>{LANDING_INTRO}</p>
                <ul class="checklist">
                    {LANDING_FEATURES
                        .iter()
                        .map(|item| view! { <li><span class="check">"✓"</span>{*item}</li> })
                        .collect_view()}
                </ul>
                <button class="btn primary" on:click=move |_| navigate.run(View::Upload)>
                    "Start Demo"
                </button>
            </div>
            <div class="landing-side">
                <div class="card">
                    <h3>"Quick Start Guide"</h3>
                    <ol class="steps">
                        {QUICK_START
                            .iter()
                            .enumerate()
                            .map(|(i, step)| {
                                view! {
                                    <li>
                                        <span class="step-num">{i + 1}</span>
                                        <span>{*step}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ol>
                </div>
                <div class="card note">
                    <span class="note-label">"Note: "</span>
                    {SIMULATION_NOTE}
                </div>
            </div>
        </section>
    }
}

#[component]
fn UploadView(
    dataset: ReadSignal<Option<LoadedDataset>>,
    navigate: Callback<View>,
    on_file: Callback<web_sys::Event>,
    on_sample: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="card">
            <ScreenHeading screen=View::Upload />
            <div class="row">
                <label class="btn success">
                    "Choose CSV File"
                    <input
                        type="file"
                        accept=".csv"
                        style="display: none;"
                        on:change=move |ev| on_file.run(ev)
                    />
                </label>
                <button class="btn ghost" on:click=move |_| on_sample.run(())>
                    "Download Sample"
                </button>
            </div>

            {move || match dataset.get() {
                Some(d) => {
                    view! {
                        <div class="upload-ok">{UPLOAD_OK}</div>
                        <h3>"Data Preview"</h3>
                        <div class="table-wrap">
                            <table class="preview">
                                <thead>
                                    <tr>
                                        {d
                                            .preview
                                            .header()
                                            .iter()
                                            .map(|h| view! { <th>{h.clone()}</th> })
                                            .collect_view()}
                                    </tr>
                                </thead>
                                <tbody>
                                    {d
                                        .preview
                                        .rows()
                                        .iter()
                                        .map(|row| {
                                            view! {
                                                <tr>
                                                    {row
                                                        .iter()
                                                        .map(|c| view! { <td>{c.clone()}</td> })
                                                        .collect_view()}
                                                </tr>
                                            }
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>
                        <div class="row">
                            <div class="stat">
                                <p class="subtle">"Detected Features"</p>
                                <p class="stat-value">{d.feature_count}</p>
                            </div>
                            <button
                                class="btn primary"
                                on:click=move |_| navigate.run(View::Preprocess)
                            >
                                {UPLOAD_NEXT}
                            </button>
                        </div>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <div class="empty">
                            <p>{UPLOAD_EMPTY}</p>
                            <p class="subtle">{UPLOAD_EMPTY_HINT}</p>
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn PreprocessView(
    dataset: ReadSignal<Option<LoadedDataset>>,
    navigate: Callback<View>,
) -> impl IntoView {
    view! {
        <section class="card">
            <ScreenHeading screen=View::Preprocess />
            <p class="subtle">
                {move || {
                    dataset
                        .get()
                        .map(|d| {
                            format!(
                                "{} · {} features",
                                d.file_name.unwrap_or_else(|| "dataset".to_string()),
                                d.feature_count,
                            )
                        })
                        .unwrap_or_default()
                }}
            </p>
            <ul class="checklist">
                {PREPROCESS_STEPS
                    .iter()
                    .map(|s| view! { <li><span class="check">"✓"</span>{*s}</li> })
                    .collect_view()}
            </ul>
            <button class="btn primary" on:click=move |_| navigate.run(View::Train)>
                "Start Training"
            </button>
        </section>
        <section class="card">
            <h3>"Model Architecture"</h3>
            <div class="arch">
                {ARCHITECTURE
                    .iter()
                    .map(|(tone, line)| view! { <div class=tone.class()>{*line}</div> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn TrainView(progress: ReadSignal<u8>, history: ReadSignal<Vec<EpochRecord>>) -> impl IntoView {
    let canvas = NodeRef::<html::Canvas>::new();

    Effect::new(move |_| {
        let series = loss_series(&history.get());
        if let Some(c) = canvas.get() {
            let _ = charts::draw_line_series(
                &c,
                &[
                    (series.train.as_slice(), TRAIN_COLOR),
                    (series.val.as_slice(), VAL_COLOR),
                ],
                series.max,
                CHART_BG,
                CHART_GRID,
            );
        }
    });

    view! {
        <section class="card">
            <ScreenHeading screen=View::Train />
            <div class="row spread">
                <span>"Overall Progress"</span>
                <span class="stat-value">{move || format!("{}%", progress.get())}</span>
            </div>
            <div class="progress-track">
                <div class="progress-fill" style:width=move || progress_width(progress.get())></div>
            </div>
            <h3>"Training Loss"</h3>
            <canvas node_ref=canvas width="720" height="280"></canvas>
            <div class="legend">
                <span style:color=TRAIN_COLOR>"Training Loss"</span>
                <span style:color=VAL_COLOR>"Validation Loss"</span>
            </div>
        </section>
    }
}

#[component]
fn ResultsView(
    report: ReadSignal<EvaluationReport>,
    navigate: Callback<View>,
    on_export: Callback<()>,
) -> impl IntoView {
    let canvas = NodeRef::<html::Canvas>::new();

    Effect::new(move |_| {
        let bars = report.with(|r| mae_bars(&r.samples));
        if let Some(c) = canvas.get() {
            let _ = charts::draw_colored_bars(&c, &bars, CHART_BG, CHART_GRID);
        }
    });

    let cell = move |row: usize, col: usize| move || report.get().matrix.0[row][col];
    let metrics = move || report.get().metrics();

    view! {
        <ScreenHeading screen=View::Results />
        <div class="grid-2">
            <section class="card">
                <h3>"MAE Distribution"</h3>
                <canvas node_ref=canvas width="560" height="260"></canvas>
                <p class="subtle">{MAE_CAPTION}</p>
            </section>
            <section class="card">
                <h3>"Confusion Matrix"</h3>
                <table class="confusion">
                    <thead>
                        <tr>
                            <th></th>
                            <th>"Predicted: Normal"</th>
                            <th>"Predicted: Anomaly"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <tr>
                            <td>"True: Normal"</td>
                            <td class="hit">{cell(0, 0)}</td>
                            <td class="miss">{cell(0, 1)}</td>
                        </tr>
                        <tr>
                            <td>"True: Anomaly"</td>
                            <td class="miss">{cell(1, 0)}</td>
                            <td class="hit">{cell(1, 1)}</td>
                        </tr>
                    </tbody>
                </table>
                <dl class="metrics">
                    <dt>"Precision (Anomaly)"</dt>
                    <dd>{move || metric_text(metrics().precision)}</dd>
                    <dt>"Recall (Anomaly)"</dt>
                    <dd>{move || metric_text(metrics().recall)}</dd>
                    <dt>"Accuracy"</dt>
                    <dd>{move || metric_text(metrics().accuracy)}</dd>
                </dl>
            </section>
        </div>
        <section class="card">
            <h3>"Implementation Notes"</h3>
            {IMPLEMENTATION_NOTES
                .iter()
                .map(|(title, body)| {
                    view! {
                        <p>
                            <span class="note-label">{*title}": "</span>
                            {*body}
                        </p>
                    }
                })
                .collect_view()}
        </section>
        <div class="row">
            <button class="btn primary" on:click=move |_| on_export.run(())>
                "Export Results"
            </button>
            <button class="btn ghost" on:click=move |_| navigate.run(View::Landing)>
                "Return Home"
            </button>
        </div>
    }
}

use std::sync::Arc;

use chessedu_core::exercises;
use chessedu_core::model::ExerciseId;
use dioxus::prelude::*;
use dioxus_router::Link;
use services::{Celebrations, CompletionTask};
use tracing::error;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::board::{ChessBoard, SpareTray};
use crate::views::effects::{BoardFlash, Effects};
use crate::views::live_progress::LiveProgress;
use crate::vm::{EffectOutbox, ExerciseIntent, ExerciseOutcome, ExerciseVm, NotificationKind};

const SAVE_FAILED: &str = "There was an error saving your progress. Please try again.";

/// Saves a finished exercise, then plays its celebrations and publishes
/// the returned progress.
pub(crate) async fn report_completion(
    task: CompletionTask,
    outbox: EffectOutbox,
    effects: Effects,
    live: LiveProgress,
) {
    let report = task.run().await;
    effects.play(outbox.drain());
    if let Some(snapshot) = report.snapshot {
        live.publish(snapshot);
    }
    if !report.failures.is_empty() {
        error!(failures = report.failures.len(), "exercise completion not saved");
        effects.notify(NotificationKind::Error, "Error", SAVE_FAILED);
    }
}

#[component]
pub fn ExerciseView(slug: String) -> Element {
    // Keyed so another exercise gets a fresh runner.
    rsx! {
        ExerciseScreen { key: "{slug}", slug: slug.clone() }
    }
}

#[component]
fn ExerciseScreen(slug: String) -> Element {
    let ctx = use_context::<AppContext>();
    let effects = use_context::<Effects>();
    let live = use_context::<LiveProgress>();
    let outbox = use_hook(EffectOutbox::default);

    let mut exercise = use_signal({
        let outbox = outbox.clone();
        move || {
            let id = slug.parse::<ExerciseId>().map_err(|_| ViewError::NotFound)?;
            let sink: Arc<dyn Celebrations> = Arc::new(outbox);
            ExerciseVm::start(id, ctx.exercise_capabilities(sink))
        }
    });

    let dispatch = use_callback(move |intent: ExerciseIntent| {
        let outcome = match exercise.write().as_mut() {
            Ok(vm) => vm.apply(intent),
            Err(_) => return,
        };
        effects.play(outbox.drain());

        if let ExerciseOutcome::Finished(task) = outcome {
            spawn(report_completion(task, outbox.clone(), effects, live));
        }
    });

    let guard = exercise.read();
    let vm = match guard.as_ref() {
        Ok(vm) => vm,
        Err(err) => {
            return rsx! {
                div { class: "page",
                    p { "{err.message()}" }
                    Link { to: Route::Lessons {}, "Back to lessons" }
                }
            };
        }
    };
    let info = *vm.info();
    let panel = vm.panel();
    let board = vm.board();
    let tray = vm.tray();
    let feedback = vm.feedback().clone();
    drop(guard);

    let next_exercise = info
        .next
        .and_then(exercises::exercise)
        .map(|next| (next.info.id.slug(), next.info.title));
    let flash = effects.board_flash().map(BoardFlash::class);

    rsx! {
        div { class: "page exercise",
            h2 { "{info.title}" }
            p { class: "exercise-summary", "{info.summary}" }

            div { class: "progress",
                div { class: "progress-bar", style: "width: {panel.percent}%;" }
            }
            span { class: "progress-label", "{panel.percent}% complete" }

            div { class: "step-buttons",
                for button in panel.buttons {
                    button {
                        key: "{button.index}",
                        class: button.class(),
                        disabled: panel.finished,
                        onclick: move |_| dispatch.call(ExerciseIntent::GoTo(button.index)),
                        "{button.label}"
                    }
                }
            }

            div { class: "exercise-body",
                div { class: "board-column",
                    ChessBoard {
                        board: board.clone(),
                        flash,
                        on_intent: move |intent| dispatch.call(ExerciseIntent::Board(intent)),
                    }
                    if board.show_tray {
                        SpareTray {
                            pieces: tray,
                            on_intent: move |intent| dispatch.call(ExerciseIntent::Board(intent)),
                        }
                    }
                }

                div { class: "step-panel",
                    h3 { "{panel.heading}" }
                    p { "{panel.description}" }
                    if let Some(instructions) = panel.instructions {
                        p { class: "instructions", "{instructions}" }
                    }
                    ul { class: "tasks",
                        for task in panel.tasks.iter() {
                            li { "{task}" }
                        }
                    }
                    div { class: feedback.kind.class(), "{feedback.text}" }

                    if panel.finished {
                        div { class: "completion-panel",
                            if let Some((slug, title)) = next_exercise {
                                Link {
                                    class: "primary",
                                    to: Route::Exercise { slug: slug.to_owned() },
                                    "Continue to {title}"
                                }
                            }
                            Link { to: Route::Lessons {}, "Back to lessons" }
                        }
                    } else {
                        div { class: "controls",
                            button { onclick: move |_| dispatch.call(ExerciseIntent::Previous), "Previous" }
                            button { onclick: move |_| dispatch.call(ExerciseIntent::Reset), "Reset" }
                            button { onclick: move |_| dispatch.call(ExerciseIntent::Hint), "Hint" }
                            if panel.can_check {
                                button { onclick: move |_| dispatch.call(ExerciseIntent::Check), "Check" }
                            }
                            button {
                                class: "primary",
                                disabled: !panel.next_enabled,
                                onclick: move |_| dispatch.call(ExerciseIntent::Next),
                                "Next"
                            }
                        }
                    }
                }
            }
        }
    }
}

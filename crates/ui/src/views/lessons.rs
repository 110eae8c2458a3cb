use chessedu_core::model::LessonId;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::effects::Effects;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonCardVm, NotificationKind, ProgressBannerVm, map_lesson_cards};

#[derive(Clone, Debug, PartialEq)]
struct LessonsData {
    cards: Vec<LessonCardVm>,
    banner: Option<ProgressBannerVm>,
}

#[component]
pub fn LessonsView() -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();

    let mut resource = use_resource(move || {
        let lessons = lessons.clone();
        async move {
            let overview = lessons.list().await.map_err(ViewError::from)?;
            Ok(LessonsData {
                cards: map_lesson_cards(&overview.lessons),
                banner: overview.progress.as_ref().map(ProgressBannerVm::from),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Lessons" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if let Some(banner) = data.banner {
                        ProgressBanner { banner }
                    }
                    if data.cards.is_empty() {
                        p { "No lessons available yet." }
                    } else {
                        div { class: "lesson-grid",
                            for card in data.cards {
                                LessonCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button { onclick: move |_| resource.restart(), "Retry" }
                },
            }
        }
    }
}

#[component]
pub fn ProgressBanner(banner: ProgressBannerVm) -> Element {
    rsx! {
        div { class: "progress-banner",
            span { "Lessons completed: {banner.completed}" }
            span { "Streak: {banner.streak} days" }
            if let Some(saved_at) = banner.stale_since {
                span { class: "stale", "Offline: showing progress saved {saved_at}" }
            }
        }
    }
}

#[component]
fn LessonCard(card: LessonCardVm) -> Element {
    let ctx = use_context::<AppContext>();
    let effects = use_context::<Effects>();
    let navigator = use_navigator();
    let lesson_id = LessonId::new(card.id);

    let start = move |_: MouseEvent| {
        let lessons = ctx.lessons();
        spawn(async move {
            match lessons.first_exercise(lesson_id).await {
                Ok(exercise) => {
                    navigator.push(Route::Exercise {
                        slug: exercise.slug().to_owned(),
                    });
                }
                Err(err) => {
                    warn!(lesson = %lesson_id, error = %err, "cannot start lesson");
                    effects.notify(
                        NotificationKind::Error,
                        "Cannot start lesson",
                        ViewError::from(err).message(),
                    );
                }
            }
        });
    };

    rsx! {
        div { class: card.status_class,
            div { class: "lesson-header",
                h3 { "{card.title}" }
                span { class: "lesson-status", "{card.status_label}" }
            }
            p { "{card.description}" }
            if !card.content.is_empty() {
                p { class: "lesson-content", "{card.content}" }
            }
            if !card.objectives.is_empty() {
                ul { class: "objectives",
                    for objective in card.objectives.iter() {
                        li { "{objective}" }
                    }
                }
            }
            button {
                class: "primary",
                disabled: card.locked,
                onclick: start,
                "{card.action_label}"
            }
        }
    }
}

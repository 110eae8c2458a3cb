use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::effects::{EffectsLayer, use_effects_provider};
use crate::views::live_progress::{LiveProgress, use_live_progress_provider};
use crate::views::{AchievementsView, ExerciseView, FreePlayView, LessonsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LessonsView)] Lessons {},
        #[route("/exercise/:slug", ExerciseView)] Exercise { slug: String },
        #[route("/board", FreePlayView)] Board {},
        #[route("/achievements", AchievementsView)] Achievements {},
}

#[component]
fn Layout() -> Element {
    use_effects_provider();
    use_live_progress_provider();
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
            EffectsLayer {}
        }
    }
}

#[component]
pub(crate) fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let live = use_context::<LiveProgress>();
    let progress = ctx.progress();
    // Seeds the streak; completed exercises publish newer snapshots.
    use_resource(move || {
        let progress = progress.clone();
        async move {
            if let Ok(loaded) = progress.load().await {
                live.publish(loaded.snapshot);
            }
        }
    });
    let streak = live.streak();

    rsx! {
        nav { class: "sidebar",
            h1 { "Chess Edu" }
            ul {
                li { Link { to: Route::Lessons {}, "Lessons" } }
                li { Link { to: Route::Board {}, "Chess Board" } }
                li { Link { to: Route::Achievements {}, "Achievements" } }
            }
            if let Some(days) = streak {
                p { class: "streak", "🔥 {days} day streak" }
            }
        }
    }
}

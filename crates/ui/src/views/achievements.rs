use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::lessons::ProgressBanner;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AchievementCardVm, AchievementsVm, ProgressBannerVm, map_achievement_board};

#[derive(Clone, Debug, PartialEq)]
struct AchievementsData {
    board: AchievementsVm,
    banner: ProgressBannerVm,
}

#[component]
pub fn AchievementsView() -> Element {
    let ctx = use_context::<AppContext>();
    let achievements = ctx.achievements();

    let mut resource = use_resource(move || {
        let achievements = achievements.clone();
        async move {
            let overview = achievements.load_board().await.map_err(ViewError::from)?;
            Ok(AchievementsData {
                board: map_achievement_board(&overview.board),
                banner: ProgressBannerVm::from(&overview.progress),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Achievements" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    ProgressBanner { banner: data.banner }
                    if let Some(message) = data.board.empty_message {
                        p { class: "empty-achievements", "{message}" }
                    } else {
                        p { "Unlocked: {data.board.unlocked}" }
                    }
                    div { class: "achievement-grid",
                        for card in data.board.cards {
                            AchievementCard { key: "{card.id}", card }
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
fn AchievementCard(card: AchievementCardVm) -> Element {
    rsx! {
        div {
            class: card.class(),
            style: "animation-delay: {card.delay_ms}ms;",
            div { class: "achievement-icon", "{card.icon}" }
            h3 { "{card.title}" }
            p { "{card.description}" }
        }
    }
}

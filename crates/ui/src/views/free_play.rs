use dioxus::prelude::*;

use crate::views::board::ChessBoard;
use crate::views::effects::Effects;
use crate::vm::{BoardIntent, FreePlayIntent, FreePlayVm};

#[component]
pub fn FreePlayView() -> Element {
    let effects = use_context::<Effects>();
    let mut vm = use_signal(FreePlayVm::new);

    let dispatch = use_callback(move |intent: FreePlayIntent| {
        let announcement = vm.write().apply(intent);
        if let Some(announcement) = announcement {
            effects.notify(announcement.kind, announcement.title, announcement.text);
        }
    });

    let guard = vm.read();
    let board = guard.board();
    let status = guard.status_text();
    let fen = guard.fen();
    let history = guard.history();
    let hint = guard.hint();
    drop(guard);

    rsx! {
        div { class: "page free-play",
            h2 { "Chess Board" }

            div { class: "exercise-body",
                div { class: "board-column",
                    ChessBoard {
                        board,
                        flash: None,
                        on_intent: move |intent| {
                            if let BoardIntent::Square(square) = intent {
                                dispatch.call(FreePlayIntent::Square(square));
                            }
                        },
                    }
                    div { class: "controls",
                        button { onclick: move |_| dispatch.call(FreePlayIntent::Reset), "Start position" }
                        button { onclick: move |_| dispatch.call(FreePlayIntent::Flip), "Flip board" }
                        button { onclick: move |_| dispatch.call(FreePlayIntent::Hint), "Show hint" }
                    }
                }

                div { class: "board-info",
                    p { class: "turn-indicator", "{status}" }
                    if let Some(hint) = hint {
                        p { class: "hint", "{hint}" }
                    }
                    h3 { "Position" }
                    code { class: "fen", "{fen}" }
                    h3 { "Moves" }
                    div { class: "move-history",
                        if history.is_empty() {
                            p { class: "empty-message", "No moves yet" }
                        }
                        for pair in history {
                            div { key: "{pair.number}", class: "move-pair",
                                span { class: "move-number", "{pair.number}." }
                                span { class: "move white-move", "{pair.white}" }
                                if let Some(black) = pair.black.as_ref() {
                                    span { class: "move black-move", "{black}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;

use crate::vm::{BoardIntent, BoardVm, TrayPieceVm};

#[component]
pub fn ChessBoard(board: BoardVm, flash: Option<&'static str>, on_intent: EventHandler<BoardIntent>) -> Element {
    let class = match flash {
        Some(flash) => format!("board {flash}"),
        None => "board".to_owned(),
    };
    rsx! {
        div { class: "{class}",
            for cell in board.squares {
                div {
                    key: "{cell.name}",
                    class: cell.class(),
                    title: "{cell.name}",
                    onclick: move |_| on_intent.call(BoardIntent::Square(cell.square)),
                    span { class: "piece", "{cell.glyph}" }
                }
            }
        }
    }
}

#[component]
pub fn SpareTray(pieces: Vec<TrayPieceVm>, on_intent: EventHandler<BoardIntent>) -> Element {
    rsx! {
        div { class: "spare-tray",
            for item in pieces {
                button {
                    class: if item.selected { "spare selected" } else { "spare" },
                    onclick: move |_| on_intent.call(BoardIntent::Tray(item.piece)),
                    "{item.glyph}"
                }
            }
            button {
                class: "trash",
                title: "Remove the selected piece",
                onclick: move |_| on_intent.call(BoardIntent::Trash),
                "🗑"
            }
        }
    }
}

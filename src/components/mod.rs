//! UI Components
//!
//! Leptos components rendering the board store.

mod board_lane;
mod board_view;
mod delete_confirm_button;
mod drag_overlay;
mod new_task_form;
mod notice_modal;
mod save_button;
mod task_card;

pub use board_lane::BoardLane;
pub use board_view::BoardView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use drag_overlay::DragOverlay;
pub use new_task_form::NewTaskForm;
pub use notice_modal::NoticeModal;
pub use save_button::SaveButton;
pub use task_card::{TaskCard, TaskCardBody};

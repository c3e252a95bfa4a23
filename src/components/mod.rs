//! UI Components
//!
//! Leptos components for the route board.

mod board_column;
mod board_status;
mod route_board;
mod route_card;

pub use board_column::BoardColumn;
pub use board_status::{BoardFailure, BoardLoading};
pub use route_board::RouteBoard;
pub use route_card::RouteCard;

// --- File: crates/reservas_board/src/lib.rs ---

// Client-side model of the booking board.
pub mod board;
#[cfg(test)]
mod board_test;
pub mod client;
pub mod error;
pub mod form;
pub mod grid;
#[cfg(test)]
mod grid_test;

pub use board::BookingBoard;
pub use client::{GatewayClient, HttpGatewayClient};
pub use error::BoardError;
pub use form::BookingForm;
pub use grid::{ReservationLine, RoomCard, SlotCell};

pub mod rooms_view;

pub use rooms_view::{InMemoryRoomsView, RoomsViewStore};

pub mod memory;
pub mod room;
pub mod room_invite;
pub mod room_member;

pub use memory::MemoryStore;
pub use room::{PgRoomRepository, RoomRepository};
pub use room_invite::{InviteRepository, PgInviteRepository};
pub use room_member::{MembershipRepository, PgMembershipRepository};

#[cfg(test)]
pub use room::MockRoomRepository;
#[cfg(test)]
pub use room_invite::MockInviteRepository;
#[cfg(test)]
pub use room_member::MockMembershipRepository;

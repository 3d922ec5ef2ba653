pub mod id;
pub mod notification;
pub mod room;
pub mod room_invite;
pub mod room_member;
pub mod session;
pub mod view;

pub use id::{generate_id, InviteId, MembershipId, RoomId, UserId};
pub use notification::{NotificationEvent, NotificationType};
pub use room::{normalize_room_name, Room};
pub use room_invite::{BulkInviteReport, InviteStatus, RoomInvite};
pub use room_member::RoomMembership;
pub use session::{Session, SessionState};
pub use view::RoomsView;

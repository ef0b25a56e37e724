//! Service Layer
//!
//! Operations composing store calls: user-profile sync, project
//! creation/listing, and project membership.

mod membership;
mod projects;
mod users;


pub use membership::{AddMemberOutcome, MembershipService};
pub use projects::ProjectService;
pub use users::UserService;

//! Database repositories.

mod category;
mod comment;
mod location;
mod post;
mod user;
mod user_profile;

pub use category::CategoryRepository;
pub use comment::CommentRepository;
pub use location::LocationRepository;
pub use post::PostRepository;
pub use user::UserRepository;
pub use user_profile::UserProfileRepository;

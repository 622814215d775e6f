//! Database entities.

pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod user;
pub mod user_profile;

pub use category::Entity as Category;
pub use comment::Entity as Comment;
pub use location::Entity as Location;
pub use post::Entity as Post;
pub use user::Entity as User;
pub use user_profile::Entity as UserProfile;

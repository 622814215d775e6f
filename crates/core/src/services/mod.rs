//! Business logic services.

#![allow(missing_docs)]

pub mod category;
pub mod comment;
pub mod location;
pub mod media;
pub mod post;
pub mod user;

pub use category::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
pub use comment::{CommentService, CreateCommentInput, UpdateCommentInput};
pub use location::{CreateLocationInput, LocationService, UpdateLocationInput};
pub use media::MediaService;
pub use post::{is_visible_to, CreatePostInput, PostService, UpdatePostInput};
pub use user::{CreateUserInput, UpdateUserInput, UserService};

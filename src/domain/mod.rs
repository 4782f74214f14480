pub mod card;
pub mod comment;
pub mod post;
pub mod user;

pub use card::{sort_oldest_first, CommentCard, Engagement, PostCard, PostDetail, ReplyCard, Resolved, ViewerFlags};
pub use comment::Comment;
pub use post::{PostBody, PostMeta};
pub use user::{Category, User};

//! Collaborator traits
//!
//! The core pipeline is pure; everything that touches the outside world is
//! reached through these seams so it can be swapped for fakes in tests:
//!
//! ```text
//!   - LinkBuilder: outbound marketplace URLs (product + search)
//!   - CommentSource: fetch comment threads and post replies
//! ```

mod comments;
mod links;

pub use comments::CommentSource;
pub use links::LinkBuilder;

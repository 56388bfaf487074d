//! Reply generation for shopping comments
//!
//! Features:
//! - Reply policy over extracted requests (clarify, Top-N, fallback)
//! - Templated reply composition with Indian rupee formatting
//! - Affiliate link construction
//! - Batch responder that answers new comment threads per video

pub mod batch;
pub mod engine;
pub mod links;
pub mod policy;
pub mod response;

pub use batch::{CommentResponder, PassReport};
pub use engine::{Reply, ReplyEngine};
pub use links::AffiliateLinkBuilder;
pub use policy::decide;
pub use response::{format_inr, ReplyComposer};

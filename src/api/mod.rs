//! API Gateway proxy plumbing shared by every handler

pub mod helpers;
pub mod pagination;
pub mod parsing;

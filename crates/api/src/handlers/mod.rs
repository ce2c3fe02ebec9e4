//! Request handlers, one module per resource.

pub mod chat;
pub mod discussion;
pub mod link;
pub mod membership;
pub mod notification;
pub mod profile;
pub mod project;
pub mod token;
pub mod university;

//! Page-side behavior of a blog and portfolio site, modelled as typed state
//! that renders HTML fragments and talks to the site over HTTP.

pub mod client;
pub mod code_copy;
pub mod comments;
pub mod config;
pub mod contact;
pub mod csrf;
pub mod error;
pub mod likes;
pub mod models;
pub mod outline;
pub mod page;
pub mod projects;
pub mod render;
pub mod share;
pub mod toast;


pub use client::{Backend, FormRequest, HttpBackend};
pub use config::{PageConfig, Session};
pub use error::FolioError;

#![allow(clippy::type_complexity)]
#![warn(clippy::disallowed_types)]
#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod community;
mod config;
mod data_service;
mod paginated_list;
mod pagination_options;
mod pagination_service;
mod remote_data;
mod sort_options;
mod stream_ext;
mod subscription;
mod top_level_community_list;
mod utils;

pub use community::*;
pub use config::*;
pub use data_service::*;
pub use paginated_list::*;
pub use pagination_options::*;
pub use pagination_service::*;
pub use remote_data::*;
pub use sort_options::*;
pub use stream_ext::*;
pub use subscription::*;
pub use top_level_community_list::*;

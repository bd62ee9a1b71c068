mod load;
mod path;
mod table;
mod types;

pub use load::*;
pub use path::{join_paths, RoutePath, Segment, WILDCARD_PARAM};
pub(crate) use path::split_location;
pub use table::{async_routes, constant_routes};
pub use types::*;

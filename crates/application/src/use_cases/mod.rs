pub mod resolve_item;

pub use resolve_item::{build_request, ResolveItemUseCase};

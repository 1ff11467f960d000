mod detail;
mod listing;
mod suggest;

pub use detail::DetailController;
pub use listing::{ListController, ListState};
pub use suggest::{DropdownEvent, SearchMode, SuggestController};

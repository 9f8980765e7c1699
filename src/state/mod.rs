//! View state, the actions that change it, and the controller that commits
//! them

pub mod dispatcher;
pub mod events;
pub mod reducer;
pub mod view_state;

pub use dispatcher::{HostRequest, TableActions, TableController, ViewStateSubscriber};
pub use events::{TableAction, Transition};
pub use reducer::TableReducer;
pub use view_state::{
    ActiveBar, Filter, OrderingEntry, Pagination, Selection, Sort, SortDirection, ViewState,
};

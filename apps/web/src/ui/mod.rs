#![allow(dead_code)]

// View-state components. Each type owns the state of one piece of the page and
// exposes a method per user action; `render` turns them into HTML.

pub mod carousel;
pub mod controller;
pub mod modal;
pub mod search_section;

pub use carousel::{CarouselSlot, CarouselView, SimilarJobsCarousel};
pub use controller::{PageController, ResultsStatus, ViewState};
pub use modal::JobDetailsModal;
pub use search_section::SearchSection;

pub mod page_surface;
pub mod surface;
pub mod wait;

pub use page_surface::PageSurface;
pub use surface::{Key, Selector, UiSurface};
pub use wait::{
    await_condition, cancellable, pause, wait_for_element, wait_for_elements, WaitPolicy,
};

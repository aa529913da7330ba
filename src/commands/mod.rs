pub mod handlers;

pub use handlers::{
    activate_window, get_instance_details, list_instances, toggle_window_size,
    update_window_height,
};

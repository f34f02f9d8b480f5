pub mod api;
pub mod frame_loop;

pub mod button_handler;

pub use button_handler::Button;

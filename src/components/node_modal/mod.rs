mod component;
mod connections;
mod session;

pub use component::NodeEditModal;

pub mod api;
pub mod data_transformer;
pub mod event_processor;
pub mod file_processor;
pub mod notification;
pub mod response;
pub mod workflow;

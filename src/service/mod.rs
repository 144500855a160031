pub mod booking_service;
pub mod form_options;
pub mod health_service;
pub mod host_list;
pub mod location_catalog;
pub mod submit_flow;
pub mod time_range;

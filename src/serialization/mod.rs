pub mod itinerary;
pub mod network;
pub mod request;
pub mod response;

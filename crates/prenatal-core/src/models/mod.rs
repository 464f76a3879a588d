pub mod assessment;
pub mod condition;
pub mod marker;
pub mod patient;
pub mod request;
pub mod risk;

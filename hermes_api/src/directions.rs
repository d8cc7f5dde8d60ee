pub mod driving;

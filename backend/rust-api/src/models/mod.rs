pub mod dashboard;
pub mod group;
pub mod lesson;
pub mod preferences;
pub mod quiz;
pub mod timer;
pub mod user;

pub mod personality;
